// tests/api_tests.rs

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use darnest::{
    config::Config,
    models::user::{Role, User},
    routes,
    state::AppState,
    store::{DynStore, JsonStore},
};

const ADMIN_EMAIL: &str = "admin@darnest.tn";
const ADMIN_PASSWORD: &str = "admin123";

/// Helper function to spawn the app on a random port for testing.
/// Every test gets its own throwaway data directory with a seeded admin.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let data_dir = std::env::temp_dir().join(format!("darnest-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&data_dir).expect("Failed to create test data directory");

    let config = Config {
        data_dir: data_dir.to_string_lossy().into_owned(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        admin_email: None,
        admin_password: None,
    };

    let store: DynStore = Arc::new(JsonStore::new(&config.data_dir));

    // Seed the admin account directly into the store
    let users = vec![User {
        id: 1,
        first_name: "Site".to_string(),
        last_name: "Admin".to_string(),
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        phone: String::new(),
        address: String::new(),
        role: Role::Admin,
        status: None,
    }];
    store.save_users(&users).await.expect("Failed to seed admin");

    let state = AppState { store, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@mail.tn", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

fn signup_payload(email: &str) -> serde_json::Value {
    serde_json::json!({
        "firstName": "Amine",
        "lastName": "Ben Salah",
        "email": email,
        "password": "abc123",
        "confirmPassword": "abc123",
        "phone": "12345678",
        "address": "12 Rue de Tunis"
    })
}

fn house_payload() -> serde_json::Value {
    serde_json::json!({
        "houseName": "Dar Amina",
        "housePhone": "71234567",
        "houseCity": "Tunis",
        "houseLocation": "Sidi Bou Said, Main Street",
        "houseDescription": "A quiet guesthouse near the sea.",
        "houseCapacity": 10,
        "houseImg": "data:image/png;base64,iVBORw0KGgo="
    })
}

fn room_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "roomName": name,
        "roomType": "Double",
        "roomDescription": "Bright double room with sea view.",
        "roomPrice": 200,
        "roomCapacity": 2,
        "numBeds": 2,
        "roomServices": ["Wifi", "TV"],
        "roomImg": "data:image/png;base64,iVBORw0KGgo="
    })
}

async fn login(client: &reqwest::Client, address: &str, email: &str, password: &str) -> String {
    let body = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to execute request")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Signs up and validates an owner, then returns a dashboard token.
async fn validated_owner_token(
    client: &reqwest::Client,
    address: &str,
    email: &str,
) -> String {
    client
        .post(format!("{}/api/auth/signup/owner", address))
        .json(&signup_payload(email))
        .send()
        .await
        .expect("Failed to execute request");

    let admin_token = login(client, address, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let users: Vec<serde_json::Value> = client
        .get(format!("{}/api/admin/users", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let owner_id = users
        .iter()
        .find(|u| u["email"] == email)
        .expect("Owner not listed")["id"]
        .as_i64()
        .unwrap();

    let response = client
        .put(format!("{}/api/admin/users/{}/validate", address, owner_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    login(client, address, email, "abc123").await
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn signup_client_works() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("client");

    // Act
    let response = client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["email"], email);
    assert_eq!(body["role"], "client");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn signup_fails_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act: phone number too short
    let mut payload = signup_payload(&unique_email("client"));
    payload["phone"] = serde_json::json!("123");
    let response = client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["phone"], "Phone must be 8-15 digits");
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("client");

    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();

    // Act: same email again
    let response = client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["email"], "Email already in use");

    // Whitespace padding must not slip past the uniqueness scan, since the
    // stored record is trimmed
    let response = client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&format!("  {}  ", email)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["email"], "Email already in use");
}

#[tokio::test]
async fn login_redirects_by_role() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("client");
    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();

    // Act
    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"email": email, "password": "abc123"}))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["redirect"], "houses");
    assert!(body["token"].as_str().is_some());

    // Wrong password
    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"email": email, "password": "wrong1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn owner_login_gated_on_validation() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("owner");

    client
        .post(format!("{}/api/auth/signup/owner", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();

    // Act: login before admin validation
    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"email": email, "password": "abc123"}))
        .send()
        .await
        .unwrap();

    // Assert: refused with the pending-approval message
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Your account is pending validation by the admin. Please wait for approval."
    );

    // After validation the owner reaches the dashboard
    let _token = validated_owner_token(&client, &address, &email).await;
    let response = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({"email": email, "password": "abc123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["redirect"], "ownerDashboard");
}

#[tokio::test]
async fn house_holds_at_most_five_rooms() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = validated_owner_token(&client, &address, &unique_email("owner")).await;

    let house: serde_json::Value = client
        .post(format!("{}/api/owner/houses", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&house_payload())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let house_id = house["id"].as_i64().unwrap();

    // Act: the first five rooms fit
    for i in 1..=5 {
        let response = client
            .post(format!("{}/api/owner/houses/{}/rooms", address, house_id))
            .header("Authorization", format!("Bearer {}", token))
            .json(&room_payload(&format!("Room {}", i)))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 201);
    }

    // Assert: the sixth is rejected
    let response = client
        .post(format!("{}/api/owner/houses/{}/rooms", address, house_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&room_payload("Room Six"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "You cannot add more than 5 rooms for this house!");
}

/// Owner with one house and one room; returns (owner_token, room_id).
async fn setup_bookable_room(client: &reqwest::Client, address: &str) -> (String, i64) {
    let token = validated_owner_token(client, address, &unique_email("owner")).await;

    let house: serde_json::Value = client
        .post(format!("{}/api/owner/houses", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&house_payload())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let house_id = house["id"].as_i64().unwrap();

    let room: serde_json::Value = client
        .post(format!("{}/api/owner/houses/{}/rooms", address, house_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&room_payload("Blue Room"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    (token, room["id"].as_i64().unwrap())
}

fn booking_payload(
    room_id: i64,
    email: &str,
    checkin: NaiveDate,
    checkout: NaiveDate,
    adults: u32,
) -> serde_json::Value {
    serde_json::json!({
        "roomId": room_id,
        "firstName": "Amine",
        "lastName": "Ben Salah",
        "email": email,
        "checkinBooking": checkin.to_string(),
        "checkoutBooking": checkout.to_string(),
        "adults": adults,
        "children": 0
    })
}

#[tokio::test]
async fn booking_flow_with_overlap_detection() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_owner_token, room_id) = setup_bookable_room(&client, &address).await;

    let email = unique_email("client");
    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();
    let token = login(&client, &address, &email, "abc123").await;

    let today = Local::now().date_naive();
    let checkin = today + Duration::days(30);
    let checkout = today + Duration::days(33);

    // Act: 2 guests, price 200, 3 nights
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&booking_payload(room_id, &email, checkin, checkout, 2))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 201);
    let reservation: serde_json::Value = response.json().await.unwrap();
    assert_eq!(reservation["totalPrice"], 1200);
    assert_eq!(reservation["numGuests"], 2);

    // Overlapping dates are refused
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&booking_payload(
            room_id,
            &email,
            checkin + Duration::days(1),
            checkout + Duration::days(2),
            2,
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "This room is not available for the selected dates.");

    // Touching the boundary is not an overlap: checkin on the previous checkout day
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&booking_payload(
            room_id,
            &email,
            checkout,
            checkout + Duration::days(2),
            2,
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    // Guests above room capacity are refused
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&booking_payload(
            room_id,
            &email,
            today + Duration::days(60),
            today + Duration::days(62),
            3,
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["numGuests"], "Number of guests exceeds room capacity.");
}

#[tokio::test]
async fn booking_rejects_bad_dates_and_guest_counts() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_owner_token, room_id) = setup_bookable_room(&client, &address).await;

    let email = unique_email("client");
    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();
    let token = login(&client, &address, &email, "abc123").await;

    let today = Local::now().date_naive();

    // Act: check-in in the past
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&booking_payload(
            room_id,
            &email,
            today - Duration::days(5),
            today + Duration::days(2),
            2,
        ))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["checkinBooking"],
        "Check-in date cannot be in the past."
    );

    // Check-out on or before check-in
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&booking_payload(
            room_id,
            &email,
            today + Duration::days(12),
            today + Duration::days(10),
            2,
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["checkinBooking"],
        "Check-out must be after check-in."
    );

    // Missing dates
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "roomId": room_id,
            "firstName": "Amine",
            "lastName": "Ben Salah",
            "email": email,
            "adults": 2,
            "children": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["errors"]["checkinBooking"],
        "Please enter check-in and check-out dates."
    );

    // Guest counts large enough to wrap u32 still fail the capacity check
    let response = client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({
            "roomId": room_id,
            "firstName": "Amine",
            "lastName": "Ben Salah",
            "email": email,
            "checkinBooking": (today + Duration::days(10)).to_string(),
            "checkoutBooking": (today + Duration::days(12)).to_string(),
            "adults": u32::MAX,
            "children": 1
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["numGuests"], "Number of guests exceeds room capacity.");
}

#[tokio::test]
async fn deleting_house_cascades_to_rooms_and_reservations() {
    // Arrange: a booked room in a house
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (owner_token, room_id) = setup_bookable_room(&client, &address).await;

    let email = unique_email("client");
    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();
    let client_token = login(&client, &address, &email, "abc123").await;

    let today = Local::now().date_naive();
    client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", client_token))
        .json(&booking_payload(
            room_id,
            &email,
            today + Duration::days(10),
            today + Duration::days(12),
            2,
        ))
        .send()
        .await
        .unwrap();

    let houses: Vec<serde_json::Value> = client
        .get(format!("{}/api/owner/houses", address))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let house_id = houses[0]["id"].as_i64().unwrap();

    // Act
    let response = client
        .delete(format!("{}/api/owner/houses/{}", address, house_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    // Assert: rooms and reservations are gone with the house
    let admin_token = login(&client, &address, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let rooms: Vec<serde_json::Value> = client
        .get(format!("{}/api/admin/rooms", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(rooms.is_empty());

    let reservations: Vec<serde_json::Value> = client
        .get(format!("{}/api/admin/reservations", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reservations.is_empty());
}

#[tokio::test]
async fn deleting_client_removes_their_reservations() {
    // Arrange: a client with one reservation
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let (_owner_token, room_id) = setup_bookable_room(&client, &address).await;

    let email = unique_email("client");
    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();
    let client_token = login(&client, &address, &email, "abc123").await;

    let today = Local::now().date_naive();
    client
        .post(format!("{}/api/reservations", address))
        .header("Authorization", format!("Bearer {}", client_token))
        .json(&booking_payload(
            room_id,
            &email,
            today + Duration::days(10),
            today + Duration::days(12),
            2,
        ))
        .send()
        .await
        .unwrap();

    let admin_token = login(&client, &address, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let users: Vec<serde_json::Value> = client
        .get(format!("{}/api/admin/users", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let client_id = users.iter().find(|u| u["email"] == email).unwrap()["id"]
        .as_i64()
        .unwrap();

    // Act
    let response = client
        .delete(format!("{}/api/admin/users/{}", address, client_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    // Assert
    let reservations: Vec<serde_json::Value> = client
        .get(format!("{}/api/admin/reservations", address))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(reservations.is_empty());
}

#[tokio::test]
async fn public_listing_and_search() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = validated_owner_token(&client, &address, &unique_email("owner")).await;

    client
        .post(format!("{}/api/owner/houses", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&house_payload())
        .send()
        .await
        .unwrap();

    // Act: listing needs no session
    let houses: Vec<serde_json::Value> = client
        .get(format!("{}/api/houses", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(houses.len(), 1);
    assert_eq!(houses[0]["houseName"], "Dar Amina");
    assert_eq!(houses[0]["roomsCount"], 0);

    // Search by city, case-insensitive substring
    let found: Vec<serde_json::Value> = client
        .get(format!("{}/api/houses/search?q=tun&by=city", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    let found: Vec<serde_json::Value> = client
        .get(format!("{}/api/houses/search?q=nowhere&by=city", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn owner_routes_refuse_clients() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email("client");
    client
        .post(format!("{}/api/auth/signup/client", address))
        .json(&signup_payload(&email))
        .send()
        .await
        .unwrap();
    let token = login(&client, &address, &email, "abc123").await;

    // Act
    let response = client
        .post(format!("{}/api/owner/houses", address))
        .header("Authorization", format!("Bearer {}", token))
        .json(&house_payload())
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 403);
}
