// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, auth, houses, owner, profile, reservations},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, owner_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, houses, profile, reservations, owner, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (collection store + config).
pub fn create_router(state: AppState) -> Router {
    let origins: [HeaderValue; 2] = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/signup/client", post(auth::signup_client))
        .route("/signup/owner", post(auth::signup_owner))
        .route("/login", post(auth::login));

    // Public browsing: no session required.
    let house_routes = Router::new()
        .route("/", get(houses::list_houses))
        .route("/search", get(houses::search_houses))
        .route("/{id}", get(houses::get_house))
        .route("/{id}/rooms", get(houses::list_house_rooms));

    let room_routes = Router::new().route("/{id}", get(houses::get_room));

    let profile_routes = Router::new()
        .route("/me", get(profile::get_me).put(profile::update_me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let reservation_routes = Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/mine", get(reservations::list_my_reservations))
        .route("/{id}", delete(reservations::delete_my_reservation))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let owner_routes = Router::new()
        .route(
            "/houses",
            get(owner::list_my_houses).post(owner::create_house),
        )
        .route(
            "/houses/{id}",
            put(owner::update_house).delete(owner::delete_house),
        )
        .route("/houses/{id}/rooms", post(owner::create_room))
        .route("/rooms", get(owner::list_my_rooms))
        .route(
            "/rooms/{id}",
            put(owner::update_room).delete(owner::delete_room),
        )
        .route("/reservations", get(owner::list_reservations))
        .route("/reservations/{id}", delete(owner::delete_reservation))
        .route("/stats", get(owner::stats))
        // Double middleware protection: Auth first, then validated-owner check
        .layer(middleware::from_fn_with_state(
            state.clone(),
            owner_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/validate", put(admin::validate_owner))
        .route("/owners", get(admin::list_owners))
        .route(
            "/houses",
            get(admin::list_houses).post(admin::create_house),
        )
        .route(
            "/houses/{id}",
            put(admin::update_house).delete(admin::delete_house),
        )
        .route("/houses/{id}/rooms", post(admin::create_room))
        .route("/rooms", get(admin::list_rooms))
        .route(
            "/rooms/{id}",
            put(admin::update_room).delete(admin::delete_room),
        )
        .route("/reservations", get(admin::list_reservations))
        .route("/reservations/{id}", delete(admin::delete_reservation))
        .route("/stats", get(admin::stats))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/houses", house_routes)
        .nest("/api/rooms", room_routes)
        .nest("/api/profile", profile_routes)
        .nest("/api/reservations", reservation_routes)
        .nest("/api/owner", owner_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
