// src/handlers/admin.rs
//
// Admin moderation surface: user management (owner validation, cascading
// user deletion) and full control over houses, rooms and reservations.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    cascade,
    error::AppError,
    handlers::{
        owner::{build_house, insert_room, validate_room_edit},
        reservations::join_reservations,
    },
    models::{
        house::{AdminHouseRequest, HouseListItem, HousePayload},
        room::{RoomListItem, RoomPayload},
        user::{OwnerStatus, Role, UserResponse},
    },
    store::{DynStore, next_id},
    utils::jwt::Claims,
    validation::{FieldError, validate_house},
};

/// Lists all users in the system.
/// Admin only.
pub async fn list_users(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    let list: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(Json(list))
}

/// Lists owner accounts, for assigning houses.
/// Admin only.
pub async fn list_owners(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    let owners: Vec<UserResponse> = users
        .iter()
        .filter(|u| u.role == Role::Owner)
        .map(UserResponse::from)
        .collect();
    Ok(Json(owners))
}

/// Marks an owner account as validated, unlocking its dashboard login.
/// Admin only.
pub async fn validate_owner(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let mut users = store.load_users().await?;

    let user = users.iter_mut().find(|u| u.id == id).ok_or_else(|| {
        tracing::warn!("No user found with this Id: {}", id);
        AppError::NotFound("User not found".to_string())
    })?;

    if user.role != Role::Owner {
        return Err(AppError::BadRequest("User is not an owner".to_string()));
    }

    user.status = Some(OwnerStatus::Validated);
    store.save_users(&users).await?;

    Ok(StatusCode::OK)
}

/// Deletes a user by ID, cascading by role: an owner loses their houses,
/// rooms and the reservations on them; a client loses their reservations.
/// Admin only. Prevents deleting self.
pub async fn delete_user(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    // Prevent self-deletion
    if id == claims.user_id() {
        return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
    }

    let users = store.load_users().await?;
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;
    let reservations = store.load_reservations().await?;

    let Some((users, houses, rooms, reservations)) =
        cascade::remove_user(users, houses, rooms, reservations, id)
    else {
        tracing::warn!("No user found with this Id: {}", id);
        return Err(AppError::NotFound("User not found".to_string()));
    };

    store.save_reservations(&reservations).await?;
    store.save_rooms(&rooms).await?;
    store.save_houses(&houses).await?;
    store.save_users(&users).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists all houses with room counts.
/// Admin only.
pub async fn list_houses(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    let items: Vec<HouseListItem> = houses
        .into_iter()
        .map(|house| {
            let rooms_count = rooms.iter().filter(|r| r.house_id == house.id).count();
            HouseListItem { house, rooms_count }
        })
        .collect();

    Ok(Json(items))
}

/// Creates a house on behalf of an owner.
/// Admin only.
pub async fn create_house(
    State(store): State<DynStore>,
    Json(payload): Json<AdminHouseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    let mut errors = validate_house(&payload.house);

    let owner_exists = users
        .iter()
        .any(|u| u.id == payload.owner_id && u.role == Role::Owner);
    if !owner_exists {
        errors.push(FieldError::new("ownerId", "Please select owner"));
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut houses = store.load_houses().await?;
    let house = build_house(next_id(&houses), payload.owner_id, payload.house);
    houses.push(house.clone());
    store.save_houses(&houses).await?;

    Ok((StatusCode::CREATED, Json(house)))
}

/// Edits any house, re-validating every field. The owner stays unchanged.
/// Admin only.
pub async fn update_house(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
    Json(payload): Json<HousePayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut houses = store.load_houses().await?;

    let pos = houses.iter().position(|h| h.id == id).ok_or_else(|| {
        tracing::warn!("No house found with this Id: {}", id);
        AppError::NotFound("House not found".to_string())
    })?;

    let errors = validate_house(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let owner_id = houses[pos].owner_id;
    houses[pos] = build_house(id, owner_id, payload);
    let house = houses[pos].clone();
    store.save_houses(&houses).await?;

    Ok(Json(house))
}

/// Deletes any house, cascading through its rooms and their reservations.
/// Admin only.
pub async fn delete_house(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;
    let reservations = store.load_reservations().await?;

    let Some((houses, rooms, reservations)) = cascade::remove_house(houses, rooms, reservations, id)
    else {
        tracing::warn!("No house found with this Id: {}", id);
        return Err(AppError::NotFound("House not found".to_string()));
    };

    store.save_rooms(&rooms).await?;
    store.save_reservations(&reservations).await?;
    store.save_houses(&houses).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists all rooms with their house names.
/// Admin only.
pub async fn list_rooms(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    let items: Vec<RoomListItem> = rooms
        .into_iter()
        .filter_map(|room| {
            let Some(house) = houses.iter().find(|h| h.id == room.house_id) else {
                tracing::warn!("No house found with this Id: {}", room.house_id);
                return None;
            };
            Some(RoomListItem {
                house_name: house.house_name.clone(),
                room,
            })
        })
        .collect();

    Ok(Json(items))
}

/// Adds a room to any house, subject to the 5-rooms-per-house cap.
/// Admin only.
pub async fn create_room(
    State(store): State<DynStore>,
    Path(house_id): Path<i64>,
    Json(payload): Json<RoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    if !houses.iter().any(|h| h.id == house_id) {
        tracing::warn!("No house found with this Id: {}", house_id);
        return Err(AppError::NotFound("House not found".to_string()));
    }

    let mut rooms = store.load_rooms().await?;
    let room = insert_room(&mut rooms, house_id, payload)?;
    store.save_rooms(&rooms).await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// Edits any room, re-validating every field.
/// Admin only.
pub async fn update_room(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut rooms = store.load_rooms().await?;

    let pos = rooms.iter().position(|r| r.id == id).ok_or_else(|| {
        tracing::warn!("No room found with this Id: {}", id);
        AppError::NotFound("Room not found".to_string())
    })?;

    let room = validate_room_edit(&mut rooms, pos, payload)?;
    store.save_rooms(&rooms).await?;

    Ok(Json(room))
}

/// Deletes any room, cascading through its reservations.
/// Admin only.
pub async fn delete_room(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = store.load_rooms().await?;
    let reservations = store.load_reservations().await?;

    let Some((rooms, reservations)) = cascade::remove_room(rooms, reservations, id) else {
        tracing::warn!("No room found with this Id: {}", id);
        return Err(AppError::NotFound("Room not found".to_string()));
    };

    store.save_reservations(&reservations).await?;
    store.save_rooms(&rooms).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists every reservation in the system, joined for display.
/// Admin only.
pub async fn list_reservations(
    State(store): State<DynStore>,
) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;
    let reservations = store.load_reservations().await?;

    Ok(Json(join_reservations(reservations, &rooms, &houses)))
}

/// Removes any reservation.
/// Admin only.
pub async fn delete_reservation(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let mut reservations = store.load_reservations().await?;

    let pos = reservations.iter().position(|res| res.id == id).ok_or_else(|| {
        tracing::warn!("No reservation found with this Id: {}", id);
        AppError::NotFound("Reservation not found".to_string())
    })?;

    reservations.remove(pos);
    store.save_reservations(&reservations).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard counters: total houses, rooms and client accounts.
/// Admin only.
pub async fn stats(State(store): State<DynStore>) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    let clients = users.iter().filter(|u| u.role == Role::Client).count();

    Ok(Json(json!({
        "houses": houses.len(),
        "rooms": rooms.len(),
        "clients": clients,
    })))
}
