// src/handlers/owner.rs
//
// Owner dashboard: manage own houses and rooms, see reservations on them.
// Every route here sits behind the owner middleware (validated owners only);
// per-record ownership is still checked on each mutation.

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
    handlers::reservations::join_reservations,
    models::{
        house::{House, HouseListItem, HousePayload},
        room::{Room, RoomListItem, RoomPayload, RoomType},
    },
    store::{DynStore, next_id},
    utils::{html::clean_html, jwt::Claims},
    validation::{validate_house, validate_room},
};

/// Maximum number of rooms a single house may have.
pub const MAX_ROOMS_PER_HOUSE: usize = 5;

/// Lists the connected owner's houses with their room counts.
pub async fn list_my_houses(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    let items: Vec<HouseListItem> = houses
        .into_iter()
        .filter(|h| h.owner_id == owner_id)
        .map(|house| {
            let rooms_count = rooms.iter().filter(|r| r.house_id == house.id).count();
            HouseListItem { house, rooms_count }
        })
        .collect();

    Ok(Json(items))
}

/// Creates a house owned by the connected owner.
pub async fn create_house(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<HousePayload>,
) -> Result<impl IntoResponse, AppError> {
    let errors = validate_house(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut houses = store.load_houses().await?;
    let house = build_house(next_id(&houses), claims.user_id(), payload);
    houses.push(house.clone());
    store.save_houses(&houses).await?;

    Ok((StatusCode::CREATED, Json(house)))
}

/// Edits one of the owner's houses, re-validating every field.
pub async fn update_house(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<HousePayload>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let mut houses = store.load_houses().await?;

    let pos = houses
        .iter()
        .position(|h| h.id == id && h.owner_id == owner_id)
        .ok_or_else(|| {
            tracing::warn!("No house found with this Id: {}", id);
            AppError::NotFound("House not found".to_string())
        })?;

    let errors = validate_house(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    houses[pos] = build_house(id, owner_id, payload);
    let house = houses[pos].clone();
    store.save_houses(&houses).await?;

    Ok(Json(house))
}

/// Deletes one of the owner's houses, cascading through its rooms and their
/// reservations.
pub async fn delete_house(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;

    if !houses.iter().any(|h| h.id == id && h.owner_id == owner_id) {
        tracing::warn!("No house found with this Id: {}", id);
        return Err(AppError::NotFound("House not found".to_string()));
    }

    let rooms = store.load_rooms().await?;
    let reservations = store.load_reservations().await?;

    let Some((houses, rooms, reservations)) = cascade::remove_house(houses, rooms, reservations, id)
    else {
        return Err(AppError::NotFound("House not found".to_string()));
    };

    store.save_rooms(&rooms).await?;
    store.save_reservations(&reservations).await?;
    store.save_houses(&houses).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists all rooms across the owner's houses.
pub async fn list_my_rooms(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    let items: Vec<RoomListItem> = rooms
        .into_iter()
        .filter_map(|room| {
            let house = houses
                .iter()
                .find(|h| h.id == room.house_id && h.owner_id == owner_id)?;
            Some(RoomListItem {
                house_name: house.house_name.clone(),
                room,
            })
        })
        .collect();

    Ok(Json(items))
}

/// Adds a room to one of the owner's houses. A house holds at most 5 rooms;
/// the 6th attempt is rejected.
pub async fn create_room(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(house_id): Path<i64>,
    Json(payload): Json<RoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;

    if !houses
        .iter()
        .any(|h| h.id == house_id && h.owner_id == owner_id)
    {
        tracing::warn!("No house found with this Id: {}", house_id);
        return Err(AppError::NotFound("House not found".to_string()));
    }

    let mut rooms = store.load_rooms().await?;
    let room = insert_room(&mut rooms, house_id, payload)?;
    store.save_rooms(&rooms).await?;

    Ok((StatusCode::CREATED, Json(room)))
}

/// Edits one of the owner's rooms, re-validating every field. Guest counts on
/// existing reservations are not re-checked against a lowered capacity.
pub async fn update_room(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(payload): Json<RoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let mut rooms = store.load_rooms().await?;

    let pos = rooms
        .iter()
        .position(|r| {
            r.id == id
                && houses
                    .iter()
                    .any(|h| h.id == r.house_id && h.owner_id == owner_id)
        })
        .ok_or_else(|| {
            tracing::warn!("No room found with this Id: {}", id);
            AppError::NotFound("Room not found".to_string())
        })?;

    let room = validate_room_edit(&mut rooms, pos, payload)?;
    store.save_rooms(&rooms).await?;

    Ok(Json(room))
}

/// Deletes one of the owner's rooms, cascading through its reservations.
pub async fn delete_room(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    if !rooms.iter().any(|r| {
        r.id == id
            && houses
                .iter()
                .any(|h| h.id == r.house_id && h.owner_id == owner_id)
    }) {
        tracing::warn!("No room found with this Id: {}", id);
        return Err(AppError::NotFound("Room not found".to_string()));
    }

    let reservations = store.load_reservations().await?;
    let Some((rooms, reservations)) = cascade::remove_room(rooms, reservations, id) else {
        return Err(AppError::NotFound("Room not found".to_string()));
    };

    store.save_reservations(&reservations).await?;
    store.save_rooms(&rooms).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists every reservation placed on the owner's rooms.
pub async fn list_reservations(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;
    let reservations = store.load_reservations().await?;

    let mine: Vec<_> = reservations
        .into_iter()
        .filter(|res| {
            rooms.iter().any(|r| {
                r.id == res.room_id
                    && houses
                        .iter()
                        .any(|h| h.id == r.house_id && h.owner_id == owner_id)
            })
        })
        .collect();

    Ok(Json(join_reservations(mine, &rooms, &houses)))
}

/// Removes a reservation placed on one of the owner's rooms.
pub async fn delete_reservation(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;
    let mut reservations = store.load_reservations().await?;

    let pos = reservations
        .iter()
        .position(|res| {
            res.id == id
                && rooms.iter().any(|r| {
                    r.id == res.room_id
                        && houses
                            .iter()
                            .any(|h| h.id == r.house_id && h.owner_id == owner_id)
                })
        })
        .ok_or_else(|| {
            tracing::warn!("No reservation found with this Id: {}", id);
            AppError::NotFound("Reservation not found".to_string())
        })?;

    reservations.remove(pos);
    store.save_reservations(&reservations).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Dashboard counters for the connected owner.
pub async fn stats(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let owner_id = claims.user_id();
    let houses = store.load_houses().await?;
    let rooms = store.load_rooms().await?;

    let my_house_ids: Vec<i64> = houses
        .iter()
        .filter(|h| h.owner_id == owner_id)
        .map(|h| h.id)
        .collect();
    let my_rooms = rooms
        .iter()
        .filter(|r| my_house_ids.contains(&r.house_id))
        .count();

    Ok(Json(json!({
        "houses": my_house_ids.len(),
        "rooms": my_rooms,
    })))
}

pub(crate) fn build_house(id: i64, owner_id: i64, payload: HousePayload) -> House {
    House {
        id,
        owner_id,
        house_name: payload.house_name.trim().to_string(),
        house_phone: payload.house_phone.trim().to_string(),
        house_city: payload.house_city.trim().to_string(),
        house_location: payload.house_location.trim().to_string(),
        house_description: clean_html(payload.house_description.trim()),
        house_capacity: payload.house_capacity,
        house_img: payload.house_img,
    }
}

pub(crate) fn build_room(id: i64, house_id: i64, payload: RoomPayload) -> Result<Room, AppError> {
    let room_type = RoomType::parse(payload.room_type.trim())
        .ok_or_else(|| AppError::BadRequest("Please select room type".to_string()))?;
    Ok(Room {
        id,
        house_id,
        room_name: payload.room_name.trim().to_string(),
        room_type,
        room_description: clean_html(payload.room_description.trim()),
        room_price: payload.room_price,
        room_capacity: payload.room_capacity,
        num_beds: payload.num_beds,
        room_services: payload.room_services,
        room_img: payload.room_img,
    })
}

/// Re-validates every field and replaces the room at `pos`, keeping its id
/// and house. Shared with the admin surface.
pub(crate) fn validate_room_edit(
    rooms: &mut [Room],
    pos: usize,
    payload: RoomPayload,
) -> Result<Room, AppError> {
    let errors = validate_room(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let room = build_room(rooms[pos].id, rooms[pos].house_id, payload)?;
    rooms[pos] = room.clone();
    Ok(room)
}

/// Validates the payload and the per-house room cap, then appends the new
/// room. Shared with the admin surface.
pub(crate) fn insert_room(
    rooms: &mut Vec<Room>,
    house_id: i64,
    payload: RoomPayload,
) -> Result<Room, AppError> {
    if rooms.iter().filter(|r| r.house_id == house_id).count() >= MAX_ROOMS_PER_HOUSE {
        return Err(AppError::Conflict(
            "You cannot add more than 5 rooms for this house!".to_string(),
        ));
    }

    let errors = validate_room(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let room = build_room(next_id(rooms), house_id, payload)?;
    rooms.push(room.clone());
    Ok(room)
}
