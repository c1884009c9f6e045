// src/handlers/houses.rs
//
// Public browsing surface: guesthouse listing, detail, rooms and search.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::house::HouseListItem,
    store::DynStore,
};

/// Lists all guesthouses with their current room count.
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

/// Retrieves a single guesthouse by ID.
pub async fn get_house(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    let house = houses.into_iter().find(|h| h.id == id).ok_or_else(|| {
        tracing::warn!("No house found with this Id: {}", id);
        AppError::NotFound("House not found".to_string())
    })?;

    Ok(Json(house))
}

/// Lists the rooms of a guesthouse.
pub async fn list_house_rooms(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    if !houses.iter().any(|h| h.id == id) {
        tracing::warn!("No house found with this Id: {}", id);
        return Err(AppError::NotFound("House not found".to_string()));
    }

    let rooms = store.load_rooms().await?;
    let house_rooms: Vec<_> = rooms.into_iter().filter(|r| r.house_id == id).collect();

    Ok(Json(house_rooms))
}

/// Retrieves a single room by ID.
pub async fn get_room(
    State(store): State<DynStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = store.load_rooms().await?;
    let room = rooms.into_iter().find(|r| r.id == id).ok_or_else(|| {
        tracing::warn!("No room found with this Id: {}", id);
        AppError::NotFound("Room not found".to_string())
    })?;

    Ok(Json(room))
}

/// Query parameters for searching guesthouses.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    /// "name" (default) or "city".
    pub by: Option<String>,
}

/// Case-insensitive substring search over house names or cities.
pub async fn search_houses(
    State(store): State<DynStore>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let houses = store.load_houses().await?;
    let text = params.q.unwrap_or_default().trim().to_lowercase();
    let by_city = params.by.as_deref() == Some("city");

    let result: Vec<_> = houses
        .into_iter()
        .filter(|h| {
            let haystack = if by_city { &h.house_city } else { &h.house_name };
            haystack.to_lowercase().contains(&text)
        })
        .collect();

    Ok(Json(result))
}
