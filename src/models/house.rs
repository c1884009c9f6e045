// src/models/house.rs

use serde::{Deserialize, Serialize};

/// A stored guesthouse record. Field names follow the persisted camelCase
/// layout of the collection store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: i64,
    /// References a user with the owner role.
    pub owner_id: i64,
    pub house_name: String,
    pub house_phone: String,
    pub house_city: String,
    pub house_location: String,
    pub house_description: String,
    /// Total guest capacity, 1 to 100.
    pub house_capacity: u32,
    /// Embedded image as a data URI.
    pub house_img: String,
}

/// Writable house fields, shared by create and edit. Edits replace the whole
/// record after re-validating every field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePayload {
    pub house_name: String,
    pub house_phone: String,
    pub house_city: String,
    pub house_location: String,
    pub house_description: String,
    pub house_capacity: u32,
    pub house_img: String,
}

/// DTO for an admin creating a house on behalf of an owner.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminHouseRequest {
    pub owner_id: i64,
    #[serde(flatten)]
    pub house: HousePayload,
}

/// House plus its current number of rooms, for the public listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseListItem {
    #[serde(flatten)]
    pub house: House,
    pub rooms_count: usize,
}
