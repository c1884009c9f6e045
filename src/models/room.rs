// src/models/room.rs

use serde::{Deserialize, Serialize};

/// Room categories offered by guesthouses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Suit,
    Family,
}

impl RoomType {
    /// Parses the select-box value; `None` for anything outside the fixed set.
    pub fn parse(value: &str) -> Option<RoomType> {
        match value {
            "Single" => Some(RoomType::Single),
            "Double" => Some(RoomType::Double),
            "Suit" => Some(RoomType::Suit),
            "Family" => Some(RoomType::Family),
            _ => None,
        }
    }
}

/// A stored room record. At most 5 rooms may exist per house.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub house_id: i64,
    pub room_name: String,
    pub room_type: RoomType,
    pub room_description: String,
    /// Nightly price, 100 to 1000 TND.
    pub room_price: u32,
    /// Guest capacity, 1 to 5.
    pub room_capacity: u32,
    /// Number of beds, 1 to 5.
    pub num_beds: u32,
    /// Subset of the fixed service vocabulary.
    pub room_services: Vec<String>,
    /// Embedded image as a data URI.
    pub room_img: String,
}

/// Room joined with its house name for dashboard listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListItem {
    #[serde(flatten)]
    pub room: Room,
    pub house_name: String,
}

/// Writable room fields, shared by create and edit. The room type arrives as
/// the raw select value so an invalid choice gets a field message instead of
/// a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    pub room_name: String,
    pub room_type: String,
    pub room_description: String,
    pub room_price: u32,
    pub room_capacity: u32,
    pub num_beds: u32,
    #[serde(default)]
    pub room_services: Vec<String>,
    pub room_img: String,
}
