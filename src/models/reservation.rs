// src/models/reservation.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored reservation record.
///
/// Client name and email are snapshots taken at booking time and may diverge
/// from the user record later. Dates form a half-open interval: the checkout
/// day is free again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub room_id: i64,
    pub client_id: i64,
    pub client_fname: String,
    pub client_lname: String,
    pub client_email: String,
    pub num_guests: u32,
    /// numGuests x roomPrice x nights, computed server-side.
    pub total_price: i64,
    pub checkin_booking: NaiveDate,
    pub checkout_booking: NaiveDate,
}

/// DTO for a client booking a room.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub checkin_booking: Option<NaiveDate>,
    #[serde(default)]
    pub checkout_booking: Option<NaiveDate>,
    #[serde(default)]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
}

/// Reservation joined with room and house display fields for listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub room_name: String,
    pub house_name: String,
    pub room_price: u32,
}
