// src/availability.rs
//
// Date-range availability for rooms. Reservations use half-open intervals:
// a stay occupies [checkin, checkout), so a new stay may start on the day an
// existing one checks out.

use chrono::NaiveDate;

use crate::models::reservation::Reservation;

/// True when no existing reservation for the room overlaps the candidate
/// interval. A room with no reservations is always available.
///
/// This is a pure scan; the caller writes the reservation afterwards, so the
/// check and the insert are not atomic (single-writer assumption).
pub fn is_room_available(
    reservations: &[Reservation],
    room_id: i64,
    checkin: NaiveDate,
    checkout: NaiveDate,
) -> bool {
    !reservations.iter().any(|res| {
        res.room_id == room_id
            && checkin < res.checkout_booking
            && checkout > res.checkin_booking
    })
}

/// Number of nights between checkin and checkout.
pub fn nights(checkin: NaiveDate, checkout: NaiveDate) -> i64 {
    (checkout - checkin).num_days()
}

/// totalPrice = numGuests x roomPrice x nights.
pub fn total_price(num_guests: u32, room_price: u32, nights: i64) -> i64 {
    num_guests as i64 * room_price as i64 * nights
}
