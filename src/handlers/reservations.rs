// src/handlers/reservations.rs
//
// Client booking surface: create a reservation, list and cancel own
// reservations.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;

use crate::{
    availability::{is_room_available, nights, total_price},
    error::AppError,
    models::{
        house::House,
        reservation::{BookingRequest, Reservation, ReservationView},
        room::Room,
    },
    store::{DynStore, next_id},
    utils::jwt::Claims,
    validation::{EMAIL_RE, FieldError, NAME_RE, check_field},
};

/// Books a room for the connected client.
///
/// The client's name and email are validated and snapshotted onto the
/// reservation; the email must match the account email. The total price is
/// computed server-side as guests x price x nights. The availability check
/// and the write are two separate store calls, single active writer assumed.
pub async fn create_reservation(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let users = store.load_users().await?;
    let user_id = claims.user_id();
    let user = users.iter().find(|u| u.id == user_id).ok_or_else(|| {
        tracing::warn!("No user found with this Id: {}", user_id);
        AppError::AuthError("User not found".to_string())
    })?;

    let rooms = store.load_rooms().await?;
    let room = rooms.iter().find(|r| r.id == payload.room_id).ok_or_else(|| {
        tracing::warn!("No room found with this Id: {}", payload.room_id);
        AppError::NotFound("Room not found".to_string())
    })?;

    let mut errors = Vec::new();
    check_field(
        &mut errors,
        "firstName",
        &payload.first_name,
        Some(&*NAME_RE),
        "Please enter your first name",
        "Only letters and spaces are allowed",
    );
    check_field(
        &mut errors,
        "lastName",
        &payload.last_name,
        Some(&*NAME_RE),
        "Please enter your last name",
        "Only letters and spaces are allowed",
    );
    let email_ok = check_field(
        &mut errors,
        "email",
        &payload.email,
        Some(&*EMAIL_RE),
        "Please enter your email",
        "Invalid email format",
    );
    if email_ok && payload.email.trim() != user.email {
        errors.push(FieldError::new(
            "email",
            "This email does not match your account email.",
        ));
    }
    if payload.adults == 0 {
        errors.push(FieldError::new("adults", "Please select adult."));
    }

    let today = Local::now().date_naive();
    match (payload.checkin_booking, payload.checkout_booking) {
        (Some(checkin), Some(checkout)) => {
            if checkout <= checkin {
                errors.push(FieldError::new(
                    "checkinBooking",
                    "Check-out must be after check-in.",
                ));
            } else if checkin < today {
                errors.push(FieldError::new(
                    "checkinBooking",
                    "Check-in date cannot be in the past.",
                ));
            }
        }
        _ => errors.push(FieldError::new(
            "checkinBooking",
            "Please enter check-in and check-out dates.",
        )),
    }

    // Saturate so hostile counts fail the capacity check instead of wrapping.
    let num_guests = payload.adults.saturating_add(payload.children);
    if num_guests > room.room_capacity {
        errors.push(FieldError::new(
            "numGuests",
            "Number of guests exceeds room capacity.",
        ));
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let (Some(checkin), Some(checkout)) = (payload.checkin_booking, payload.checkout_booking)
    else {
        return Err(AppError::BadRequest(
            "Please enter check-in and check-out dates.".to_string(),
        ));
    };

    let mut reservations = store.load_reservations().await?;
    if !is_room_available(&reservations, room.id, checkin, checkout) {
        return Err(AppError::Conflict(
            "This room is not available for the selected dates.".to_string(),
        ));
    }

    let stay_nights = nights(checkin, checkout);
    let reservation = Reservation {
        id: next_id(&reservations),
        room_id: room.id,
        client_id: user.id,
        client_fname: payload.first_name.trim().to_string(),
        client_lname: payload.last_name.trim().to_string(),
        client_email: payload.email.trim().to_string(),
        num_guests,
        total_price: total_price(num_guests, room.room_price, stay_nights),
        checkin_booking: checkin,
        checkout_booking: checkout,
    };

    reservations.push(reservation.clone());
    store.save_reservations(&reservations).await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Lists the connected client's reservations, joined with room and house
/// display fields.
pub async fn list_my_reservations(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();
    let reservations = store.load_reservations().await?;
    let rooms = store.load_rooms().await?;
    let houses = store.load_houses().await?;

    let mine: Vec<Reservation> = reservations
        .into_iter()
        .filter(|res| res.client_id == user_id)
        .collect();

    Ok(Json(join_reservations(mine, &rooms, &houses)))
}

/// Cancels one of the connected client's reservations.
pub async fn delete_my_reservation(
    State(store): State<DynStore>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id();
    let mut reservations = store.load_reservations().await?;

    let pos = reservations
        .iter()
        .position(|res| res.id == id && res.client_id == user_id)
        .ok_or_else(|| {
            tracing::warn!("No reservation found with this Id: {}", id);
            AppError::NotFound("Reservation not found".to_string())
        })?;

    reservations.remove(pos);
    store.save_reservations(&reservations).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Joins reservations with their room and house for display. A reservation
/// whose room or house no longer exists indicates stale local state; it is
/// logged and skipped rather than surfaced as an error.
pub(crate) fn join_reservations(
    reservations: Vec<Reservation>,
    rooms: &[Room],
    houses: &[House],
) -> Vec<ReservationView> {
    reservations
        .into_iter()
        .filter_map(|reservation| {
            let Some(room) = rooms.iter().find(|r| r.id == reservation.room_id) else {
                tracing::warn!("No room found with this Id: {}", reservation.room_id);
                return None;
            };
            let Some(house) = houses.iter().find(|h| h.id == room.house_id) else {
                tracing::warn!("No house found with this Id: {}", room.house_id);
                return None;
            };
            Some(ReservationView {
                room_name: room.room_name.clone(),
                house_name: house.house_name.clone(),
                room_price: room.room_price,
                reservation,
            })
        })
        .collect()
}
