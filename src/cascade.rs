// src/cascade.rs
//
// Cascade deletion as pure transaction functions: each one takes the current
// state of the affected collections and returns their new state in a single
// step, so the logic is testable without a store. Callers persist every
// returned collection; the store itself offers no cross-collection rollback.

use crate::models::{house::House, reservation::Reservation, room::Room, user::User};
use crate::models::user::Role;

/// Removes a room and every reservation that references it.
/// Returns `None` when the room does not exist.
pub fn remove_room(
    mut rooms: Vec<Room>,
    mut reservations: Vec<Reservation>,
    room_id: i64,
) -> Option<(Vec<Room>, Vec<Reservation>)> {
    let pos = rooms.iter().position(|r| r.id == room_id)?;
    rooms.remove(pos);
    reservations.retain(|res| res.room_id != room_id);
    Some((rooms, reservations))
}

/// Removes a house, all its rooms, and every reservation on those rooms.
pub fn remove_house(
    mut houses: Vec<House>,
    mut rooms: Vec<Room>,
    mut reservations: Vec<Reservation>,
    house_id: i64,
) -> Option<(Vec<House>, Vec<Room>, Vec<Reservation>)> {
    let pos = houses.iter().position(|h| h.id == house_id)?;
    houses.remove(pos);

    let removed_room_ids: Vec<i64> = rooms
        .iter()
        .filter(|r| r.house_id == house_id)
        .map(|r| r.id)
        .collect();
    rooms.retain(|r| r.house_id != house_id);
    reservations.retain(|res| !removed_room_ids.contains(&res.room_id));

    Some((houses, rooms, reservations))
}

/// Removes a user together with everything that references them:
/// an owner's houses cascade through rooms and reservations, a client's
/// reservations are dropped directly, an admin owns nothing.
pub fn remove_user(
    mut users: Vec<User>,
    mut houses: Vec<House>,
    mut rooms: Vec<Room>,
    mut reservations: Vec<Reservation>,
    user_id: i64,
) -> Option<(Vec<User>, Vec<House>, Vec<Room>, Vec<Reservation>)> {
    let pos = users.iter().position(|u| u.id == user_id)?;
    let user = users.remove(pos);

    match user.role {
        Role::Owner => {
            let owned_house_ids: Vec<i64> = houses
                .iter()
                .filter(|h| h.owner_id == user_id)
                .map(|h| h.id)
                .collect();
            let related_room_ids: Vec<i64> = rooms
                .iter()
                .filter(|r| owned_house_ids.contains(&r.house_id))
                .map(|r| r.id)
                .collect();
            reservations.retain(|res| !related_room_ids.contains(&res.room_id));
            rooms.retain(|r| !owned_house_ids.contains(&r.house_id));
            houses.retain(|h| h.owner_id != user_id);
        }
        Role::Client => {
            reservations.retain(|res| res.client_id != user_id);
        }
        Role::Admin => {}
    }

    Some((users, houses, rooms, reservations))
}
