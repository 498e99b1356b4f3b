// Room status board
// Occupancy of each room on a single reference date

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::booking::{Booking, BookingStatus};
use crate::models::room::Room;
use crate::utils::date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    #[default]
    Free,
    Reserved,
    Occupied,
}

impl RoomStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RoomStatus::Free => "Free",
            RoomStatus::Reserved => "Reserved",
            RoomStatus::Occupied => "Occupied",
        }
    }
}

/// Status of every room that has a stay covering `on` (check-out day included).
///
/// Rooms missing from the map are free.
pub fn room_status_map(bookings: &[Booking], on: NaiveDate) -> HashMap<String, RoomStatus> {
    let mut map = HashMap::new();
    for booking in bookings.iter().filter(|b| b.covers(on)) {
        match booking.status {
            BookingStatus::Arrived | BookingStatus::Confirmed => {
                map.insert(booking.room_number.clone(), RoomStatus::Occupied);
            }
            BookingStatus::Inserted => {
                map.entry(booking.room_number.clone())
                    .or_insert(RoomStatus::Reserved);
            }
            BookingStatus::Cancelled | BookingStatus::Departed => {}
        }
    }
    map
}

pub fn room_status(bookings: &[Booking], room_number: &str, on: NaiveDate) -> RoomStatus {
    room_status_map(bookings, on)
        .get(room_number)
        .copied()
        .unwrap_or_default()
}

/// The booking representing each room on `on`: arrived beats confirmed beats inserted.
pub fn active_booking_map(bookings: &[Booking], on: NaiveDate) -> HashMap<String, Booking> {
    let mut map: HashMap<String, Booking> = HashMap::new();
    for booking in bookings
        .iter()
        .filter(|b| b.status.holds_room() && b.covers(on))
    {
        let replace = map
            .get(&booking.room_number)
            .map_or(true, |current| booking.status.priority() > current.status.priority());
        if replace {
            map.insert(booking.room_number.clone(), booking.clone());
        }
    }
    map
}

/// Status of each room in `rooms`, in the same order
pub fn status_board(rooms: &[Room], bookings: &[Booking], on: NaiveDate) -> Vec<(Room, RoomStatus)> {
    let statuses = room_status_map(bookings, on);
    rooms
        .iter()
        .map(|room| {
            let status = statuses.get(&room.room_number).copied().unwrap_or_default();
            (room.clone(), status)
        })
        .collect()
}

/// First date on or after `from` that no live stay in the room covers
pub fn first_available_date(bookings: &[Booking], room_number: &str, from: NaiveDate) -> NaiveDate {
    let mut stays: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.room_number == room_number && b.status.holds_room())
        .collect();
    stays.sort_by_key(|b| b.check_in_date);

    let mut current = from;
    for stay in stays {
        if stay.check_out_date < current {
            continue;
        }
        if stay.covers(current) {
            current = date::add_days(stay.check_out_date, 1);
            continue;
        }
        if stay.check_in_date > current {
            break;
        }
    }
    current
}
