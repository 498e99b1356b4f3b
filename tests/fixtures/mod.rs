// Test fixtures - reusable test data
// Rooms and June 2024 stays shared by the integration tests

#![allow(dead_code)]

use booking_grid::models::booking::{Booking, BookingStatus};
use booking_grid::models::room::Room;
use booking_grid::services::grid::VisibleWindow;
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// June 2024: column 0 is June 1st, column 29 June 30th
pub fn june() -> VisibleWindow {
    VisibleWindow::month(date(2024, 6, 1))
}

pub fn rooms() -> Vec<Room> {
    vec![
        Room::new(1, "101", "Double"),
        Room::new(2, "102", "Double"),
        Room::new(3, "103", "Suite"),
    ]
}

/// A confirmed stay in June 2024
pub fn stay(id: i64, room: &str, check_in_day: u32, check_out_day: u32) -> Booking {
    Booking::new(id, room, date(2024, 6, check_in_day), date(2024, 6, check_out_day))
        .with_status(BookingStatus::Confirmed)
        .with_guest(format!("Guest Number{}", id))
        .with_party(2, 0, 0)
}

/// X in 101 (06-01 -> 06-05), Y in 102 (06-02 -> 06-06)
pub fn swap_pair() -> Vec<Booking> {
    vec![stay(1, "101", 1, 5), stay(2, "102", 2, 6)]
}
