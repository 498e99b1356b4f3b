// Property-based tests for the grid index, selection clamp and move resolver
// Random stays around June 2024 across three rooms

mod fixtures;

use booking_grid::models::booking::{Booking, BookingStatus};
use booking_grid::services::booking::{find_overlaps, resolve_move};
use booking_grid::services::grid::{BookingIndex, RowLayout, SelectionMachine, VisibleWindow};
use booking_grid::utils::date;
use chrono::{Duration, NaiveDate};
use fixtures::rooms;
use proptest::prelude::*;

const ROOMS: [&str; 3] = ["101", "102", "103"];

fn base() -> NaiveDate {
    fixtures::date(2024, 5, 20)
}

fn status() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Inserted),
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::Arrived),
        Just(BookingStatus::Cancelled),
        Just(BookingStatus::Departed),
    ]
}

/// (room, check-in offset from May 20th, nights, status)
fn stays() -> impl Strategy<Value = Vec<Booking>> {
    prop::collection::vec((0usize..3, 0i64..50, 0i64..9, status()), 0..24).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (room, offset, nights, status))| {
                let check_in = base() + Duration::days(offset);
                Booking::new(i as i64 + 1, ROOMS[room], check_in, check_in + Duration::days(nights))
                    .with_status(status)
            })
            .collect()
    })
}

/// Drop every stay that overlaps an earlier one in the same room
fn without_overlaps(bookings: Vec<Booking>) -> Vec<Booking> {
    let mut kept: Vec<Booking> = Vec::new();
    for booking in bookings {
        let clash = kept
            .iter()
            .any(|other| other.room_number == booking.room_number && other.overlaps(&booking));
        if !clash {
            kept.push(booking);
        }
    }
    kept
}

proptest! {
    #[test]
    fn prop_column_round_trip(
        year in 2020..2030i32,
        month in 1..=12u32,
        days in prop::option::of(1usize..62),
        offset in 0usize..62,
    ) {
        let window = VisibleWindow::from_anchor(fixtures::date(year, month, 1), days);
        let offset = offset % window.len();
        let day = date::add_days(window.first(), offset as i64);

        let column = window.column_index(day);
        prop_assert_eq!(column, Some(offset));
        prop_assert_eq!(window.date_at(offset), Some(day));
        prop_assert_eq!(window.clamp_to_window(day), offset);
    }

    #[test]
    fn prop_selection_clamp_is_idempotent(
        bookings in stays(),
        start in 0usize..30,
        target in 0usize..30,
    ) {
        let window = fixtures::june();
        let index = BookingIndex::build(&rooms(), &bookings, &window);
        prop_assume!(index.can_begin_selection("101", start));

        let mut machine = SelectionMachine::new();
        machine.begin("101", start);
        machine.update("101", target, &index);
        let first = machine.current().cloned();

        prop_assert!(!machine.update("101", target, &index));
        prop_assert_eq!(machine.current().cloned(), first.clone());

        let end = first.map(|s| s.end_index).unwrap_or(start);
        prop_assert_eq!(index.clamp_selection_index("101", start, end), end);
    }

    #[test]
    fn prop_row_layout_covers_every_column(bookings in stays()) {
        let window = fixtures::june();
        let index = BookingIndex::build(&rooms(), &bookings, &window);

        for room in ROOMS {
            let row = RowLayout::build(room, &index, &window);
            prop_assert_eq!(row.covered_columns(), window.len());
            for column in 0..window.len() {
                prop_assert!(row.cell_at(column).is_some());
            }
        }
    }

    #[test]
    fn prop_resolved_moves_never_double_book(
        bookings in stays(),
        moves in prop::collection::vec((0usize..24, 0usize..3), 1..12),
    ) {
        let mut bookings = without_overlaps(bookings);
        prop_assume!(!bookings.is_empty());
        prop_assert!(find_overlaps(&bookings).is_empty());

        for (pick, room) in moves {
            let booking = bookings[pick % bookings.len()].clone();
            if let Ok(plan) = resolve_move(&bookings, &booking, ROOMS[room]) {
                plan.apply_to(&mut bookings);
            }
            prop_assert!(find_overlaps(&bookings).is_empty());
        }
    }
}
