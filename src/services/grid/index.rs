//! Booking index: per-room lookup structures derived from the flat booking list
//! for the current visible window. Rebuilt whenever bookings, rooms or the
//! window change.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::window::VisibleWindow;
use crate::models::booking::{Booking, BookingStatus};
use crate::models::room::Room;

/// Colour family of a span, derived from the booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTone {
    /// Arrived or confirmed
    Occupied,
    /// Inserted, not yet confirmed
    Pending,
    Neutral,
}

impl BookingTone {
    pub fn of(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Arrived | BookingStatus::Confirmed => BookingTone::Occupied,
            BookingStatus::Inserted => BookingTone::Pending,
            BookingStatus::Cancelled | BookingStatus::Departed => BookingTone::Neutral,
        }
    }
}

/// A booking's footprint on one grid row, columns clamped into the window
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub booking: Booking,
    pub start_col: usize,
    pub end_col: usize,
    pub tone: BookingTone,
}

impl Span {
    pub fn is_single_column(&self) -> bool {
        self.start_col == self.end_col
    }

    /// Columns strictly between the two boundary columns
    pub fn interior(&self) -> std::ops::Range<usize> {
        (self.start_col + 1)..self.end_col
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingIndex {
    bookings_by_room: HashMap<String, Vec<Booking>>,
    day_index_by_date: HashMap<NaiveDate, usize>,
    spans: HashMap<String, Vec<Span>>,
    occupied: HashMap<String, BTreeSet<usize>>,
    sorted_starts: HashMap<String, Vec<usize>>,
    sorted_ends: HashMap<String, Vec<usize>>,
}

impl BookingIndex {
    pub fn build(rooms: &[Room], bookings: &[Booking], window: &VisibleWindow) -> Self {
        let mut index = Self {
            day_index_by_date: window
                .dates()
                .iter()
                .enumerate()
                .map(|(column, date)| (*date, column))
                .collect(),
            ..Self::default()
        };

        for room in rooms {
            index.bookings_by_room.entry(room.room_number.clone()).or_default();
            index.spans.entry(room.room_number.clone()).or_default();
        }

        for booking in bookings {
            if booking.room_number.is_empty() {
                continue;
            }
            index
                .bookings_by_room
                .entry(booking.room_number.clone())
                .or_default()
                .push(booking.clone());

            if let Some(span) = Self::span_for(booking, window) {
                index
                    .spans
                    .entry(booking.room_number.clone())
                    .or_default()
                    .push(span);
            }
        }

        for (room_number, spans) in index.spans.iter_mut() {
            // stable: bookings sharing a start column keep their list order
            spans.sort_by_key(|span| span.start_col);

            let occupied = index.occupied.entry(room_number.clone()).or_default();
            let mut starts = Vec::with_capacity(spans.len());
            let mut ends = Vec::with_capacity(spans.len());
            for span in spans.iter() {
                occupied.extend(span.interior());
                starts.push(span.start_col);
                ends.push(span.end_col);
            }
            starts.sort_unstable();
            starts.dedup();
            ends.sort_unstable();
            ends.dedup();
            index.sorted_starts.insert(room_number.clone(), starts);
            index.sorted_ends.insert(room_number.clone(), ends);
        }

        index
    }

    fn span_for(booking: &Booking, window: &VisibleWindow) -> Option<Span> {
        let check_in = booking.check_in_date;
        let check_out = booking.check_out_date;
        if check_out < window.first() || check_in > window.last() {
            return None;
        }

        let start_col = window.clamp_to_window(check_in);
        let mut end_col = window.clamp_to_window(check_out);
        if end_col < start_col {
            log::warn!(
                "Booking {} checks out ({}) before it checks in ({}); collapsing span",
                booking.id,
                check_out,
                check_in
            );
            end_col = start_col;
        }

        Some(Span {
            booking: booking.clone(),
            start_col,
            end_col,
            tone: BookingTone::of(booking.status),
        })
    }

    pub fn spans(&self, room_number: &str) -> &[Span] {
        self.spans.get(room_number).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bookings_for_room(&self, room_number: &str) -> &[Booking] {
        self.bookings_by_room
            .get(room_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        self.day_index_by_date.get(&date).copied()
    }

    pub fn sorted_starts(&self, room_number: &str) -> &[usize] {
        self.sorted_starts
            .get(room_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn sorted_ends(&self, room_number: &str) -> &[usize] {
        self.sorted_ends
            .get(room_number)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn occupied_columns(&self, room_number: &str) -> Option<&BTreeSet<usize>> {
        self.occupied.get(room_number)
    }

    /// Column lies strictly inside some stay of the room
    pub fn is_occupied(&self, room_number: &str, column: usize) -> bool {
        self.occupied
            .get(room_number)
            .is_some_and(|columns| columns.contains(&column))
    }

    pub fn starts_at(&self, room_number: &str, column: usize) -> bool {
        self.sorted_starts(room_number).binary_search(&column).is_ok()
    }

    pub fn ends_at(&self, room_number: &str, column: usize) -> bool {
        self.sorted_ends(room_number).binary_search(&column).is_ok()
    }

    /// A drag-selection may start on a free cell or on a cell where a stay only ends
    pub fn can_begin_selection(&self, room_number: &str, column: usize) -> bool {
        !self.is_occupied(room_number, column) && !self.starts_at(room_number, column)
    }

    /// A selection may reach free cells and boundary cells that are not back-to-back
    pub fn can_extend_selection(&self, room_number: &str, column: usize) -> bool {
        !self.is_occupied(room_number, column)
            && !(self.starts_at(room_number, column) && self.ends_at(room_number, column))
    }

    /// Clamp a selection end so it never crosses a stay boundary.
    ///
    /// Forward drags stop at the first stay starting at or after `start`;
    /// backward drags stop at the last stay ending at or before `start`.
    pub fn clamp_selection_index(&self, room_number: &str, start: usize, target: usize) -> usize {
        if target == start {
            return target;
        }

        if target > start {
            let starts = self.sorted_starts(room_number);
            let next_start = starts.iter().copied().find(|&column| column >= start);
            return match next_start {
                Some(limit) if target > limit => limit,
                _ => target,
            };
        }

        let ends = self.sorted_ends(room_number);
        let previous_end = ends.iter().rev().copied().find(|&column| column <= start);
        match previous_end {
            Some(limit) if target < limit => limit,
            _ => target,
        }
    }

    /// Locate a booking's span by id
    pub fn find_span(&self, booking_id: i64) -> Option<&Span> {
        self.spans
            .values()
            .flat_map(|spans| spans.iter())
            .find(|span| span.booking.id == booking_id)
    }
}
