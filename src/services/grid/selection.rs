//! Drag-selection of free cells on one room row.
//!
//! `idle -> selecting -> idle`. The selection end is clamped against the
//! booking index so a new range can touch, but never cross, an existing stay.

use chrono::NaiveDate;

use super::index::BookingIndex;
use super::window::VisibleWindow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub room_number: String,
    pub start_index: usize,
    pub end_index: usize,
}

impl Selection {
    /// `(min, max)` of the two indices
    pub fn normalized(&self) -> (usize, usize) {
        (
            self.start_index.min(self.end_index),
            self.start_index.max(self.end_index),
        )
    }

    pub fn contains(&self, room_number: &str, column: usize) -> bool {
        let (low, high) = self.normalized();
        self.room_number == room_number && column >= low && column <= high
    }
}

/// A completed selection translated back to calendar dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSelection {
    pub room_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    current: Option<Selection>,
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selecting(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Enter `selecting`. Callers must check that no booking drag is active.
    pub fn begin(&mut self, room_number: &str, index: usize) {
        let selection = Selection {
            room_number: room_number.to_string(),
            start_index: index,
            end_index: index,
        };
        log::debug!("begin selection {:?}", selection);
        self.current = Some(selection);
    }

    /// Move the selection end; returns true when the state changed.
    ///
    /// No-op outside `selecting` or for a different room.
    pub fn update(&mut self, room_number: &str, index: usize, bookings: &BookingIndex) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        if current.room_number != room_number {
            return false;
        }

        let clamped = bookings.clamp_selection_index(room_number, current.start_index, index);
        if current.end_index == clamped {
            return false;
        }
        current.end_index = clamped;
        log::debug!("update selection {:?}", current);
        true
    }

    /// Return to `idle`; yields the date range when it spans at least two dates.
    pub fn end(&mut self, window: &VisibleWindow) -> Option<RangeSelection> {
        let selection = self.current.take()?;
        let (low, high) = selection.normalized();
        let start_date = window.date_at(low)?;
        let end_date = window.date_at(high)?;

        if start_date == end_date {
            log::debug!("selection on {} collapsed to a single day", selection.room_number);
            return None;
        }

        log::debug!(
            "end selection room={} {}..{}",
            selection.room_number,
            start_date,
            end_date
        );
        Some(RangeSelection {
            room_number: selection.room_number,
            start_date,
            end_date,
        })
    }

    /// Re-check the selection against a rebuilt index.
    ///
    /// Ends it when a stay now covers the start cell, otherwise clamps the end
    /// at the nearest stay boundary.
    pub fn revalidate(&mut self, bookings: &BookingIndex) {
        let Some(current) = self.current.as_mut() else {
            return;
        };
        if !bookings.can_begin_selection(&current.room_number, current.start_index) {
            log::debug!("selection start {:?} is now occupied; dropping it", current);
            self.current = None;
            return;
        }

        let clamped = bookings.clamp_selection_index(&current.room_number, current.start_index, current.end_index);
        if clamped != current.end_index {
            current.end_index = clamped;
            log::debug!("selection clamped after refresh {:?}", current);
        }
    }

    /// Drop the selection without emitting a range
    pub fn cancel(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::Booking;
    use crate::models::room::Room;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> (VisibleWindow, BookingIndex) {
        let window = VisibleWindow::month(date(2024, 6, 1));
        let rooms = vec![Room::new(1, "A", "Double"), Room::new(2, "B", "Double")];
        // columns 5..=8
        let bookings = vec![Booking::new(1, "A", date(2024, 6, 6), date(2024, 6, 9))];
        let index = BookingIndex::build(&rooms, &bookings, &window);
        (window, index)
    }

    #[test]
    fn test_update_is_noop_when_idle() {
        let (_, index) = fixture();
        let mut machine = SelectionMachine::new();
        assert!(!machine.update("A", 3, &index));
        assert!(machine.current().is_none());
    }

    #[test]
    fn test_update_ignores_other_rooms() {
        let (_, index) = fixture();
        let mut machine = SelectionMachine::new();
        machine.begin("A", 1);
        assert!(!machine.update("B", 3, &index));
        assert_eq!(machine.current().unwrap().end_index, 1);
    }

    #[test]
    fn test_forward_drag_clamps_to_booking_start() {
        let (window, index) = fixture();
        let mut machine = SelectionMachine::new();
        machine.begin("A", 2);
        machine.update("A", 10, &index);
        assert_eq!(machine.current().unwrap().end_index, 5);

        let range = machine.end(&window).unwrap();
        assert_eq!(range.room_number, "A");
        assert_eq!(range.start_date, date(2024, 6, 3));
        assert_eq!(range.end_date, date(2024, 6, 6));
        assert!(!machine.is_selecting());
    }

    #[test]
    fn test_backward_drag_is_normalized() {
        let (window, index) = fixture();
        let mut machine = SelectionMachine::new();
        machine.begin("A", 14);
        machine.update("A", 1, &index);
        assert_eq!(machine.current().unwrap().end_index, 8);

        let range = machine.end(&window).unwrap();
        assert_eq!(range.start_date, date(2024, 6, 9));
        assert_eq!(range.end_date, date(2024, 6, 15));
    }

    #[test]
    fn test_single_cell_is_not_a_range() {
        let (window, index) = fixture();
        let mut machine = SelectionMachine::new();
        machine.begin("B", 3);
        assert!(!machine.update("B", 3, &index));
        assert_eq!(machine.end(&window), None);
        assert!(!machine.is_selecting());
    }

    #[test]
    fn test_end_when_idle() {
        let (window, _) = fixture();
        let mut machine = SelectionMachine::new();
        assert_eq!(machine.end(&window), None);
    }

    #[test]
    fn test_contains() {
        let selection = Selection {
            room_number: "A".to_string(),
            start_index: 7,
            end_index: 3,
        };
        assert!(selection.contains("A", 3));
        assert!(selection.contains("A", 7));
        assert!(!selection.contains("A", 8));
        assert!(!selection.contains("B", 5));
    }
}
