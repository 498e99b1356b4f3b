use std::panic;
use std::thread;

use super::api::BookingApi;
use super::error::{ApiError, MoveError};
use super::resolver::{resolve_move, MovePlan};
use crate::models::booking::{Booking, BookingPatch};
use crate::models::room::Room;

/// Rooms and bookings as last fetched from the API
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingSnapshot {
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
}

/// Loads and commits through a [`BookingApi`], fanning independent requests
/// out on scoped threads.
pub struct BookingService<'a> {
    api: &'a dyn BookingApi,
}

impl<'a> BookingService<'a> {
    /// Borrow `api` for the duration of a load or commit
    pub fn new(api: &'a dyn BookingApi) -> Self {
        Self { api }
    }

    /// Fetch rooms and bookings concurrently
    pub fn load(&self) -> Result<BookingSnapshot, ApiError> {
        let (rooms, bookings) = thread::scope(|scope| {
            let rooms = scope.spawn(|| self.api.fetch_rooms());
            let bookings = self.api.fetch_bookings();
            (join(rooms), bookings)
        });

        let snapshot = BookingSnapshot {
            rooms: rooms?,
            bookings: bookings?,
        };
        log::info!(
            "Loaded {} rooms and {} bookings",
            snapshot.rooms.len(),
            snapshot.bookings.len()
        );
        Ok(snapshot)
    }

    /// Resolve and commit a drop of `booking` on `target_room`.
    ///
    /// Returns the bookings as updated by the server; empty when nothing changed.
    pub fn move_booking(
        &self,
        bookings: &[Booking],
        booking: &Booking,
        target_room: &str,
    ) -> Result<Vec<Booking>, MoveError> {
        let plan = resolve_move(bookings, booking, target_room).map_err(|err| {
            log::warn!(
                "Rejected move of booking {} to room {}: {}",
                booking.id,
                target_room,
                err
            );
            err
        })?;
        self.commit(&plan)
    }

    /// Issue the requests of an already resolved plan
    pub fn commit(&self, plan: &MovePlan) -> Result<Vec<Booking>, MoveError> {
        match plan {
            MovePlan::Unchanged => Ok(Vec::new()),
            MovePlan::Plain {
                booking,
                target_room,
            } => {
                let updated = self
                    .api
                    .update_booking(booking.id, &BookingPatch::room(target_room.as_str()))
                    .map_err(|err| {
                        log::error!("Failed to move booking {}: {}", booking.id, err);
                        err
                    })?;
                log::info!(
                    "Moved booking {} from room {} to room {}",
                    booking.id,
                    booking.room_number,
                    target_room
                );
                Ok(vec![updated])
            }
            MovePlan::Swap {
                booking,
                swap,
                target_room,
                origin_room,
            } => {
                let (first, second) = thread::scope(|scope| {
                    let first = scope.spawn(|| {
                        self.api
                            .update_booking(booking.id, &BookingPatch::room(target_room.as_str()))
                    });
                    let second = self
                        .api
                        .update_booking(swap.id, &BookingPatch::room(origin_room.as_str()));
                    (join(first), second)
                });

                let mut committed = Vec::new();
                let mut failures = Vec::new();
                for result in [first, second] {
                    match result {
                        Ok(updated) => committed.push(updated),
                        Err(err) => failures.push(err),
                    }
                }

                if !failures.is_empty() {
                    log::error!(
                        "Swap of bookings {} and {} failed ({} of 2 legs committed)",
                        booking.id,
                        swap.id,
                        committed.len()
                    );
                    return Err(MoveError::SwapIncomplete {
                        committed,
                        failures,
                    });
                }

                log::info!(
                    "Swapped booking {} ({} -> {}) with booking {} ({} -> {})",
                    booking.id,
                    origin_room,
                    target_room,
                    swap.id,
                    target_room,
                    origin_room
                );
                Ok(committed)
            }
        }
    }
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| panic::resume_unwind(payload))
}

/// Replace bookings by id with their updated versions; others are left as they are.
pub fn merge_updates(bookings: &mut [Booking], updated: &[Booking]) {
    for booking in bookings.iter_mut() {
        if let Some(fresh) = updated.iter().find(|u| u.id == booking.id) {
            *booking = fresh.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::booking::api::MockBookingApi;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn moved(booking: &Booking, patch: &BookingPatch) -> Booking {
        let mut updated = booking.clone();
        patch.apply_to(&mut updated);
        updated
    }

    #[test]
    fn test_load_returns_both_lists() {
        let mut api = MockBookingApi::new();
        api.expect_fetch_rooms()
            .times(1)
            .returning(|| Ok(vec![Room::new(1, "101", "Double")]));
        api.expect_fetch_bookings()
            .times(1)
            .returning(|| Ok(vec![Booking::new(1, "101", date(1), date(3))]));

        let snapshot = BookingService::new(&api).load().unwrap();
        assert_eq!(snapshot.rooms.len(), 1);
        assert_eq!(snapshot.bookings.len(), 1);
    }

    #[test]
    fn test_load_fails_when_either_request_fails() {
        let mut api = MockBookingApi::new();
        api.expect_fetch_rooms().returning(|| Ok(Vec::new()));
        api.expect_fetch_bookings().returning(|| {
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        });

        let err = BookingService::new(&api).load().unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn test_plain_move_issues_one_update() {
        let x = Booking::new(1, "A", date(1), date(5));
        let bookings = vec![x.clone()];
        let original = x.clone();

        let mut api = MockBookingApi::new();
        api.expect_update_booking()
            .withf(|id, patch| *id == 1 && patch.room_number.as_deref() == Some("B"))
            .times(1)
            .returning(move |_, patch| Ok(moved(&original, patch)));

        let updated = BookingService::new(&api).move_booking(&bookings, &x, "B").unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].room_number, "B");
    }

    #[test]
    fn test_conflict_issues_no_update() {
        let x = Booking::new(1, "A", date(1), date(5));
        let bookings = vec![
            x.clone(),
            Booking::new(2, "B", date(1), date(3)),
            Booking::new(3, "B", date(2), date(4)),
        ];

        let mut api = MockBookingApi::new();
        api.expect_update_booking().times(0);

        let err = BookingService::new(&api).move_booking(&bookings, &x, "B").unwrap_err();
        assert!(matches!(err, MoveError::Conflict(_)));
        assert!(!err.needs_reload());
    }

    #[test]
    fn test_swap_partial_failure_is_reported() {
        let x = Booking::new(1, "A", date(1), date(5));
        let y = Booking::new(2, "B", date(2), date(6));
        let bookings = vec![x.clone(), y.clone()];

        let mut api = MockBookingApi::new();
        api.expect_update_booking()
            .times(2)
            .returning(move |id, patch| {
                if id == 1 {
                    Ok(moved(&x, patch))
                } else {
                    Err(ApiError::Status {
                        status: 409,
                        message: "locked".to_string(),
                    })
                }
            });

        let err = BookingService::new(&api)
            .move_booking(&bookings, &bookings[0], "B")
            .unwrap_err();
        match &err {
            MoveError::SwapIncomplete {
                committed,
                failures,
            } => {
                assert_eq!(committed.len(), 1);
                assert_eq!(committed[0].id, 1);
                assert_eq!(failures.len(), 1);
            }
            other => panic!("expected incomplete swap, got {:?}", other),
        }
        assert!(err.needs_reload());
    }

    #[test]
    fn test_merge_updates_replaces_by_id() {
        let mut bookings = vec![
            Booking::new(1, "A", date(1), date(5)),
            Booking::new(2, "B", date(2), date(6)),
        ];
        let updated = vec![Booking::new(2, "C", date(2), date(6))];
        merge_updates(&mut bookings, &updated);
        assert_eq!(bookings[0].room_number, "A");
        assert_eq!(bookings[1].room_number, "C");
    }
}
