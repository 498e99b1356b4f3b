//! Move/swap resolution for dropping a booking on another room.
//!
//! Pure: works on a snapshot of the booking list and returns a plan. Nothing
//! is sent to the API until the plan is committed by the booking service.

use crate::models::booking::{Booking, BookingPatch};

use super::error::ConflictError;

/// What committing a drop requires
#[derive(Debug, Clone, PartialEq)]
pub enum MovePlan {
    /// The booking is already in the target room
    Unchanged,
    /// Reassign one booking
    Plain {
        booking: Booking,
        target_room: String,
    },
    /// Exchange rooms with the single overlapping booking in the target room
    Swap {
        booking: Booking,
        swap: Booking,
        target_room: String,
        origin_room: String,
    },
}

impl MovePlan {
    /// `PUT` requests needed to commit the plan
    pub fn updates(&self) -> Vec<(i64, BookingPatch)> {
        match self {
            MovePlan::Unchanged => Vec::new(),
            MovePlan::Plain {
                booking,
                target_room,
            } => vec![(booking.id, BookingPatch::room(target_room.as_str()))],
            MovePlan::Swap {
                booking,
                swap,
                target_room,
                origin_room,
            } => vec![
                (booking.id, BookingPatch::room(target_room.as_str())),
                (swap.id, BookingPatch::room(origin_room.as_str())),
            ],
        }
    }

    /// Apply the plan to a local copy of the list, as the server would
    pub fn apply_to(&self, bookings: &mut [Booking]) {
        for (id, patch) in self.updates() {
            if let Some(booking) = bookings.iter_mut().find(|b| b.id == id) {
                patch.apply_to(booking);
            }
        }
    }
}

/// Bookings in `room` whose stay overlaps `candidate`'s, skipping `exclude`
pub fn overlapping<'a>(
    bookings: &'a [Booking],
    candidate: &Booking,
    room: &str,
    exclude: &[i64],
) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|other| other.room_number == room)
        .filter(|other| !exclude.contains(&other.id))
        .filter(|other| candidate.overlaps(other))
        .collect()
}

/// Would placing `candidate` in `room` overlap anything not excluded?
pub fn has_conflict(bookings: &[Booking], candidate: &Booking, room: &str, exclude: &[i64]) -> bool {
    !overlapping(bookings, candidate, room, exclude).is_empty()
}

/// Decide how to drop `booking` on `target_room`.
///
/// Every booking in the target room counts, whatever its status.
pub fn resolve_move(
    bookings: &[Booking],
    booking: &Booking,
    target_room: &str,
) -> Result<MovePlan, ConflictError> {
    if booking.room_number == target_room {
        return Ok(MovePlan::Unchanged);
    }

    let overlaps = overlapping(bookings, booking, target_room, &[booking.id]);
    match overlaps.as_slice() {
        [] => Ok(MovePlan::Plain {
            booking: booking.clone(),
            target_room: target_room.to_string(),
        }),
        [swap] => {
            let exclude = [booking.id, swap.id];
            let origin_room = booking.room_number.as_str();

            let mut moved = booking.clone();
            moved.room_number = target_room.to_string();
            let mut swapped = (*swap).clone();
            swapped.room_number = origin_room.to_string();

            if has_conflict(bookings, &moved, target_room, &exclude)
                || has_conflict(bookings, &swapped, origin_room, &exclude)
            {
                return Err(ConflictError::SwapBlocked {
                    booking_id: booking.id,
                    swap_id: swap.id,
                });
            }

            Ok(MovePlan::Swap {
                booking: booking.clone(),
                swap: (*swap).clone(),
                target_room: target_room.to_string(),
                origin_room: origin_room.to_string(),
            })
        }
        many => Err(ConflictError::MultipleOverlaps {
            room_number: target_room.to_string(),
            count: many.len(),
        }),
    }
}

/// Pairs of room-holding bookings whose stays overlap in the same room
pub fn find_overlaps(bookings: &[Booking]) -> Vec<(i64, i64)> {
    let holding: Vec<&Booking> = bookings.iter().filter(|b| b.status.holds_room()).collect();
    let mut pairs = Vec::new();
    for (i, a) in holding.iter().enumerate() {
        for b in &holding[i + 1..] {
            if a.room_number == b.room_number && a.overlaps(b) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}
