//! Moves that were dispatched but whose commit has not come back yet.
//!
//! New drops are resolved against the bookings as they will be once every
//! pending plan lands, so two quick drops cannot both claim the same nights.

use super::error::{ConflictError, MoveError};
use super::resolver::{resolve_move, MovePlan};
use super::service::merge_updates;
use crate::models::booking::Booking;

/// Handle tying a commit result back to the plan it committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTicket(u64);

/// Plans dispatched to the server, oldest first
#[derive(Debug, Default)]
pub struct PendingMoves {
    next: u64,
    plans: Vec<(MoveTicket, MovePlan)>,
}

impl PendingMoves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// `bookings` with every pending plan applied in dispatch order
    pub fn projected(&self, bookings: &[Booking]) -> Vec<Booking> {
        let mut projected = bookings.to_vec();
        for (_, plan) in &self.plans {
            plan.apply_to(&mut projected);
        }
        projected
    }

    /// Resolve a drop and record the plan until its commit settles.
    ///
    /// `Ok(None)` means nothing to commit. A plan touching a booking that is
    /// already being moved is refused.
    pub fn resolve(
        &mut self,
        bookings: &[Booking],
        booking: &Booking,
        target_room: &str,
    ) -> Result<Option<(MoveTicket, MovePlan)>, ConflictError> {
        let projected = self.projected(bookings);
        let current = projected
            .iter()
            .find(|b| b.id == booking.id)
            .unwrap_or(booking);

        let plan = resolve_move(&projected, current, target_room)?;
        if let MovePlan::Unchanged = plan {
            return Ok(None);
        }

        for (id, _) in plan.updates() {
            if self.is_moving(id) {
                log::warn!("Booking {} already has a move in flight", id);
                return Err(ConflictError::MovePending { booking_id: id });
            }
        }

        let ticket = MoveTicket(self.next);
        self.next += 1;
        log::debug!("pending move {:?}: {:?}", ticket, plan.updates());
        self.plans.push((ticket, plan.clone()));
        Ok(Some((ticket, plan)))
    }

    fn is_moving(&self, booking_id: i64) -> bool {
        self.plans
            .iter()
            .any(|(_, plan)| plan.updates().iter().any(|(id, _)| *id == booking_id))
    }

    /// Forget the plan behind `ticket` and fold the server's answer into `bookings`.
    ///
    /// Legs committed before a swap failed are merged too; the error still
    /// tells the caller to reload.
    pub fn settle(
        &mut self,
        ticket: MoveTicket,
        result: Result<Vec<Booking>, MoveError>,
        bookings: &mut [Booking],
    ) -> Result<MovePlan, MoveError> {
        let plan = match self.plans.iter().position(|(t, _)| *t == ticket) {
            Some(position) => self.plans.remove(position).1,
            None => {
                log::warn!("Commit result for unknown move {:?}", ticket);
                MovePlan::Unchanged
            }
        };

        match result {
            Ok(updated) => {
                merge_updates(bookings, &updated);
                Ok(plan)
            }
            Err(err) => {
                if let MoveError::SwapIncomplete { committed, .. } = &err {
                    merge_updates(bookings, committed);
                }
                Err(err)
            }
        }
    }
}
