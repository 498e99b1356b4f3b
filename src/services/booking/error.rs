use thiserror::Error;

use crate::models::booking::Booking;

/// A move rejected before any request was issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("Room {room_number} has more than one overlapping booking ({count})")]
    MultipleOverlaps { room_number: String, count: usize },
    #[error("Booking {booking_id} cannot swap with booking {swap_id}: another stay is in the way")]
    SwapBlocked { booking_id: i64, swap_id: i64 },
    #[error("Booking {booking_id} is still being moved; try again once it is saved")]
    MovePending { booking_id: i64 },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum MoveError {
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    #[error(transparent)]
    Api(#[from] ApiError),
    /// One swap leg may have been committed; reload to see the server's state
    #[error("Swap only partly applied ({} updated, {} failed); reload bookings", committed.len(), failures.len())]
    SwapIncomplete {
        committed: Vec<Booking>,
        failures: Vec<ApiError>,
    },
}

impl MoveError {
    /// Whether the caller must refetch before trusting its booking list
    pub fn needs_reload(&self) -> bool {
        matches!(self, MoveError::SwapIncomplete { .. })
    }
}
