// Booking services
// API access, move/swap resolution, in-flight moves and the room status board

pub mod api;
pub mod error;
pub mod pending;
pub mod resolver;
pub mod service;
pub mod status;

pub use api::{BookingApi, HttpBookingApi};
pub use error::{ApiError, ConflictError, MoveError};
pub use pending::{MoveTicket, PendingMoves};
pub use resolver::{find_overlaps, has_conflict, resolve_move, MovePlan};
pub use service::{merge_updates, BookingService, BookingSnapshot};
pub use status::{
    active_booking_map, first_available_date, room_status, room_status_map, status_board, RoomStatus,
};
