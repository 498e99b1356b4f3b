// Booking grid core
// Window -> index -> row layout, plus the selection and booking-drag state machines

pub mod controller;
pub mod drag;
pub mod geometry;
pub mod index;
pub mod layout;
pub mod selection;
pub mod window;

pub use controller::{GridAction, GridController};
pub use drag::{BookingDragController, DragConfig, DragOutcome, DragState};
pub use geometry::{GridGeometry, GridHit};
pub use index::{BookingIndex, BookingTone, Span};
pub use layout::{BoundaryCell, CellHalf, GridCell, MiddleCell, RowLayout};
pub use selection::{RangeSelection, Selection, SelectionMachine};
pub use window::VisibleWindow;
