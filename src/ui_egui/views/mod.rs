pub mod booking_grid;
pub(crate) mod palette;

pub use booking_grid::BookingGridView;
