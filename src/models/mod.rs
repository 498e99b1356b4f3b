// Module exports for models

pub mod booking;
pub mod room;
pub mod settings;
