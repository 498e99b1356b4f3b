// Service module exports

pub mod booking;
pub mod grid;
pub mod settings;
