//! Reservations against food bag inventory.

pub mod engine;
pub mod rejection;

pub use engine::BookingEngine;
pub use rejection::BookingRejection;
