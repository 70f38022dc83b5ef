//! # foodbag-database
//!
//! Storage for users, food bags and bookings. The [`store`] module defines the
//! traits the services depend on; [`repositories`] implements them on
//! PostgreSQL and [`memory`] implements them in process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{BookingStore, FoodBagFilter, FoodBagStore, ReserveOutcome, UserStore};
pub use stores::Stores;
