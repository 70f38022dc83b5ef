//! # foodbag-service
//!
//! Business logic service layer for FoodBag. Each service orchestrates the
//! storage traits and the auth primitives to implement one use case family.
//!
//! Services receive every dependency as an `Arc` at construction time and
//! bound each storage call with the configured operation timeout.

pub mod auth;
pub mod booking;
pub mod context;
pub mod food_bag;
pub mod user;

pub use auth::{AuthService, LoginOutcome};
pub use booking::{BookingEngine, BookingRejection};
pub use context::RequestContext;
pub use food_bag::{FoodBagQuery, InventoryLedger};
pub use user::{RegisterUser, UserService};
