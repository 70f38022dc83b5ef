//! Account registration and administration.

pub mod service;

pub use service::{RegisterUser, UserService};
