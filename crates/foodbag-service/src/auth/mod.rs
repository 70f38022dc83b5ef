//! Login and session token resolution.

pub mod service;

pub use service::{AuthService, LoginOutcome};
