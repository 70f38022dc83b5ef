//! Role and ownership enforcement.

pub mod guard;

pub use guard::{ADMINISTRATORS, AuthorizationGuard, BOOKERS, PUBLISHERS};
