//! Built-in job implementations.

pub mod expiry;

pub use expiry::ExpiryReaper;
