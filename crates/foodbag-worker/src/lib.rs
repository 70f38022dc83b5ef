//! Scheduled background tasks for FoodBag.
//!
//! This crate provides:
//! - The expiry reaper that removes food bags past their pickup time
//! - A scheduler that runs it on a fixed period, independent of requests

pub mod jobs;
pub mod scheduler;

pub use jobs::ExpiryReaper;
pub use scheduler::ReaperScheduler;
