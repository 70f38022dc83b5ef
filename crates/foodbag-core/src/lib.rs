//! # foodbag-core
//!
//! Core crate for the FoodBag marketplace. Contains configuration schemas,
//! the unified error system, and the storage deadline helper.
//!
//! This crate has **no** internal dependencies on other FoodBag crates.

pub mod config;
pub mod deadline;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
