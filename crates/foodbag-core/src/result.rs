//! Convenience result type alias for FoodBag.

use crate::error::AppError;

/// A specialized `Result` type for FoodBag operations.
pub type AppResult<T> = Result<T, AppError>;
