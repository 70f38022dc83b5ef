//! Terminal failure states of a booking attempt.

use thiserror::Error;

use foodbag_core::error::AppError;

/// Why a booking attempt did not commit. No attempt that ends here leaves any
/// change behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRejection {
    /// The caller is not a client.
    #[error("Only clients can book food bags")]
    RoleDenied,
    /// The requested quantity is zero or negative.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,
    /// The food bag does not exist, or was reaped before the commit.
    #[error("Food bag not found")]
    NotFound,
    /// The food bag holds fewer units than requested.
    #[error("Not enough food bags available")]
    InsufficientQuantity {
        /// Units left when the attempt was checked.
        available: i32,
    },
    /// The decrement and insert could not both be applied; both were rolled back.
    #[error("Failed to create booking")]
    InternalError,
}

impl From<BookingRejection> for AppError {
    fn from(rejection: BookingRejection) -> Self {
        let message = rejection.to_string();
        match rejection {
            BookingRejection::RoleDenied => AppError::forbidden(message),
            BookingRejection::InvalidQuantity => AppError::validation(message),
            BookingRejection::NotFound => AppError::not_found(message),
            BookingRejection::InsufficientQuantity { .. } => AppError::bad_request(message),
            BookingRejection::InternalError => AppError::internal(message),
        }
    }
}
