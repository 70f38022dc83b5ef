//! # foodbag-api
//!
//! HTTP API layer for FoodBag built on Axum.
//!
//! Provides the REST endpoints, the session-token extractor, request
//! logging and CORS middleware, DTOs and the mapping from [`AppError`]
//! to HTTP responses.
//!
//! [`AppError`]: foodbag_core::AppError

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
