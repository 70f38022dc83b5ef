//! The booking engine runs one reservation attempt through
//! Requested → Validated → Committed, or into a [`BookingRejection`].
//!
//! The existence check, the quantity check, the decrement and the booking
//! insert are a single call into [`BookingStore::reserve`], which serializes
//! attempts on the same food bag. That is what rules out overselling.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use uuid::Uuid;

use foodbag_auth::rbac::{AuthorizationGuard, BOOKERS};
use foodbag_core::deadline::within;
use foodbag_core::error::AppError;
use foodbag_database::{BookingStore, ReserveOutcome};
use foodbag_entity::booking::{Booking, CreateBooking};

use super::rejection::BookingRejection;
use crate::context::RequestContext;

/// Reserves food bag units for clients.
#[derive(Debug, Clone)]
pub struct BookingEngine {
    bookings: Arc<dyn BookingStore>,
    guard: AuthorizationGuard,
    timeout: Duration,
}

impl BookingEngine {
    /// Creates a new booking engine.
    pub fn new(bookings: Arc<dyn BookingStore>, timeout: Duration) -> Self {
        Self {
            bookings,
            guard: AuthorizationGuard::new(),
            timeout,
        }
    }

    /// Attempts to reserve `quantity` units of `food_bag_id` for the caller.
    pub async fn book(
        &self,
        ctx: &RequestContext,
        food_bag_id: Uuid,
        quantity: i32,
    ) -> Result<Booking, BookingRejection> {
        if !self.guard.has_role(ctx.role, BOOKERS) {
            warn!(user_id = %ctx.user_id, role = %ctx.role, "Booking denied for role");
            return Err(BookingRejection::RoleDenied);
        }
        if quantity < 1 {
            return Err(BookingRejection::InvalidQuantity);
        }

        let request = CreateBooking {
            user_id: ctx.user_id,
            food_bag_id,
            quantity,
        };
        let outcome = within(self.timeout, "reserve_food_bag", self.bookings.reserve(&request))
            .await
            .map_err(|e| {
                error!(
                    food_bag_id = %food_bag_id,
                    user_id = %ctx.user_id,
                    error = %e,
                    "Booking commit failed"
                );
                BookingRejection::InternalError
            })?;

        match outcome {
            ReserveOutcome::Committed(booking) => {
                info!(
                    booking_id = %booking.id,
                    food_bag_id = %food_bag_id,
                    user_id = %ctx.user_id,
                    quantity,
                    "Booking committed"
                );
                Ok(booking)
            }
            ReserveOutcome::NotFound => Err(BookingRejection::NotFound),
            ReserveOutcome::Insufficient { available } => {
                info!(
                    food_bag_id = %food_bag_id,
                    requested = quantity,
                    available,
                    "Booking rejected: insufficient quantity"
                );
                Err(BookingRejection::InsufficientQuantity { available })
            }
        }
    }

    /// The caller's own bookings.
    pub async fn list_for_user(&self, ctx: &RequestContext) -> Result<Vec<Booking>, AppError> {
        within(
            self.timeout,
            "list_bookings",
            self.bookings.list_by_user(ctx.user_id),
        )
        .await
    }
}
