//! Booking entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A client's reservation of some quantity of a food bag.
///
/// Bookings are immutable once committed and only disappear together with
/// their food bag or their user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique identifier.
    pub id: Uuid,
    /// Reserving client.
    pub user_id: Uuid,
    /// Reserved food bag.
    pub food_bag_id: Uuid,
    /// Units reserved.
    pub quantity: i32,
    /// When the reservation was committed.
    pub created_at: DateTime<Utc>,
}

/// Data required to commit a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateBooking {
    pub user_id: Uuid,
    pub food_bag_id: Uuid,
    pub quantity: i32,
}
