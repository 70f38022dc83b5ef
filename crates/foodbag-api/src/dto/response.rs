//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodbag_entity::booking::Booking;
use foodbag_entity::food_bag::FoodBag;
use foodbag_entity::user::{User, UserRole};

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issued session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

/// User information (never includes the password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Display name.
    pub full_name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
        }
    }
}

/// The publishing user, as embedded in a food bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodBagOwner {
    /// Owner ID.
    pub id: Uuid,
    /// Owner email.
    pub email: String,
}

/// Food bag information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodBagResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub photo_url: String,
    pub price: f64,
    pub discounted_price: f64,
    pub quantity: i32,
    pub address: String,
    pub pickup_time: DateTime<Utc>,
    pub owner: FoodBagOwner,
}

impl From<FoodBag> for FoodBagResponse {
    fn from(bag: FoodBag) -> Self {
        Self {
            id: bag.id,
            name: bag.name,
            description: bag.description,
            photo_url: bag.photo_url,
            price: bag.price,
            discounted_price: bag.discounted_price,
            quantity: bag.quantity,
            address: bag.address,
            pickup_time: bag.pickup_time,
            owner: FoodBagOwner {
                id: bag.owner_id,
                email: bag.owner_email,
            },
        }
    }
}

/// Booking information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// Booking client.
    pub user_id: Uuid,
    /// Reserved bag.
    pub food_bag_id: Uuid,
    /// Units reserved.
    pub quantity: i32,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            food_bag_id: booking.food_bag_id,
            quantity: booking.quantity,
        }
    }
}

/// Result of an on-demand expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaperRunResponse {
    /// Number of food bags removed.
    pub removed: u64,
}

/// Liveness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Reply to the booking ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    /// Always `"pong"`.
    pub ping: String,
}
