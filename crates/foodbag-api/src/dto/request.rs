//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use foodbag_entity::food_bag::FoodBagFields;
use foodbag_entity::user::UserRole;
use foodbag_service::RegisterUser;

/// Login form (`application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    /// Email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Self-registration request.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Requested role; defaults to client.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            role: req.role,
            full_name: req.full_name,
        }
    }
}

/// Create or replace a food bag.
#[derive(Debug, Clone, Deserialize)]
pub struct FoodBagRequest {
    /// Short title.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Photo location. Omit to use the placeholder (or keep the current photo on update).
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Regular price.
    pub price: f64,
    /// Marketplace price.
    pub discounted_price: f64,
    /// Units offered.
    pub quantity: i32,
    /// Pickup address.
    pub address: String,
    /// Pickup deadline.
    pub pickup_time: DateTime<Utc>,
}

impl From<FoodBagRequest> for FoodBagFields {
    fn from(req: FoodBagRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            photo_url: req.photo_url,
            price: req.price,
            discounted_price: req.discounted_price,
            quantity: req.quantity,
            address: req.address,
            pickup_time: req.pickup_time,
        }
    }
}

/// Query parameters for listing food bags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodBagListQuery {
    /// Case-insensitive substring of the pickup address.
    pub address: Option<String>,
}

/// Booking request.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    /// Bag to reserve.
    pub food_bag_id: Uuid,
    /// Units to reserve.
    pub quantity: i32,
}
