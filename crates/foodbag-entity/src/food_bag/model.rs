//! Food bag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Photo shown for bags published without one.
pub const DEFAULT_PHOTO_URL: &str = "/placeholder.jpg";

/// A published, quantity-limited, time-bound surplus-food offer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodBag {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Photo location.
    pub photo_url: String,
    /// Regular price.
    pub price: f64,
    /// Price charged through the marketplace.
    pub discounted_price: f64,
    /// Units still available. Never negative.
    pub quantity: i32,
    /// Pickup address.
    pub address: String,
    /// Deadline for pickup; the bag is reaped once this has passed.
    pub pickup_time: DateTime<Utc>,
    /// Publishing user.
    pub owner_id: Uuid,
    /// Publishing user's email (joined, not stored on the row).
    pub owner_email: String,
    /// When the bag was published.
    pub created_at: DateTime<Utc>,
}

impl FoodBag {
    /// Whether the pickup deadline has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.pickup_time <= now
    }
}

/// Writable food bag fields.
///
/// Used for both creation and update. An update replaces every field, except
/// that an absent `photo_url` keeps the stored photo.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodBagFields {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "Photo URL must be at most 200 characters"))]
    #[serde(default)]
    pub photo_url: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "Discounted price must not be negative"))]
    pub discounted_price: f64,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    #[validate(length(min = 1, max = 200, message = "Address must be 1-200 characters"))]
    pub address: String,
    pub pickup_time: DateTime<Utc>,
}

impl FoodBagFields {
    /// The photo to store, falling back to the placeholder.
    pub fn photo_url_or_default(&self) -> String {
        self.photo_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PHOTO_URL.to_string())
    }
}
