//! Storage traits consumed by the service layer.
//!
//! Every method that mutates more than one row is atomic: PostgreSQL runs it
//! in a single transaction and the memory store under a single write lock.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use foodbag_core::result::AppResult;
use foodbag_entity::booking::{Booking, CreateBooking};
use foodbag_entity::food_bag::{FoodBag, FoodBagFields, OwnershipScope};
use foodbag_entity::user::{CreateUser, User};

/// Message for a registration whose email is already taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";

/// Filters for listing food bags. All set filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodBagFilter {
    /// Only bags whose pickup time is strictly after this instant.
    pub not_expired_at: Option<DateTime<Utc>>,
    /// Only bags published by this user.
    pub owner_id: Option<Uuid>,
    /// Case-insensitive substring of the address.
    pub address_contains: Option<String>,
}

impl FoodBagFilter {
    /// Whether `bag` passes every set filter.
    pub fn matches(&self, bag: &FoodBag) -> bool {
        if let Some(now) = self.not_expired_at {
            if bag.pickup_time <= now {
                return false;
            }
        }
        if let Some(owner_id) = self.owner_id {
            if bag.owner_id != owner_id {
                return false;
            }
        }
        if let Some(needle) = self.address_needle() {
            if !bag.address.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// The lowercase address needle, ignoring blank input.
    pub fn address_needle(&self) -> Option<String> {
        self.address_contains
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Result of an atomic check-and-decrement reservation.
#[derive(Debug, Clone)]
pub enum ReserveOutcome {
    /// Quantity was decremented and the booking inserted.
    Committed(Booking),
    /// The food bag does not exist (or was reaped first).
    NotFound,
    /// The food bag holds fewer units than requested. Nothing changed.
    Insufficient {
        /// Units left at the time of the check.
        available: i32,
    },
}

/// User persistence.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Insert a user. A taken email (case-insensitive) fails with a
    /// bad-request error carrying [`DUPLICATE_EMAIL_MESSAGE`].
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List every user ordered by id.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Delete a user together with its food bags, the bookings on those bags
    /// and its own bookings. Returns false when the user does not exist.
    async fn delete_cascade(&self, id: Uuid) -> AppResult<bool>;
}

/// Food bag persistence.
#[async_trait]
pub trait FoodBagStore: Send + Sync + Debug {
    /// Insert a food bag owned by `owner_id`.
    async fn create(&self, owner_id: Uuid, fields: &FoodBagFields) -> AppResult<FoodBag>;

    /// Find a food bag by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodBag>>;

    /// List food bags matching `filter`, ordered by id.
    async fn list(&self, filter: &FoodBagFilter) -> AppResult<Vec<FoodBag>>;

    /// Overwrite every writable field of a bag inside `scope`.
    /// Returns `None` when the bag is absent or outside the scope.
    async fn replace(
        &self,
        id: Uuid,
        scope: OwnershipScope,
        fields: &FoodBagFields,
    ) -> AppResult<Option<FoodBag>>;

    /// Delete a bag inside `scope` together with its bookings.
    /// Returns false when the bag is absent or outside the scope.
    async fn delete_cascade(&self, id: Uuid, scope: OwnershipScope) -> AppResult<bool>;

    /// Delete every bag with `pickup_time <= now` together with its bookings.
    /// Returns the number of bags removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Booking persistence.
#[async_trait]
pub trait BookingStore: Send + Sync + Debug {
    /// Atomically decrement the bag's quantity and insert the booking.
    ///
    /// Concurrent reservations against one bag are serialized; the bag's
    /// quantity never goes negative.
    async fn reserve(&self, data: &CreateBooking) -> AppResult<ReserveOutcome>;

    /// Bookings made by `user_id`, ordered by id.
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>>;

    /// Bookings on `food_bag_id`, ordered by id.
    async fn list_by_food_bag(&self, food_bag_id: Uuid) -> AppResult<Vec<Booking>>;
}
