//! In-process store for development and tests.
//!
//! All three store traits share one [`RwLock`]. Every multi-row mutation
//! happens inside a single write guard, which gives the same atomicity the
//! PostgreSQL repositories get from a transaction.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use foodbag_core::error::AppError;
use foodbag_core::result::AppResult;
use foodbag_entity::booking::{Booking, CreateBooking};
use foodbag_entity::food_bag::{FoodBag, FoodBagFields, OwnershipScope};
use foodbag_entity::user::model::normalize_email;
use foodbag_entity::user::{CreateUser, User};

use crate::store::{
    BookingStore, DUPLICATE_EMAIL_MESSAGE, FoodBagFilter, FoodBagStore, ReserveOutcome, UserStore,
};

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<Uuid, User>,
    food_bags: BTreeMap<Uuid, FoodBag>,
    bookings: BTreeMap<Uuid, Booking>,
}

impl MemoryState {
    fn remove_bookings_where(&mut self, pred: impl Fn(&Booking) -> bool) -> usize {
        let before = self.bookings.len();
        self.bookings.retain(|_, b| !pred(b));
        before - self.bookings.len()
    }
}

/// Process-local implementation of every store trait.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        let email = normalize_email(&data.email);
        if state
            .users
            .values()
            .any(|u| normalize_email(&u.email) == email)
        {
            return Err(AppError::bad_request(DUPLICATE_EMAIL_MESSAGE));
        }

        let user = User {
            id: Uuid::now_v7(),
            email: data.email.trim().to_string(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            full_name: data.full_name.clone(),
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| normalize_email(&u.email) == email)
            .cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&id) {
            return Ok(false);
        }

        let owned: Vec<Uuid> = state
            .food_bags
            .values()
            .filter(|b| b.owner_id == id)
            .map(|b| b.id)
            .collect();
        let bookings =
            state.remove_bookings_where(|b| b.user_id == id || owned.contains(&b.food_bag_id));
        for bag_id in &owned {
            state.food_bags.remove(bag_id);
        }
        state.users.remove(&id);

        debug!(
            user_id = %id,
            food_bags = owned.len(),
            bookings = bookings,
            "Deleted user with dependents"
        );
        Ok(true)
    }
}

#[async_trait]
impl FoodBagStore for MemoryStore {
    async fn create(&self, owner_id: Uuid, fields: &FoodBagFields) -> AppResult<FoodBag> {
        let mut state = self.state.write().await;
        let owner_email = state
            .users
            .get(&owner_id)
            .map(|u| u.email.clone())
            .ok_or_else(|| AppError::bad_request("Food bag owner does not exist"))?;

        let bag = FoodBag {
            id: Uuid::now_v7(),
            name: fields.name.clone(),
            description: fields.description.clone(),
            photo_url: fields.photo_url_or_default(),
            price: fields.price,
            discounted_price: fields.discounted_price,
            quantity: fields.quantity,
            address: fields.address.clone(),
            pickup_time: fields.pickup_time,
            owner_id,
            owner_email,
            created_at: Utc::now(),
        };
        state.food_bags.insert(bag.id, bag.clone());
        Ok(bag)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodBag>> {
        Ok(self.state.read().await.food_bags.get(&id).cloned())
    }

    async fn list(&self, filter: &FoodBagFilter) -> AppResult<Vec<FoodBag>> {
        Ok(self
            .state
            .read()
            .await
            .food_bags
            .values()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    async fn replace(
        &self,
        id: Uuid,
        scope: OwnershipScope,
        fields: &FoodBagFields,
    ) -> AppResult<Option<FoodBag>> {
        let mut state = self.state.write().await;
        let Some(bag) = state.food_bags.get_mut(&id) else {
            return Ok(None);
        };
        if !scope.permits(bag.owner_id) {
            return Ok(None);
        }

        bag.name = fields.name.clone();
        bag.description = fields.description.clone();
        if let Some(photo) = fields.photo_url.clone().filter(|p| !p.trim().is_empty()) {
            bag.photo_url = photo;
        }
        bag.price = fields.price;
        bag.discounted_price = fields.discounted_price;
        bag.quantity = fields.quantity;
        bag.address = fields.address.clone();
        bag.pickup_time = fields.pickup_time;
        Ok(Some(bag.clone()))
    }

    async fn delete_cascade(&self, id: Uuid, scope: OwnershipScope) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state.food_bags.get(&id) {
            Some(bag) if scope.permits(bag.owner_id) => {}
            _ => return Ok(false),
        }
        state.remove_bookings_where(|b| b.food_bag_id == id);
        state.food_bags.remove(&id);
        Ok(true)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let expired: Vec<Uuid> = state
            .food_bags
            .values()
            .filter(|b| b.is_expired_at(now))
            .map(|b| b.id)
            .collect();
        if expired.is_empty() {
            return Ok(0);
        }

        state.remove_bookings_where(|b| expired.contains(&b.food_bag_id));
        for id in &expired {
            state.food_bags.remove(id);
        }
        Ok(expired.len() as u64)
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn reserve(&self, data: &CreateBooking) -> AppResult<ReserveOutcome> {
        let mut state = self.state.write().await;
        let Some(bag) = state.food_bags.get_mut(&data.food_bag_id) else {
            return Ok(ReserveOutcome::NotFound);
        };
        if bag.quantity < data.quantity {
            return Ok(ReserveOutcome::Insufficient {
                available: bag.quantity,
            });
        }
        bag.quantity -= data.quantity;

        let booking = Booking {
            id: Uuid::now_v7(),
            user_id: data.user_id,
            food_bag_id: data.food_bag_id,
            quantity: data.quantity,
            created_at: Utc::now(),
        };
        state.bookings.insert(booking.id, booking.clone());
        Ok(ReserveOutcome::Committed(booking))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        Ok(self
            .state
            .read()
            .await
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_food_bag(&self, food_bag_id: Uuid) -> AppResult<Vec<Booking>> {
        Ok(self
            .state
            .read()
            .await
            .bookings
            .values()
            .filter(|b| b.food_bag_id == food_bag_id)
            .cloned()
            .collect())
    }
}
