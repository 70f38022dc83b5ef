//! The inventory ledger owns food bag records and their filtered retrieval.
//!
//! Role checks happen here, before the store is touched. Ownership is passed
//! down as an [`OwnershipScope`] and enforced inside the store's own atomic
//! statement, so an out-of-scope update or delete changes nothing and reads
//! exactly like a missing id.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use foodbag_auth::rbac::{AuthorizationGuard, PUBLISHERS};
use foodbag_core::deadline::within;
use foodbag_core::error::AppError;
use foodbag_database::{FoodBagFilter, FoodBagStore};
use foodbag_entity::food_bag::{FoodBag, FoodBagFields};

use crate::context::RequestContext;

/// Reported for absent bags and bags outside the caller's scope alike.
pub const NOT_FOUND_OR_DENIED: &str = "Food bag not found or permission denied";

/// Listing parameters as requested by the caller.
#[derive(Debug, Clone, Default)]
pub struct FoodBagQuery {
    /// Hide bags whose pickup time has passed.
    pub only_not_expired: bool,
    /// Restrict to one owner. Overridden for establishments.
    pub owner_id: Option<Uuid>,
    /// Case-insensitive address substring.
    pub address: Option<String>,
}

/// Food bag CRUD with authorization.
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    food_bags: Arc<dyn FoodBagStore>,
    guard: AuthorizationGuard,
    timeout: Duration,
}

impl InventoryLedger {
    /// Creates a new ledger.
    pub fn new(food_bags: Arc<dyn FoodBagStore>, timeout: Duration) -> Self {
        Self {
            food_bags,
            guard: AuthorizationGuard::new(),
            timeout,
        }
    }

    /// Publishes a bag owned by the caller. Establishments and admins only.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        fields: FoodBagFields,
    ) -> Result<FoodBag, AppError> {
        self.guard.require_role(ctx.role, PUBLISHERS)?;
        validate_fields(&fields)?;

        let bag = within(
            self.timeout,
            "create_food_bag",
            self.food_bags.create(ctx.user_id, &fields),
        )
        .await?;

        info!(
            food_bag_id = %bag.id,
            owner_id = %bag.owner_id,
            quantity = bag.quantity,
            "Food bag created"
        );
        Ok(bag)
    }

    /// Loads a bag by id without any scoping.
    pub async fn get(&self, id: Uuid) -> Result<Option<FoodBag>, AppError> {
        within(self.timeout, "find_food_bag", self.food_bags.find_by_id(id)).await
    }

    /// Loads a bag as seen by the caller. Establishments only see their own.
    pub async fn get_visible(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Option<FoodBag>, AppError> {
        let bag = self.get(id).await?;
        Ok(match self.guard.listing_owner(ctx.user_id, ctx.role) {
            Some(owner) => bag.filter(|b| b.owner_id == owner),
            None => bag,
        })
    }

    /// Lists bags matching `query`. Establishments are always scoped to
    /// their own bags, whatever the query says.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: FoodBagQuery,
    ) -> Result<Vec<FoodBag>, AppError> {
        let filter = FoodBagFilter {
            not_expired_at: query.only_not_expired.then(Utc::now),
            owner_id: self
                .guard
                .listing_owner(ctx.user_id, ctx.role)
                .or(query.owner_id),
            address_contains: query.address,
        };
        self.list_filtered(&filter).await
    }

    /// Lists bags matching an explicit filter.
    pub async fn list_filtered(&self, filter: &FoodBagFilter) -> Result<Vec<FoodBag>, AppError> {
        within(self.timeout, "list_food_bags", self.food_bags.list(filter)).await
    }

    /// Replaces every field of a bag the caller owns (or any bag, for admins).
    ///
    /// Returns `None` when the bag is absent or not the caller's.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: FoodBagFields,
    ) -> Result<Option<FoodBag>, AppError> {
        validate_fields(&fields)?;
        let scope = self.guard.ownership_scope(ctx.user_id, ctx.role);

        let updated = within(
            self.timeout,
            "update_food_bag",
            self.food_bags.replace(id, scope, &fields),
        )
        .await?;

        if let Some(bag) = &updated {
            info!(food_bag_id = %bag.id, updated_by = %ctx.user_id, "Food bag updated");
        }
        Ok(updated)
    }

    /// Deletes a bag and its bookings. Establishments and admins only;
    /// establishments only their own.
    ///
    /// Returns false when the bag is absent or not the caller's.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<bool, AppError> {
        self.guard.require_role(ctx.role, PUBLISHERS)?;
        let scope = self.guard.ownership_scope(ctx.user_id, ctx.role);

        let deleted = within(
            self.timeout,
            "delete_food_bag",
            self.food_bags.delete_cascade(id, scope),
        )
        .await?;

        if deleted {
            info!(food_bag_id = %id, deleted_by = %ctx.user_id, "Food bag deleted");
        }
        Ok(deleted)
    }

    /// Removes every bag whose pickup time is at or before `now`, with its
    /// bookings. Returns the number of bags removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        within(
            self.timeout,
            "purge_expired_food_bags",
            self.food_bags.purge_expired(now),
        )
        .await
    }
}

fn validate_fields(fields: &FoodBagFields) -> Result<(), AppError> {
    fields
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid food bag: {e}")))
}
