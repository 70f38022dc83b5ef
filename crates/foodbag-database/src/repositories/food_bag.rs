//! Food bag repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use foodbag_core::error::{AppError, ErrorKind};
use foodbag_core::result::AppResult;
use foodbag_entity::food_bag::{FoodBag, FoodBagFields, OwnershipScope};

use crate::store::{FoodBagFilter, FoodBagStore};

/// Projection shared by every read; joins the owner's email.
const SELECT_FOOD_BAG: &str = "SELECT fb.id, fb.name, fb.description, fb.photo_url, fb.price, \
     fb.discounted_price, fb.quantity, fb.address, fb.pickup_time, fb.owner_id, \
     u.email AS owner_email, fb.created_at \
     FROM food_bags fb JOIN users u ON u.id = fb.owner_id";

/// Same projection over a data-modifying CTE named `fb`.
const SELECT_FROM_CTE: &str = "SELECT fb.id, fb.name, fb.description, fb.photo_url, fb.price, \
     fb.discounted_price, fb.quantity, fb.address, fb.pickup_time, fb.owner_id, \
     u.email AS owner_email, fb.created_at \
     FROM fb JOIN users u ON u.id = fb.owner_id";

/// Repository for food bag persistence.
#[derive(Debug, Clone)]
pub struct FoodBagRepository {
    pool: PgPool,
}

impl FoodBagRepository {
    /// Create a new food bag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside `ILIKE`.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[async_trait]
impl FoodBagStore for FoodBagRepository {
    async fn create(&self, owner_id: Uuid, fields: &FoodBagFields) -> AppResult<FoodBag> {
        let sql = format!(
            "WITH fb AS (\
                INSERT INTO food_bags (id, name, description, photo_url, price, \
                discounted_price, quantity, address, pickup_time, owner_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *\
             ) {SELECT_FROM_CTE}"
        );
        sqlx::query_as::<_, FoodBag>(&sql)
            .bind(Uuid::now_v7())
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(fields.photo_url_or_default())
            .bind(fields.price)
            .bind(fields.discounted_price)
            .bind(fields.quantity)
            .bind(&fields.address)
            .bind(fields.pickup_time)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create food bag", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<FoodBag>> {
        sqlx::query_as::<_, FoodBag>(&format!("{SELECT_FOOD_BAG} WHERE fb.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find food bag", e))
    }

    async fn list(&self, filter: &FoodBagFilter) -> AppResult<Vec<FoodBag>> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_FOOD_BAG);
        qb.push(" WHERE TRUE");
        if let Some(now) = filter.not_expired_at {
            qb.push(" AND fb.pickup_time > ").push_bind(now);
        }
        if let Some(owner_id) = filter.owner_id {
            qb.push(" AND fb.owner_id = ").push_bind(owner_id);
        }
        if let Some(needle) = filter.address_needle() {
            qb.push(" AND fb.address ILIKE ")
                .push_bind(format!("%{}%", escape_like(&needle)));
        }
        qb.push(" ORDER BY fb.id");

        qb.build_query_as::<FoodBag>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list food bags", e))
    }

    async fn replace(
        &self,
        id: Uuid,
        scope: OwnershipScope,
        fields: &FoodBagFields,
    ) -> AppResult<Option<FoodBag>> {
        let sql = format!(
            "WITH fb AS (\
                UPDATE food_bags SET name = $3, description = $4, \
                photo_url = COALESCE(NULLIF(TRIM($5), ''), photo_url), price = $6, \
                discounted_price = $7, quantity = $8, address = $9, pickup_time = $10 \
                WHERE id = $1 AND ($2::uuid IS NULL OR owner_id = $2) RETURNING *\
             ) {SELECT_FROM_CTE}"
        );
        sqlx::query_as::<_, FoodBag>(&sql)
            .bind(id)
            .bind(scope.owner())
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(&fields.photo_url)
            .bind(fields.price)
            .bind(fields.discounted_price)
            .bind(fields.quantity)
            .bind(&fields.address)
            .bind(fields.pickup_time)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update food bag", e))
    }

    async fn delete_cascade(&self, id: Uuid, scope: OwnershipScope) -> AppResult<bool> {
        let db_err = |e: sqlx::Error| {
            AppError::with_source(ErrorKind::Database, "Failed to delete food bag", e)
        };
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let locked: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM food_bags WHERE id = $1 \
             AND ($2::uuid IS NULL OR owner_id = $2) FOR UPDATE",
        )
        .bind(id)
        .bind(scope.owner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;
        if locked.is_none() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM bookings WHERE food_bag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM food_bags WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(true)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let db_err = |e: sqlx::Error| {
            AppError::with_source(ErrorKind::Database, "Failed to purge expired food bags", e)
        };
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let expired: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM food_bags WHERE pickup_time <= $1 ORDER BY id FOR UPDATE",
        )
        .bind(now)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;
        if expired.is_empty() {
            return Ok(0);
        }

        let bookings = sqlx::query("DELETE FROM bookings WHERE food_bag_id = ANY($1)")
            .bind(&expired)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();
        let removed = sqlx::query("DELETE FROM food_bags WHERE id = ANY($1)")
            .bind(&expired)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?
            .rows_affected();

        tx.commit().await.map_err(db_err)?;

        debug!(food_bags = removed, bookings, "Purged expired food bags");
        Ok(removed)
    }
}
