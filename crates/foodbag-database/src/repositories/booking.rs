//! Booking repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use foodbag_core::error::{AppError, ErrorKind};
use foodbag_core::result::AppResult;
use foodbag_entity::booking::{Booking, CreateBooking};

use crate::store::{BookingStore, ReserveOutcome};

/// Repository for booking persistence.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    /// The conditional `UPDATE` takes the row lock, so concurrent reservations
    /// and the expiry sweep on the same bag queue behind one another. Dropping
    /// the transaction on any early return rolls the decrement back.
    async fn reserve(&self, data: &CreateBooking) -> AppResult<ReserveOutcome> {
        let db_err = |e: sqlx::Error| {
            AppError::with_source(ErrorKind::Database, "Failed to reserve food bag", e)
        };
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let remaining: Option<i32> = sqlx::query_scalar(
            "UPDATE food_bags SET quantity = quantity - $2 \
             WHERE id = $1 AND quantity >= $2 RETURNING quantity",
        )
        .bind(data.food_bag_id)
        .bind(data.quantity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        if remaining.is_none() {
            let available: Option<i32> =
                sqlx::query_scalar("SELECT quantity FROM food_bags WHERE id = $1")
                    .bind(data.food_bag_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(db_err)?;
            return Ok(match available {
                None => ReserveOutcome::NotFound,
                Some(available) => ReserveOutcome::Insufficient { available },
            });
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, food_bag_id, quantity) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.user_id)
        .bind(data.food_bag_id)
        .bind(data.quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(ReserveOutcome::Committed(booking))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list bookings by user", e)
            })
    }

    async fn list_by_food_bag(&self, food_bag_id: Uuid) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE food_bag_id = $1 ORDER BY id")
            .bind(food_bag_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to list bookings by food bag",
                    e,
                )
            })
    }
}
