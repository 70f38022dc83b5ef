//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use foodbag_core::error::{AppError, ErrorKind};
use foodbag_core::result::AppResult;
use foodbag_entity::user::{CreateUser, User};

use crate::store::{DUPLICATE_EMAIL_MESSAGE, UserStore};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Repository for user persistence.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_duplicate_email(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.constraint())
        .is_some_and(|c| c == EMAIL_UNIQUE_CONSTRAINT)
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, password_hash, role, full_name) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.email.trim())
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(&data.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_duplicate_email(&e) {
                AppError::bad_request(DUPLICATE_EMAIL_MESSAGE)
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn delete_cascade(&self, id: Uuid) -> AppResult<bool> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to delete user", e);
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err)?;
        if exists.is_none() {
            return Ok(false);
        }

        // Holds off reservations on this user's bags until the cascade commits.
        let owned: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM food_bags WHERE owner_id = $1 ORDER BY id FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;

        let bookings = sqlx::query(
            "DELETE FROM bookings WHERE user_id = $1 \
             OR food_bag_id IN (SELECT id FROM food_bags WHERE owner_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .rows_affected();

        sqlx::query("DELETE FROM food_bags WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;

        debug!(user_id = %id, food_bags = owned.len(), bookings, "Deleted user with dependents");
        Ok(true)
    }
}
