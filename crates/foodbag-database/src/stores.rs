//! Storage bundle handed to the service layer.

use std::sync::Arc;

use tracing::info;

use foodbag_core::config::{DatabaseConfig, StoreProvider};
use foodbag_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{BookingRepository, FoodBagRepository, UserRepository};
use crate::store::{BookingStore, FoodBagStore, UserStore};

/// The three stores the services depend on, built once at startup.
///
/// Switches between PostgreSQL and the in-process store based on
/// configuration. Cloning is cheap; every handle is shared.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User persistence.
    pub users: Arc<dyn UserStore>,
    /// Food bag persistence.
    pub food_bags: Arc<dyn FoodBagStore>,
    /// Booking persistence.
    pub bookings: Arc<dyn BookingStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Connect to the configured provider, applying migrations when enabled.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            StoreProvider::Memory => {
                info!("Using in-memory store; data will not survive a restart");
                Ok(Self::memory())
            }
            StoreProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self::postgres(db))
            }
        }
    }

    /// Stores backed by a fresh [`MemoryStore`].
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(store.clone()),
            food_bags: Arc::new(store.clone()),
            bookings: Arc::new(store),
            pool: None,
        }
    }

    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            food_bags: Arc::new(FoodBagRepository::new(pool.clone())),
            bookings: Arc::new(BookingRepository::new(pool)),
            pool: Some(db),
        }
    }

    /// Whether the backing storage is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(db) => db.health_check().await,
            None => Ok(true),
        }
    }

    /// Release database connections, if any.
    pub async fn close(&self) {
        if let Some(db) = &self.pool {
            db.close().await;
        }
    }
}
