//! PostgreSQL connection pool management.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use foodbag_core::config::DatabaseConfig;
use foodbag_core::deadline::within;
use foodbag_core::error::{AppError, ErrorKind};

/// Name reported in `pg_stat_activity`.
const APPLICATION_NAME: &str = "foodbag-market";

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Shared sqlx pool behind the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool sized and timed from configuration.
    ///
    /// Only host, port and database are logged; credentials in the URL never are.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let options = connect_options(&config.url)?;
        info!(
            host = options.get_host(),
            port = options.get_port(),
            database = options.get_database().unwrap_or("<default>"),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database: {e}"),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query, giving up after a short deadline.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let probe = async {
            sqlx::query_scalar::<_, i32>("SELECT 1")
                .fetch_one(&self.pool)
                .await
                .map(|v| v == 1)
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
        };
        within(HEALTH_CHECK_TIMEOUT, "database_health_check", probe).await
    }

    /// Wait for checked-out connections to return, then close them all.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn connect_options(url: &str) -> Result<PgConnectOptions, AppError> {
    PgConnectOptions::from_str(url)
        .map(|options| options.application_name(APPLICATION_NAME))
        .map_err(|e| AppError::with_source(ErrorKind::Configuration, "Invalid database URL", e))
}
