//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use foodbag_auth::password::PasswordHasher;
use foodbag_core::config::AppConfig;
use foodbag_core::error::AppError;
use foodbag_database::Stores;
use foodbag_service::{AuthService, BookingEngine, InventoryLedger, UserService};
use foodbag_worker::ExpiryReaper;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Storage bundle (PostgreSQL or in-memory)
    pub stores: Stores,

    // ── Services ─────────────────────────────────────────────
    /// Registration, profiles and admin user management
    pub user_service: Arc<UserService>,
    /// Login and session token validation
    pub auth_service: Arc<AuthService>,
    /// Food bag inventory
    pub ledger: Arc<InventoryLedger>,
    /// Reservation engine
    pub booking_engine: Arc<BookingEngine>,
    /// Expired food bag sweeper, shared with the scheduler
    pub reaper: Arc<ExpiryReaper>,
}

impl AppState {
    /// Wires every service on top of `stores`.
    pub fn build(config: AppConfig, stores: Stores) -> Result<Self, AppError> {
        let timeout = config.database.operation_timeout();
        let hasher = Arc::new(PasswordHasher::new());

        let user_service = Arc::new(UserService::new(
            stores.users.clone(),
            hasher,
            &config.auth,
            timeout,
        ));
        let auth_service = Arc::new(AuthService::new(user_service.clone(), &config.auth)?);
        let ledger = Arc::new(InventoryLedger::new(stores.food_bags.clone(), timeout));
        let booking_engine = Arc::new(BookingEngine::new(stores.bookings.clone(), timeout));
        let reaper = Arc::new(ExpiryReaper::new(ledger.clone()));

        Ok(Self {
            config: Arc::new(config),
            stores,
            user_service,
            auth_service,
            ledger,
            booking_engine,
            reaper,
        })
    }

    /// Whether issued cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        !self.config.server.debug
    }
}
