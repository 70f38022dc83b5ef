//! Removal of food bags whose pickup time has passed.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use foodbag_core::error::AppError;
use foodbag_service::food_bag::InventoryLedger;

/// Deletes expired food bags together with their bookings.
#[derive(Debug)]
pub struct ExpiryReaper {
    ledger: Arc<InventoryLedger>,
    sweeps: AtomicU64,
    failures: AtomicU64,
}

impl ExpiryReaper {
    /// Create a new reaper over the given ledger.
    pub fn new(ledger: Arc<InventoryLedger>) -> Self {
        Self {
            ledger,
            sweeps: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Remove every bag with `pickup_time <= now`; returns how many were removed.
    ///
    /// A second run with the same `now` returns 0.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let removed = self.ledger.purge_expired(now).await?;
        self.sweeps.fetch_add(1, Ordering::Relaxed);
        if removed > 0 {
            tracing::info!(removed, cutoff = %now, "Expired food bags removed");
        } else {
            tracing::debug!(cutoff = %now, "No expired food bags");
        }
        Ok(removed)
    }

    /// One timer-driven sweep. Failures are logged and swallowed so the
    /// schedule keeps running.
    pub async fn sweep(&self) -> Option<u64> {
        match self.run_once(Utc::now()).await {
            Ok(removed) => Some(removed),
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(error = %e, "Expiry sweep failed; will retry on next tick");
                None
            }
        }
    }

    /// Number of successful sweeps so far.
    pub fn sweeps(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    /// Number of failed sweeps so far.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}
