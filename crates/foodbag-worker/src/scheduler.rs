//! Timer that drives the expiry reaper independently of request handling.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use foodbag_core::config::ReaperConfig;
use foodbag_core::error::AppError;

use crate::jobs::ExpiryReaper;

/// Runs [`ExpiryReaper::sweep`] on a fixed period.
pub struct ReaperScheduler {
    scheduler: JobScheduler,
    reaper: Arc<ExpiryReaper>,
    config: ReaperConfig,
}

impl std::fmt::Debug for ReaperScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaperScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl ReaperScheduler {
    /// Create a scheduler for the given reaper.
    pub async fn new(reaper: Arc<ExpiryReaper>, config: ReaperConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            reaper,
            config,
        })
    }

    /// Register the periodic sweep and start ticking.
    ///
    /// With `run_on_startup`, one sweep runs before this returns.
    pub async fn start(&self) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::info!("Expiry reaper disabled");
            return Ok(());
        }

        if self.config.run_on_startup {
            self.reaper.sweep().await;
        }

        let interval = self.config.interval();
        let reaper = Arc::clone(&self.reaper);
        let job = CronJob::new_repeated_async(interval, move |_uuid, _lock| {
            let reaper = Arc::clone(&reaper);
            Box::pin(async move {
                reaper.sweep().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create expiry schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add expiry schedule: {e}")))?;

        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!(
            interval_seconds = interval.as_secs(),
            "Expiry reaper scheduled"
        );
        Ok(())
    }

    /// Stop the scheduler. Sweeps already running finish on their own.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Expiry reaper stopped");
        Ok(())
    }
}
