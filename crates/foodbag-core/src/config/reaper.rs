//! Expired food bag sweeper configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Periodic expiry sweep configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaperConfig {
    /// Whether the periodic sweep is scheduled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between sweeps.
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    /// Run one sweep immediately at startup, before the first tick.
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

impl ReaperConfig {
    /// The sweep period.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds.max(1))
    }
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_seconds: default_interval(),
            run_on_startup: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    3600
}
