//! Startup seeding configuration.

use serde::{Deserialize, Serialize};

/// Data seeded when the server starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Create the administrator account if it does not exist yet.
    #[serde(default = "default_true")]
    pub seed_admin: bool,
    /// Administrator login.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Administrator initial password. Change it after first login.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            seed_admin: default_true(),
            admin_email: default_admin_email(),
            admin_password: default_admin_password(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_admin_email() -> String {
    "admin@admin".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}
