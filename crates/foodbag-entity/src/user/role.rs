//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the marketplace.
///
/// The set is closed: authorization decisions compare against explicit
/// allow-sets of these variants, never against free-form strings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Platform operator. Bypasses ownership checks.
    Admin,
    /// Publishes and manages its own food bags.
    Establishment,
    /// Reserves units of published food bags.
    #[default]
    Client,
}

impl UserRole {
    /// All roles, in declaration order.
    pub const ALL: [UserRole; 3] = [Self::Admin, Self::Establishment, Self::Client];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Establishment => "establishment",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = foodbag_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "establishment" => Ok(Self::Establishment),
            "client" => Ok(Self::Client),
            _ => Err(foodbag_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, establishment, client"
            ))),
        }
    }
}
