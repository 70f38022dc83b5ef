//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use foodbag_entity::user::{User, UserRole};

/// Identity of the caller for the current request.
///
/// Built by the HTTP layer after the session token validated and the user
/// was re-loaded, then passed into every service method so each operation
/// knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
    /// The user's email.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: impl Into<String>) -> Self {
        Self {
            user_id,
            role,
            email: email.into(),
            request_time: Utc::now(),
        }
    }

    /// Context for an already loaded user.
    pub fn for_user(user: &User) -> Self {
        Self::new(user.id, user.role, user.email.clone())
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
