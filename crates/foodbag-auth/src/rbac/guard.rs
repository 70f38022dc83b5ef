//! Authorization decisions evaluated before any mutation.
//!
//! Two checks compose per endpoint:
//!
//! - **Role**: the caller's role must belong to the endpoint's allow-set.
//!   Failure is an explicit `Forbidden`.
//! - **Ownership**: non-admin callers only reach their own food bags. Failure
//!   is reported as "not found", so an outsider cannot tell a foreign bag from
//!   a missing one.

use uuid::Uuid;

use foodbag_core::error::AppError;
use foodbag_entity::food_bag::OwnershipScope;
use foodbag_entity::user::UserRole;

/// Roles allowed to publish and manage food bags.
pub const PUBLISHERS: &[UserRole] = &[UserRole::Establishment, UserRole::Admin];

/// Roles allowed to administer users and trigger maintenance.
pub const ADMINISTRATORS: &[UserRole] = &[UserRole::Admin];

/// Roles allowed to book food bags.
pub const BOOKERS: &[UserRole] = &[UserRole::Client];

/// Stateless authorization guard.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    /// Creates a new guard.
    pub fn new() -> Self {
        Self
    }

    /// Whether `role` belongs to `allowed`.
    pub fn has_role(&self, role: UserRole, allowed: &[UserRole]) -> bool {
        allowed.contains(&role)
    }

    /// Fail with `Forbidden` unless `role` belongs to `allowed`.
    pub fn require_role(&self, role: UserRole, allowed: &[UserRole]) -> Result<(), AppError> {
        if self.has_role(role, allowed) {
            Ok(())
        } else {
            Err(AppError::forbidden("Not enough permissions"))
        }
    }

    /// The food bags this caller may update or delete.
    pub fn ownership_scope(&self, user_id: Uuid, role: UserRole) -> OwnershipScope {
        if role.is_admin() {
            OwnershipScope::Any
        } else {
            OwnershipScope::OwnedBy(user_id)
        }
    }

    /// The owner restriction forced on listings and reads.
    ///
    /// Establishments only ever see their own bags, whatever the request asks
    /// for. Clients and admins browse everything.
    pub fn listing_owner(&self, user_id: Uuid, role: UserRole) -> Option<Uuid> {
        match role {
            UserRole::Establishment => Some(user_id),
            UserRole::Admin | UserRole::Client => None,
        }
    }
}
