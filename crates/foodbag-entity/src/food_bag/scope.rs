//! Ownership scope for food bag reads and mutations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The set of food bags a caller may act on.
///
/// Stores apply the scope inside the same statement as the mutation, so a bag
/// outside the scope is indistinguishable from a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnershipScope {
    /// Every bag.
    Any,
    /// Only bags published by this user.
    OwnedBy(Uuid),
}

impl OwnershipScope {
    /// The owner restriction, if any.
    pub fn owner(&self) -> Option<Uuid> {
        match self {
            Self::Any => None,
            Self::OwnedBy(id) => Some(*id),
        }
    }

    /// Whether a bag owned by `owner_id` falls inside the scope.
    pub fn permits(&self, owner_id: Uuid) -> bool {
        match self {
            Self::Any => true,
            Self::OwnedBy(id) => *id == owner_id,
        }
    }
}
