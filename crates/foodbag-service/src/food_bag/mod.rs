//! Food bag inventory.

pub mod ledger;

pub use ledger::{FoodBagQuery, InventoryLedger, NOT_FOUND_OR_DENIED};
