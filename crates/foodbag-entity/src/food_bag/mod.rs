//! Food bag domain entities.

pub mod model;
pub mod scope;

pub use model::{DEFAULT_PHOTO_URL, FoodBag, FoodBagFields};
pub use scope::OwnershipScope;
