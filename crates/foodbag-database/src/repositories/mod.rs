//! PostgreSQL implementations of the store traits.

pub mod booking;
pub mod food_bag;
pub mod user;

pub use booking::BookingRepository;
pub use food_bag::FoodBagRepository;
pub use user::UserRepository;
