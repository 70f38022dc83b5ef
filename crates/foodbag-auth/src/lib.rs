//! # foodbag-auth
//!
//! Authentication and authorization for the FoodBag marketplace.
//!
//! ## Modules
//!
//! - `jwt`: signed session token issuance, validation and header/cookie transport
//! - `password`: Argon2id password hashing and registration policy
//! - `rbac`: role allow-sets and ownership scoping

pub mod error;
pub mod jwt;
pub mod password;
pub mod rbac;

pub use error::TokenError;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::AuthorizationGuard;
