//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod food_bag;
pub mod health;
pub mod user;
