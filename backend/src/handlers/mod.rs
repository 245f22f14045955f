//! HTTP handlers. Thin request/response shells over the services; routing
//! lives in main.rs.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod coupons;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
