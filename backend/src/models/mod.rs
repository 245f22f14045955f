//! Database models for the storefront platform.
//!
//! Each model corresponds to a database table and provides type-safe CRUD
//! operations using sqlx. Multi-step mutations that must stay atomic (stock
//! decrements, coupon redemption, default-address switches) live in the
//! service layer inside explicit transactions.

pub mod cart;
pub mod category;
pub mod coupon;
pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use cart::{Cart, CartItem, CartItemRow};
pub use category::Category;
pub use coupon::Coupon;
pub use order::{AdminOrderRow, Order, OrderItem};
pub use product::{Product, ProductFilter, ProductSort};
pub use review::{Review, ReviewRow};
pub use user::{User, UserAddress};
