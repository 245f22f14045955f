//! Business logic services for the storefront platform.
//!
//! Services own the transactional workflows (order commit, coupon
//! redemption, default-address switches) and translate between request DTOs
//! and model calls. Handlers stay thin on top of these.

pub mod admin_service;
pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod coupon_service;
pub mod notification_service;
pub mod order_service;
pub mod review_service;
pub mod user_service;

pub use admin_service::AdminService;
pub use auth_service::AuthService;
pub use cart_service::CartService;
pub use catalog_service::CatalogService;
pub use coupon_service::CouponService;
pub use notification_service::NotificationService;
pub use order_service::OrderService;
pub use review_service::ReviewService;
pub use user_service::UserService;
