use rust_decimal::Decimal;
use std::time::Duration;

// JWT Configuration
pub const JWT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// Pricing
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(9900, 0, 0, false, 2); // 99.00 flat

// Catalog
pub const FEATURED_PRODUCT_LIMIT: i64 = 8;
pub const LOW_STOCK_THRESHOLD: i32 = 10;
pub const LOW_STOCK_PRODUCT_LIMIT: i64 = 10;
pub const RECENT_ORDERS_LIMIT: i64 = 10;

// Client-side storage
pub const RECENTLY_VIEWED_CAPACITY: usize = 10;
pub const WISHLIST_STORAGE_KEY: &str = "wishlist";
pub const RECENTLY_VIEWED_STORAGE_KEY: &str = "recently_viewed";

// Database connection pool
pub const DB_MAX_CONNECTIONS: u32 = 20;
pub const DB_MIN_CONNECTIONS: u32 = 5;
pub const DB_CONNECTION_TIMEOUT_SECONDS: u64 = 30;

// Success messages
pub const SUCCESS_USER_CREATED: &str = "User registered successfully";
pub const SUCCESS_LOGIN: &str = "Login successful";
pub const SUCCESS_PROFILE_UPDATED: &str = "Profile updated successfully";
pub const SUCCESS_USER_UPDATED: &str = "User updated successfully";
pub const SUCCESS_ADDRESS_ADDED: &str = "Address added successfully";
pub const SUCCESS_ADDRESS_UPDATED: &str = "Address updated successfully";
pub const SUCCESS_ADDRESS_DELETED: &str = "Address deleted successfully";
pub const SUCCESS_ITEM_ADDED_TO_CART: &str = "Item added to cart";
pub const SUCCESS_CART_CLEARED: &str = "Cart cleared";
pub const SUCCESS_ORDER_PLACED: &str = "Order placed successfully";
pub const SUCCESS_ORDER_CANCELLED: &str = "Order cancelled successfully";
pub const SUCCESS_REVIEW_ADDED: &str = "Review added successfully";
pub const SUCCESS_REVIEW_UPDATED: &str = "Review updated successfully";
pub const SUCCESS_REVIEW_DELETED: &str = "Review deleted successfully";

// Error messages
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const ERROR_EMAIL_ALREADY_EXISTS: &str = "Email address is already registered";
pub const ERROR_USER_NOT_FOUND: &str = "User not found";
pub const ERROR_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const ERROR_CATEGORY_NOT_FOUND: &str = "Category not found";
pub const ERROR_CART_NOT_FOUND: &str = "Cart not found";
pub const ERROR_ORDER_NOT_FOUND: &str = "Order not found";
pub const ERROR_REVIEW_NOT_FOUND: &str = "Review not found";
pub const ERROR_ADDRESS_NOT_FOUND: &str = "Address not found";
pub const ERROR_INVALID_COUPON: &str = "Invalid coupon code";
pub const ERROR_COUPON_EXPIRED: &str = "Coupon is expired or invalid";
pub const ERROR_ALREADY_REVIEWED: &str = "You have already reviewed this product";
pub const ERROR_INVALID_TOKEN: &str = "Invalid or expired token";
pub const ERROR_ACCOUNT_DISABLED: &str = "Account has been disabled";
pub const ERROR_INSUFFICIENT_PERMISSIONS: &str = "Insufficient permissions";
