use crate::types::*;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Uniform response envelope. Success responses carry `data`, failures carry
/// `message`; both sides always carry `success`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

// Auth DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

// User DTOs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(custom = "validate_phone_field")]
    pub phone: Option<String>,

    #[validate(length(max = 500))]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(custom = "validate_phone_field")]
    pub phone: String,

    #[validate(length(min = 1))]
    pub address: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(custom = "validate_pincode_field")]
    pub pincode: String,

    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
}

// Catalog DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(max = 500))]
    pub image: Option<String>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(custom = "validate_non_negative_amount")]
    pub price: Decimal,

    #[validate(custom = "validate_non_negative_amount")]
    pub original_price: Option<Decimal>,

    #[validate(custom = "validate_discount_percent")]
    pub discount: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    pub category: Uuid,

    pub images: Option<Vec<String>>,

    #[validate(range(min = 0))]
    pub stock: i32,

    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(custom = "validate_non_negative_amount")]
    pub price: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub original_price: Option<Decimal>,

    #[validate(custom = "validate_discount_percent")]
    pub discount: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    pub category: Option<Uuid>,

    pub images: Option<Vec<String>>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub discount: Decimal,
    pub brand: String,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub images: Vec<String>,
    pub stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Compact product view shared with client-side storage (wishlist and
/// recently-viewed keep these, not full catalog rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub discount: Decimal,
    pub rating: f64,
}

// Cart DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: Uuid,
    pub product: CartProduct,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: Uuid,
    pub items: Vec<CartItemResponse>,
    pub total_items: i32,
    pub total_price: Decimal,
}

// Coupon DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCouponRequest {
    #[validate(custom = "validate_coupon_code_field")]
    pub code: String,

    #[validate(custom = "validate_non_negative_amount")]
    pub order_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    #[validate(custom = "validate_coupon_code_field")]
    pub code: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub discount_type: DiscountType,

    #[validate(custom = "validate_non_negative_amount")]
    pub discount_value: Decimal,

    #[validate(custom = "validate_non_negative_amount")]
    pub min_order_amount: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub max_discount_amount: Option<Decimal>,

    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,

    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCouponRequest {
    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(custom = "validate_non_negative_amount")]
    pub discount_value: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub min_order_amount: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub max_discount_amount: Option<Decimal>,

    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,

    #[validate(range(min = 1))]
    pub usage_limit: Option<i32>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Decimal,
    pub max_discount_amount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<i32>,
    pub used_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of a coupon dry-run validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponValidation {
    pub coupon_id: Uuid,
    pub code: String,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

// Order DTOs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(custom = "validate_phone_field")]
    pub phone: String,

    #[validate(length(min = 1))]
    pub address: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(custom = "validate_pincode_field")]
    pub pincode: String,
}

// Field validators are kept in this file so the Validate derives stay
// self-contained; the backend maps their codes to user-facing messages.
pub fn validate_phone_field(phone: &str) -> Result<(), validator::ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 10 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("invalid_phone_format"));
    }
    Ok(())
}

pub fn validate_pincode_field(pincode: &str) -> Result<(), validator::ValidationError> {
    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(validator::ValidationError::new("invalid_pincode_format"));
    }
    Ok(())
}

pub fn validate_coupon_code_field(code: &str) -> Result<(), validator::ValidationError> {
    if code.len() < 3 || code.len() > 20 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(validator::ValidationError::new("invalid_coupon_code"));
    }
    Ok(())
}

pub fn validate_non_negative_amount(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if amount.is_sign_negative() {
        return Err(validator::ValidationError::new("negative_amount"));
    }
    Ok(())
}

pub fn validate_discount_percent(discount: &Decimal) -> Result<(), validator::ValidationError> {
    if discount.is_sign_negative() || *discount > Decimal::ONE_HUNDRED {
        return Err(validator::ValidationError::new("invalid_discount_percent"));
    }
    Ok(())
}

/// One requested order line. Only the product reference and quantity are
/// trusted from the client; prices are resolved server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    pub product: Uuid,

    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    #[validate]
    pub items: Vec<OrderItemInput>,

    #[validate]
    pub shipping_address: ShippingAddress,

    pub payment_method: PaymentMethod,

    #[validate(custom = "validate_coupon_code_field")]
    pub coupon_code: Option<String>,

    #[validate(custom = "validate_non_negative_amount")]
    pub items_price: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub shipping_price: Option<Decimal>,

    #[validate(custom = "validate_non_negative_amount")]
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub order_status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CancelOrderRequest {
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    pub coupon_code: Option<String>,
    pub order_status: OrderStatus,
    pub cancel_reason: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Order totals as computed server-side at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
}

// Review DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub product: Uuid,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub is_verified_purchase: bool,
    pub created_at: DateTime<Utc>,
}

// Admin DTOs
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Order row as shown in admin listings and the dashboard recent-orders
/// table; carries the customer name instead of the full item list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub user_name: String,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProduct {
    pub id: Uuid,
    pub name: String,
    pub stock: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total_revenue: Decimal,
    pub total_orders: i64,
    pub total_products: i64,
    pub total_users: i64,
    pub recent_orders: Vec<AdminOrderResponse>,
    pub low_stock_products: Vec<LowStockProduct>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

// Common pagination and filtering
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 1))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            items,
            total,
            page,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_fields() {
        let ok = serde_json::to_value(ApiResponse::ok(5)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], 5);
        assert!(ok.get("message").is_none());

        let err = serde_json::to_value(ApiResponse::error("nope")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["message"], "nope");
        assert!(err.get("data").is_none());
    }

    #[test]
    fn page_count_rounds_up() {
        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 41, 1, 20);
        assert_eq!(page.pages, 3);
        let empty: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 0, 1, 20);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn shipping_address_fields_use_camel_case() {
        let address = ShippingAddress {
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        };
        let json = serde_json::to_value(&address).unwrap();
        assert!(json.get("fullName").is_some());
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn shipping_address_rejects_bad_phone() {
        let address = ShippingAddress {
            full_name: "Asha Rao".to_string(),
            phone: "12ab".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        };
        assert!(address.validate().is_err());
    }
}
