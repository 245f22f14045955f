use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_platform_shared::{
    CouponResponse, CouponValidation, CreateCouponRequest, UpdateCouponRequest,
    ERROR_COUPON_EXPIRED, ERROR_INVALID_COUPON,
};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Coupon;

/// Coupon dry-run validation and admin CRUD. Redemption (the used_count
/// increment) happens only inside the order transaction, never here.
#[derive(Clone)]
pub struct CouponService {
    pool: PgPool,
}

impl CouponService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Dry-run validation against an order amount. Computes the discount a
    /// coupon would give without consuming a use.
    pub async fn validate(
        &self,
        code: &str,
        order_amount: Decimal,
    ) -> Result<CouponValidation, AppError> {
        let coupon = Coupon::find_by_code(&self.pool, code)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_INVALID_COUPON.to_string()))?;

        if !coupon.is_valid_at(Utc::now()) {
            return Err(AppError::InvalidCoupon(ERROR_COUPON_EXPIRED.to_string()));
        }

        if order_amount < coupon.min_order_amount {
            return Err(AppError::BelowMinimumOrder(format!(
                "Minimum order amount of {} required",
                coupon.min_order_amount
            )));
        }

        let discount = coupon.calculate_discount(order_amount);

        Ok(CouponValidation {
            coupon_id: coupon.id,
            code: coupon.code,
            discount,
            final_amount: order_amount - discount,
        })
    }

    /// All coupons, newest first (admin)
    pub async fn list_all(&self) -> Result<Vec<CouponResponse>, AppError> {
        let coupons = Coupon::list_all(&self.pool).await?;
        Ok(coupons.iter().map(Coupon::to_response).collect())
    }

    /// Create a coupon (admin)
    pub async fn create(&self, request: CreateCouponRequest) -> Result<CouponResponse, AppError> {
        if request.valid_until < request.valid_from {
            return Err(AppError::Validation(
                "Coupon validity window ends before it starts".to_string(),
            ));
        }

        if Coupon::find_by_code(&self.pool, &request.code).await?.is_some() {
            return Err(AppError::Conflict(
                "A coupon with this code already exists".to_string(),
            ));
        }

        let coupon = Coupon::create(
            &self.pool,
            &request.code,
            request.description.as_deref().unwrap_or(""),
            request.discount_type,
            request.discount_value,
            request.min_order_amount.unwrap_or(Decimal::ZERO),
            request.max_discount_amount,
            request.valid_from,
            request.valid_until,
            request.usage_limit,
        )
        .await?;

        info!(coupon_id = %coupon.id, "Coupon created: {}", coupon.code);

        Ok(coupon.to_response())
    }

    /// Update a coupon (admin)
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCouponRequest,
    ) -> Result<CouponResponse, AppError> {
        let existing = Coupon::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

        let valid_from = request.valid_from.unwrap_or(existing.valid_from);
        let valid_until = request.valid_until.unwrap_or(existing.valid_until);
        if valid_until < valid_from {
            return Err(AppError::Validation(
                "Coupon validity window ends before it starts".to_string(),
            ));
        }

        let coupon = Coupon::update(
            &self.pool,
            id,
            request.description.as_deref(),
            request.discount_value,
            request.min_order_amount,
            request.max_discount_amount,
            request.valid_from,
            request.valid_until,
            request.usage_limit,
            request.is_active,
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;

        info!(coupon_id = %id, "Coupon updated");

        Ok(coupon.to_response())
    }

    /// Delete a coupon (admin)
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !Coupon::delete(&self.pool, id).await? {
            return Err(AppError::NotFound("Coupon not found".to_string()));
        }

        info!(coupon_id = %id, "Coupon deleted");

        Ok(())
    }
}
