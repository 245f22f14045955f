use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use storefront_platform_shared::{CouponResponse, DiscountType};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Coupon {
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
    pub updated_at: DateTime<Utc>,
}

const COUPON_COLUMNS: &str = "id, code, description, discount_type, discount_value, \
     min_order_amount, max_discount_amount, valid_from, valid_until, \
     usage_limit, used_count, is_active, created_at, updated_at";

impl Coupon {
    /// Create a new coupon. The code is stored uppercase.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        code: &str,
        description: &str,
        discount_type: DiscountType,
        discount_value: Decimal,
        min_order_amount: Decimal,
        max_discount_amount: Option<Decimal>,
        valid_from: DateTime<Utc>,
        valid_until: DateTime<Utc>,
        usage_limit: Option<i32>,
    ) -> Result<Self, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            r#"
            INSERT INTO coupons
                (code, description, discount_type, discount_value, min_order_amount,
                 max_discount_amount, valid_from, valid_until, usage_limit)
            VALUES (UPPER($1), $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COUPON_COLUMNS}
            "#
        ))
        .bind(code)
        .bind(description)
        .bind(discount_type)
        .bind(discount_value)
        .bind(min_order_amount)
        .bind(max_discount_amount)
        .bind(valid_from)
        .bind(valid_until)
        .bind(usage_limit)
        .fetch_one(pool)
        .await?;

        Ok(coupon)
    }

    /// Find coupon by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(coupon)
    }

    /// Find coupon by code, case-insensitive
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Self>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE code = UPPER($1)"
        ))
        .bind(code)
        .fetch_optional(pool)
        .await?;

        Ok(coupon)
    }

    /// Lock a coupon row while an order redeems it, so the usage limit holds
    /// under concurrent checkouts.
    pub async fn find_by_code_for_update(
        conn: &mut PgConnection,
        code: &str,
    ) -> Result<Option<Self>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE code = UPPER($1) FOR UPDATE"
        ))
        .bind(code)
        .fetch_optional(conn)
        .await?;

        Ok(coupon)
    }

    /// List all coupons, newest first (admin)
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let coupons = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(coupons)
    }

    /// Update fields; absent fields keep their current value
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        description: Option<&str>,
        discount_value: Option<Decimal>,
        min_order_amount: Option<Decimal>,
        max_discount_amount: Option<Decimal>,
        valid_from: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
        usage_limit: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<Option<Self>, AppError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            r#"
            UPDATE coupons
            SET description = COALESCE($2, description),
                discount_value = COALESCE($3, discount_value),
                min_order_amount = COALESCE($4, min_order_amount),
                max_discount_amount = COALESCE($5, max_discount_amount),
                valid_from = COALESCE($6, valid_from),
                valid_until = COALESCE($7, valid_until),
                usage_limit = COALESCE($8, usage_limit),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COUPON_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(description)
        .bind(discount_value)
        .bind(min_order_amount)
        .bind(max_discount_amount)
        .bind(valid_from)
        .bind(valid_until)
        .bind(usage_limit)
        .bind(is_active)
        .fetch_optional(pool)
        .await?;

        Ok(coupon)
    }

    /// Delete a coupon
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count a redemption inside the order transaction
    pub async fn record_redemption(conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE coupons SET used_count = used_count + 1, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Whether the coupon can be applied at the given instant. The validity
    /// window is inclusive on both ends.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        if now < self.valid_from || now > self.valid_until {
            return false;
        }
        match self.usage_limit {
            Some(limit) => self.used_count < limit,
            None => true,
        }
    }

    /// Discount for an order amount, rounded to 2 decimal places. Percentage
    /// discounts are capped by max_discount_amount when present; fixed
    /// discounts never exceed the order amount.
    pub fn calculate_discount(&self, order_amount: Decimal) -> Decimal {
        let discount = match self.discount_type {
            DiscountType::Percentage => {
                let raw = (order_amount * self.discount_value) / Decimal::from(100);
                match self.max_discount_amount {
                    Some(cap) => raw.min(cap),
                    None => raw,
                }
            }
            DiscountType::Fixed => self.discount_value.min(order_amount),
        };

        discount.max(Decimal::ZERO).round_dp(2)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> CouponResponse {
        CouponResponse {
            id: self.id,
            code: self.code.clone(),
            description: self.description.clone(),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            min_order_amount: self.min_order_amount,
            max_discount_amount: self.max_discount_amount,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            usage_limit: self.usage_limit,
            used_count: self.used_count,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn sample_coupon(discount_type: DiscountType, value: Decimal) -> Coupon {
        let now = Utc::now();
        Coupon {
            id: Uuid::new_v4(),
            code: "SAVE20".to_string(),
            description: String::new(),
            discount_type,
            discount_value: value,
            min_order_amount: dec!(500),
            max_discount_amount: None,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(1),
            usage_limit: None,
            used_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn percentage_discount_respects_cap() {
        let mut coupon = sample_coupon(DiscountType::Percentage, dec!(20));
        assert_eq!(coupon.calculate_discount(dec!(1000)), dec!(200.00));

        coupon.max_discount_amount = Some(dec!(150));
        assert_eq!(coupon.calculate_discount(dec!(1000)), dec!(150.00));
    }

    #[test]
    fn fixed_discount_never_exceeds_order_amount() {
        let coupon = sample_coupon(DiscountType::Fixed, dec!(500));
        assert_eq!(coupon.calculate_discount(dec!(300)), dec!(300.00));
        assert_eq!(coupon.calculate_discount(dec!(800)), dec!(500.00));
    }

    #[test]
    fn validity_window_is_inclusive() {
        let mut coupon = sample_coupon(DiscountType::Percentage, dec!(10));
        let boundary = coupon.valid_until;
        assert!(coupon.is_valid_at(boundary));
        assert!(coupon.is_valid_at(coupon.valid_from));
        assert!(!coupon.is_valid_at(boundary + Duration::seconds(1)));

        coupon.is_active = false;
        assert!(!coupon.is_valid_at(boundary));
    }

    #[test]
    fn exhausted_usage_limit_invalidates() {
        let mut coupon = sample_coupon(DiscountType::Percentage, dec!(10));
        coupon.usage_limit = Some(5);
        coupon.used_count = 4;
        assert!(coupon.is_valid_at(Utc::now()));

        coupon.used_count = 5;
        assert!(!coupon.is_valid_at(Utc::now()));
    }
}
