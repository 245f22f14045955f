use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use storefront_platform_shared::ReviewResponse;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub is_verified_purchase: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Review joined with the author's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
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

impl Review {
    /// Create a review
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        product_id: Uuid,
        rating: i32,
        comment: &str,
        is_verified_purchase: bool,
    ) -> Result<Self, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (user_id, product_id, rating, comment, is_verified_purchase)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, product_id, rating, comment, is_verified_purchase,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(rating)
        .bind(comment)
        .bind(is_verified_purchase)
        .fetch_one(pool)
        .await?;

        Ok(review)
    }

    /// Find review by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, user_id, product_id, rating, comment, is_verified_purchase,
                   created_at, updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(review)
    }

    /// Whether the user has already reviewed the product
    pub async fn exists_for(
        pool: &PgPool,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM reviews WHERE user_id = $1 AND product_id = $2)",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Update rating and comment
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        rating: i32,
        comment: &str,
    ) -> Result<Option<Self>, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = $2, comment = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, product_id, rating, comment, is_verified_purchase,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(comment)
        .fetch_optional(pool)
        .await?;

        Ok(review)
    }

    /// Delete a review
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mean rating and count for a product. Returns (0.0, 0) when the
    /// product has no reviews.
    pub async fn aggregate_for_product(
        pool: &PgPool,
        product_id: Uuid,
    ) -> Result<(f64, i64), AppError> {
        let row = sqlx::query_as::<_, (Option<f64>, i64)>(
            "SELECT AVG(rating)::float8, COUNT(*) FROM reviews WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(pool)
        .await?;

        Ok((row.0.unwrap_or(0.0), row.1))
    }
}

impl ReviewRow {
    /// Reviews for a product with author info, newest first
    pub async fn list_for_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<Self>, AppError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, r.user_id, u.name AS user_name, u.avatar AS user_avatar,
                   r.product_id, r.rating, r.comment, r.is_verified_purchase, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// One review with author info
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.id, r.user_id, u.name AS user_name, u.avatar AS user_avatar,
                   r.product_id, r.rating, r.comment, r.is_verified_purchase, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> ReviewResponse {
        ReviewResponse {
            id: self.id,
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            user_avatar: self.user_avatar.clone(),
            product_id: self.product_id,
            rating: self.rating,
            comment: self.comment.clone(),
            is_verified_purchase: self.is_verified_purchase,
            created_at: self.created_at,
        }
    }
}
