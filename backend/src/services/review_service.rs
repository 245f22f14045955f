use sqlx::PgPool;
use storefront_platform_shared::{
    CreateReviewRequest, ReviewResponse, UpdateReviewRequest, UserRole, ERROR_ALREADY_REVIEWED,
    ERROR_PRODUCT_NOT_FOUND, ERROR_REVIEW_NOT_FOUND,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Order, Product, Review, ReviewRow};

/// One decimal place, matching what product cards display.
pub fn round_rating(average: f64) -> f64 {
    (average * 10.0).round() / 10.0
}

/// Product reviews and the denormalized rating aggregate on the product
/// row. Every write ends by recomputing that aggregate.
#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reviews for a product, newest first. Unknown products simply have
    /// no reviews.
    pub async fn list_for_product(&self, product_id: Uuid) -> Result<Vec<ReviewResponse>, AppError> {
        let rows = ReviewRow::list_for_product(&self.pool, product_id).await?;

        Ok(rows.iter().map(ReviewRow::to_response).collect())
    }

    /// Create a review, one per user per product. The verified-purchase
    /// badge is earned by a delivered order containing the product.
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let product = Product::find_by_id(&self.pool, request.product)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()))?;

        if Review::exists_for(&self.pool, user_id, product.id).await? {
            return Err(AppError::DuplicateReview(ERROR_ALREADY_REVIEWED.to_string()));
        }

        let verified = Order::has_delivered_product(&self.pool, user_id, product.id).await?;
        let review = Review::create(
            &self.pool,
            user_id,
            product.id,
            request.rating,
            &request.comment,
            verified,
        )
        .await?;

        self.recompute_product_rating(product.id).await?;

        info!(
            review_id = %review.id,
            product_id = %product.id,
            user_id = %user_id,
            verified,
            "Review created"
        );

        self.joined_response(review.id).await
    }

    /// Update a review. Only the author may edit.
    pub async fn update(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        request: UpdateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        let review = Review::find_by_id(&self.pool, review_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_REVIEW_NOT_FOUND.to_string()))?;

        if review.user_id != user_id {
            return Err(AppError::Forbidden(
                "You can only edit your own reviews".to_string(),
            ));
        }

        Review::update(&self.pool, review_id, request.rating, &request.comment)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_REVIEW_NOT_FOUND.to_string()))?;

        self.recompute_product_rating(review.product_id).await?;

        info!(review_id = %review_id, "Review updated");

        self.joined_response(review_id).await
    }

    /// Delete a review. The author or an admin may remove it.
    pub async fn delete(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<(), AppError> {
        let review = Review::find_by_id(&self.pool, review_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_REVIEW_NOT_FOUND.to_string()))?;

        if review.user_id != user_id && role != UserRole::Admin {
            return Err(AppError::Forbidden(
                "You can only delete your own reviews".to_string(),
            ));
        }

        Review::delete(&self.pool, review_id).await?;
        self.recompute_product_rating(review.product_id).await?;

        info!(review_id = %review_id, "Review deleted");

        Ok(())
    }

    /// Recompute the product's rating aggregate from scratch. A product
    /// with no reviews left goes back to an unrated zero, not the listing
    /// default it started with.
    async fn recompute_product_rating(&self, product_id: Uuid) -> Result<(), AppError> {
        let (average, count) = Review::aggregate_for_product(&self.pool, product_id).await?;
        let rating = if count == 0 {
            0.0
        } else {
            round_rating(average)
        };

        Product::set_rating(&self.pool, product_id, rating, count as i32).await?;
        debug!(product_id = %product_id, rating, count, "Recomputed product rating");

        Ok(())
    }

    async fn joined_response(&self, review_id: Uuid) -> Result<ReviewResponse, AppError> {
        let row = ReviewRow::find_by_id(&self.pool, review_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_REVIEW_NOT_FOUND.to_string()))?;

        Ok(row.to_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_rounds_to_one_decimal() {
        assert_eq!(round_rating(4.25), 4.3);
        assert_eq!(round_rating(10.0 / 3.0), 3.3);
        assert_eq!(round_rating(5.0), 5.0);
    }
}
