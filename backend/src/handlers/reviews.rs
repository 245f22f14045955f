use actix_web::{web, HttpResponse};
use storefront_platform_shared::{
    ApiResponse, CreateReviewRequest, UpdateReviewRequest, SUCCESS_REVIEW_ADDED,
    SUCCESS_REVIEW_DELETED, SUCCESS_REVIEW_UPDATED,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::ReviewService;
use crate::utils::validation::validation_errors_to_app_error;

/// All reviews for a product, newest first
pub async fn product_reviews(
    product_id: web::Path<Uuid>,
    review_service: web::Data<ReviewService>,
) -> Result<HttpResponse, AppError> {
    let reviews = review_service.list_for_product(*product_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(reviews)))
}

pub async fn create_review(
    user: AuthenticatedUser,
    request: web::Json<CreateReviewRequest>,
    review_service: web::Data<ReviewService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let review = review_service
        .create(user.user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(review, SUCCESS_REVIEW_ADDED)))
}

pub async fn update_review(
    user: AuthenticatedUser,
    review_id: web::Path<Uuid>,
    request: web::Json<UpdateReviewRequest>,
    review_service: web::Data<ReviewService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let review = review_service
        .update(*review_id, user.user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(review, SUCCESS_REVIEW_UPDATED)))
}

/// Authors delete their own reviews; admins can delete any
pub async fn delete_review(
    user: AuthenticatedUser,
    review_id: web::Path<Uuid>,
    review_service: web::Data<ReviewService>,
) -> Result<HttpResponse, AppError> {
    review_service
        .delete(*review_id, user.user_id, user.role)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(SUCCESS_REVIEW_DELETED)))
}
