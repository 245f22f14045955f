use actix_web::{web, HttpResponse};
use storefront_platform_shared::{
    ApiResponse, CreateCouponRequest, UpdateCouponRequest, ValidateCouponRequest,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::services::CouponService;
use crate::utils::validation::validation_errors_to_app_error;

/// Dry-run a coupon against an order amount. Nothing is redeemed here;
/// the redemption count moves only when an order commits.
pub async fn validate_coupon(
    request: web::Json<ValidateCouponRequest>,
    coupon_service: web::Data<CouponService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let validation = coupon_service
        .validate(&request.code, request.order_amount)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(validation)))
}

/// All coupons (admin)
pub async fn list_coupons(
    coupon_service: web::Data<CouponService>,
) -> Result<HttpResponse, AppError> {
    let coupons = coupon_service.list_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(coupons)))
}

/// Create a coupon (admin)
pub async fn create_coupon(
    request: web::Json<CreateCouponRequest>,
    coupon_service: web::Data<CouponService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let coupon = coupon_service.create(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(coupon)))
}

/// Update a coupon (admin)
pub async fn update_coupon(
    coupon_id: web::Path<Uuid>,
    request: web::Json<UpdateCouponRequest>,
    coupon_service: web::Data<CouponService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let coupon = coupon_service
        .update(*coupon_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(coupon)))
}

/// Delete a coupon (admin)
pub async fn delete_coupon(
    coupon_id: web::Path<Uuid>,
    coupon_service: web::Data<CouponService>,
) -> Result<HttpResponse, AppError> {
    coupon_service.delete(*coupon_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Coupon removed")))
}
