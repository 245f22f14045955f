use actix_web::{web, HttpResponse};
use storefront_platform_shared::{
    ApiResponse, CancelOrderRequest, CreateOrderRequest, PaginationParams,
    UpdateOrderStatusRequest, SUCCESS_ORDER_CANCELLED, SUCCESS_ORDER_PLACED,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::OrderService;
use crate::utils::validation::{resolve_pagination, validation_errors_to_app_error};

/// Place an order
pub async fn create_order(
    user: AuthenticatedUser,
    request: web::Json<CreateOrderRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    debug!(
        "User {} placing order with {} lines",
        user.user_id,
        request.items.len()
    );

    let order = order_service
        .create_order(user.user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(order, SUCCESS_ORDER_PLACED)))
}

/// The caller's order history
pub async fn my_orders(
    user: AuthenticatedUser,
    query: web::Query<PaginationParams>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(validation_errors_to_app_error)?;

    let (page, limit, offset) = resolve_pagination(query.page, query.limit);
    let orders = order_service
        .my_orders(user.user_id, page, limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(orders)))
}

/// One order. Customers only see their own; admins see any.
pub async fn get_order(
    user: AuthenticatedUser,
    order_id: web::Path<Uuid>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let order = order_service
        .get_order(*order_id, user.user_id, user.role)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(order)))
}

/// Move an order along its lifecycle (admin)
pub async fn update_order_status(
    order_id: web::Path<Uuid>,
    request: web::Json<UpdateOrderStatusRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let order = order_service
        .update_status(*order_id, request.order_status, false)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(order)))
}

/// Force an order into any state, lifecycle aside (admin). Terminal
/// orders still refuse to move.
pub async fn force_order_status(
    order_id: web::Path<Uuid>,
    request: web::Json<UpdateOrderStatusRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let order = order_service
        .update_status(*order_id, request.order_status, true)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(order)))
}

/// Cancel the caller's own order, allowed until it ships
pub async fn cancel_order(
    user: AuthenticatedUser,
    order_id: web::Path<Uuid>,
    request: web::Json<CancelOrderRequest>,
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let order = order_service
        .cancel(*order_id, user.user_id, request.reason.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(order, SUCCESS_ORDER_CANCELLED)))
}
