use actix_web::{web, HttpResponse};
use storefront_platform_shared::{
    AddToCartRequest, ApiResponse, UpdateCartItemRequest, SUCCESS_CART_CLEARED,
    SUCCESS_ITEM_ADDED_TO_CART,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::CartService;
use crate::utils::validation::validation_errors_to_app_error;

/// The caller's cart, created lazily on first read
pub async fn get_cart(
    user: AuthenticatedUser,
    cart_service: web::Data<CartService>,
) -> Result<HttpResponse, AppError> {
    let cart = cart_service.get_cart(user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(cart)))
}

/// Add a product to the cart, merging with an existing line
pub async fn add_to_cart(
    user: AuthenticatedUser,
    request: web::Json<AddToCartRequest>,
    cart_service: web::Data<CartService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let cart = cart_service
        .add_item(user.user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(cart, SUCCESS_ITEM_ADDED_TO_CART)))
}

/// Set the quantity of one cart line
pub async fn update_cart_item(
    user: AuthenticatedUser,
    item_id: web::Path<Uuid>,
    request: web::Json<UpdateCartItemRequest>,
    cart_service: web::Data<CartService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let cart = cart_service
        .update_item(user.user_id, *item_id, request.quantity)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(cart)))
}

/// Remove one line from the cart; removing an absent line is a no-op
pub async fn remove_from_cart(
    user: AuthenticatedUser,
    item_id: web::Path<Uuid>,
    cart_service: web::Data<CartService>,
) -> Result<HttpResponse, AppError> {
    let cart = cart_service.remove_item(user.user_id, *item_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(cart)))
}

/// Empty the cart
pub async fn clear_cart(
    user: AuthenticatedUser,
    cart_service: web::Data<CartService>,
) -> Result<HttpResponse, AppError> {
    cart_service.clear(user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message(SUCCESS_CART_CLEARED)))
}
