use actix_web::{web, HttpResponse};
use storefront_platform_shared::{
    AddressRequest, ApiResponse, UpdateProfileRequest, SUCCESS_ADDRESS_ADDED,
    SUCCESS_ADDRESS_DELETED, SUCCESS_ADDRESS_UPDATED, SUCCESS_PROFILE_UPDATED,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::UserService;
use crate::utils::validation::validation_errors_to_app_error;

/// Get the caller's profile
pub async fn get_profile(
    user: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let profile = user_service.get_profile(user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile)))
}

/// Update name, phone or avatar
pub async fn update_profile(
    user: AuthenticatedUser,
    request: web::Json<UpdateProfileRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let profile = user_service
        .update_profile(user.user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(profile, SUCCESS_PROFILE_UPDATED)))
}

/// List the caller's saved addresses, default first
pub async fn list_addresses(
    user: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let addresses = user_service.list_addresses(user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(addresses)))
}

/// Add an address; responds with the full updated list
pub async fn add_address(
    user: AuthenticatedUser,
    request: web::Json<AddressRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let addresses = user_service
        .add_address(user.user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(addresses, SUCCESS_ADDRESS_ADDED)))
}

/// Update one of the caller's addresses
pub async fn update_address(
    user: AuthenticatedUser,
    address_id: web::Path<Uuid>,
    request: web::Json<AddressRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let addresses = user_service
        .update_address(user.user_id, *address_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(addresses, SUCCESS_ADDRESS_UPDATED)))
}

/// Delete one of the caller's addresses
pub async fn delete_address(
    user: AuthenticatedUser,
    address_id: web::Path<Uuid>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let addresses = user_service
        .delete_address(user.user_id, *address_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(addresses, SUCCESS_ADDRESS_DELETED)))
}
