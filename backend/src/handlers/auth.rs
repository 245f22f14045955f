use actix_web::{web, HttpResponse};
use storefront_platform_shared::{
    ApiResponse, LoginRequest, RegisterRequest, SUCCESS_LOGIN, SUCCESS_USER_CREATED,
};
use tracing::debug;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::AuthService;
use crate::utils::validation::validation_errors_to_app_error;

/// Register a new account
pub async fn register(
    request: web::Json<RegisterRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let auth = auth_service.register(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(auth, SUCCESS_USER_CREATED)))
}

/// Log in with email and password
pub async fn login(
    request: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let auth = auth_service.login(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(auth, SUCCESS_LOGIN)))
}

/// Current user from the bearer token
pub async fn me(
    user: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    debug!("Fetching profile for user {}", user.user_id);

    let profile = auth_service.me(user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile)))
}
