use actix_web::{web, HttpResponse};
use serde::Deserialize;
use storefront_platform_shared::{
    AdminUpdateUserRequest, ApiResponse, OrderStatus, PaginationParams, SUCCESS_USER_UPDATED,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::handlers::products::ProductListQuery;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::{AdminService, CatalogService};
use crate::utils::validation::{resolve_pagination, validation_errors_to_app_error};

#[derive(Debug, Deserialize, Validate)]
pub struct AdminOrderQuery {
    pub status: Option<OrderStatus>,

    #[validate(range(min = 1))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

/// Dashboard headline numbers plus recent orders and low-stock products
pub async fn stats(admin_service: web::Data<AdminService>) -> Result<HttpResponse, AppError> {
    let stats = admin_service.stats().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

pub async fn list_users(
    query: web::Query<PaginationParams>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(validation_errors_to_app_error)?;

    let (page, limit, offset) = resolve_pagination(query.page, query.limit);
    let users = admin_service.list_users(page, limit, offset).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

/// Change a user's role or active flag
pub async fn update_user(
    user_id: web::Path<Uuid>,
    request: web::Json<AdminUpdateUserRequest>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, AppError> {
    let user = admin_service
        .update_user(*user_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(user, SUCCESS_USER_UPDATED)))
}

pub async fn delete_user(
    admin: AuthenticatedUser,
    user_id: web::Path<Uuid>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, AppError> {
    admin_service.delete_user(*user_id, admin.user_id).await?;

    info!("Admin {} deleted user {}", admin.user_id, user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::message("User deleted")))
}

/// Every order in the store, optionally filtered by status
pub async fn list_orders(
    query: web::Query<AdminOrderQuery>,
    admin_service: web::Data<AdminService>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(validation_errors_to_app_error)?;

    let (page, limit, offset) = resolve_pagination(query.page, query.limit);
    let orders = admin_service
        .list_orders(query.status, page, limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(orders)))
}

/// Product listing for the admin catalog screens; includes inactive
/// products the public listing hides.
pub async fn list_products(
    query: web::Query<ProductListQuery>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(validation_errors_to_app_error)?;

    let (page, limit, offset) = resolve_pagination(query.page, query.limit);
    let products = catalog_service
        .list_products(query.to_filter(true), page, limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(products)))
}
