use actix_web::{web, HttpResponse};
use storefront_platform_shared::{ApiResponse, CreateCategoryRequest, UpdateCategoryRequest};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::services::CatalogService;
use crate::utils::validation::validation_errors_to_app_error;

/// Active categories for the storefront navigation
pub async fn list_categories(
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    let categories = catalog_service.list_categories().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// One category by ID
pub async fn get_category(
    category_id: web::Path<Uuid>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    let category = catalog_service.get_category(*category_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

/// Create a category (admin)
pub async fn create_category(
    request: web::Json<CreateCategoryRequest>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let category = catalog_service
        .create_category(request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(category)))
}

/// Update a category (admin)
pub async fn update_category(
    category_id: web::Path<Uuid>,
    request: web::Json<UpdateCategoryRequest>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let category = catalog_service
        .update_category(*category_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(category)))
}

/// Delete a category (admin). Refused while products still reference it.
pub async fn delete_category(
    category_id: web::Path<Uuid>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    catalog_service.delete_category(*category_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Category removed")))
}
