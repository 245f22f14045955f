use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use storefront_platform_shared::{
    ApiResponse, CreateProductRequest, UpdateProductRequest,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{ProductFilter, ProductSort};
use crate::services::CatalogService;
use crate::utils::validation::{resolve_pagination, validation_errors_to_app_error};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<Uuid>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl ProductListQuery {
    pub fn to_filter(&self, include_inactive: bool) -> ProductFilter {
        ProductFilter {
            category_id: self.category,
            search: self.search.clone(),
            featured: self.featured,
            min_price: self.min_price,
            max_price: self.max_price,
            include_inactive,
            sort: ProductSort::from_param(self.sort.as_deref()),
        }
    }
}

/// Public product listing with filters and pagination
pub async fn list_products(
    query: web::Query<ProductListQuery>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(validation_errors_to_app_error)?;

    debug!("Listing products with query: {:?}", query);

    let (page, limit, offset) = resolve_pagination(query.page, query.limit);
    let listing = catalog_service
        .list_products(query.to_filter(false), page, limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(listing)))
}

/// Featured products for the storefront home page
pub async fn featured_products(
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    let products = catalog_service.featured_products().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(products)))
}

/// One product by ID
pub async fn get_product(
    product_id: web::Path<Uuid>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    let product = catalog_service.get_product(*product_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(product)))
}

/// Create a product (admin)
pub async fn create_product(
    request: web::Json<CreateProductRequest>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let product = catalog_service.create_product(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(product)))
}

/// Update a product (admin)
pub async fn update_product(
    product_id: web::Path<Uuid>,
    request: web::Json<UpdateProductRequest>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    request.validate().map_err(validation_errors_to_app_error)?;

    let product = catalog_service
        .update_product(*product_id, request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(product)))
}

/// Deactivate a product (admin). Past orders keep their snapshots.
pub async fn delete_product(
    product_id: web::Path<Uuid>,
    catalog_service: web::Data<CatalogService>,
) -> Result<HttpResponse, AppError> {
    catalog_service.delete_product(*product_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Product removed")))
}
