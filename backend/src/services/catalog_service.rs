use std::collections::HashMap;

use sqlx::PgPool;
use storefront_platform_shared::{
    CategoryResponse, CreateCategoryRequest, CreateProductRequest, PaginatedResponse,
    ProductResponse, UpdateCategoryRequest, UpdateProductRequest, ERROR_CATEGORY_NOT_FOUND,
    ERROR_PRODUCT_NOT_FOUND, FEATURED_PRODUCT_LIMIT,
};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Category, Product, ProductFilter};

#[cfg(test)]
mod tests;

/// Catalog reads and admin CRUD for categories and products.
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
}

/// URL slug for a category name: lowercase, whitespace runs become hyphens.
/// Other characters pass through untouched.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Categories

    /// Active categories, alphabetical
    pub async fn list_categories(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let categories = Category::list_active(&self.pool).await?;
        Ok(categories.iter().map(Category::to_response).collect())
    }

    /// One category by ID
    pub async fn get_category(&self, id: Uuid) -> Result<CategoryResponse, AppError> {
        let category = Category::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_CATEGORY_NOT_FOUND.to_string()))?;

        Ok(category.to_response())
    }

    /// Create a category with a derived slug
    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        let slug = slugify(&request.name);

        if Category::name_or_slug_exists(&self.pool, &request.name, &slug).await? {
            return Err(AppError::Conflict(
                "A category with this name already exists".to_string(),
            ));
        }

        let category = Category::create(
            &self.pool,
            &request.name,
            &slug,
            request.description.as_deref().unwrap_or(""),
            request.image.as_deref().unwrap_or(""),
        )
        .await?;

        info!(category_id = %category.id, "Category created: {}", category.name);

        Ok(category.to_response())
    }

    /// Update a category; renaming re-derives the slug
    pub async fn update_category(
        &self,
        id: Uuid,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        let slug = request.name.as_deref().map(slugify);

        let category = Category::update(
            &self.pool,
            id,
            request.name.as_deref(),
            slug.as_deref(),
            request.description.as_deref(),
            request.image.as_deref(),
            request.is_active,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_CATEGORY_NOT_FOUND.to_string()))?;

        info!(category_id = %id, "Category updated");

        Ok(category.to_response())
    }

    /// Delete a category that has no products
    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        if Category::find_by_id(&self.pool, id).await?.is_none() {
            return Err(AppError::NotFound(ERROR_CATEGORY_NOT_FOUND.to_string()));
        }

        let products = Category::product_count(&self.pool, id).await?;
        if products > 0 {
            return Err(AppError::Conflict(format!(
                "Category still has {} products",
                products
            )));
        }

        Category::delete(&self.pool, id).await?;
        info!(category_id = %id, "Category deleted");

        Ok(())
    }

    // Products

    /// Paginated product listing
    pub async fn list_products(
        &self,
        filter: ProductFilter,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<PaginatedResponse<ProductResponse>, AppError> {
        let products = Product::list(&self.pool, &filter, limit, offset).await?;
        let total = Product::count(&self.pool, &filter).await?;

        debug!(total, page, "Listed products");

        let responses = self.attach_category_names(products).await?;
        Ok(PaginatedResponse::new(responses, total, page, limit))
    }

    /// One product by ID; inactive products stay visible by direct link for
    /// order-history references, the listing filters them out
    pub async fn get_product(&self, id: Uuid) -> Result<ProductResponse, AppError> {
        let product = Product::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()))?;

        let category_name = Category::find_by_id(&self.pool, product.category_id)
            .await?
            .map(|c| c.name);

        Ok(product.to_response(category_name))
    }

    /// Featured storefront products
    pub async fn featured_products(&self) -> Result<Vec<ProductResponse>, AppError> {
        let products = Product::list_featured(&self.pool, FEATURED_PRODUCT_LIMIT).await?;
        self.attach_category_names(products).await
    }

    /// Create a product under an existing category
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        let category = Category::find_by_id(&self.pool, request.category)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_CATEGORY_NOT_FOUND.to_string()))?;

        let product = Product::create(
            &self.pool,
            &request.name,
            &request.description,
            request.price,
            request.original_price.unwrap_or(Decimal::ZERO),
            request.discount.unwrap_or(Decimal::ZERO),
            &request.brand,
            category.id,
            request.images.as_deref().unwrap_or(&[]),
            request.stock,
            request.sizes.as_deref().unwrap_or(&[]),
            request.colors.as_deref().unwrap_or(&[]),
            request.tags.as_deref().unwrap_or(&[]),
            request.is_featured.unwrap_or(false),
        )
        .await?;

        info!(product_id = %product.id, "Product created: {}", product.name);

        Ok(product.to_response(Some(category.name)))
    }

    /// Update a product; a new category reference must exist
    pub async fn update_product(
        &self,
        id: Uuid,
        request: UpdateProductRequest,
    ) -> Result<ProductResponse, AppError> {
        if let Some(category_id) = request.category {
            Category::find_by_id(&self.pool, category_id)
                .await?
                .ok_or_else(|| AppError::NotFound(ERROR_CATEGORY_NOT_FOUND.to_string()))?;
        }

        let product = Product::update(
            &self.pool,
            id,
            request.name.as_deref(),
            request.description.as_deref(),
            request.price,
            request.original_price,
            request.discount,
            request.brand.as_deref(),
            request.category,
            request.images.as_deref(),
            request.stock,
            request.sizes.as_deref(),
            request.colors.as_deref(),
            request.tags.as_deref(),
            request.is_featured,
            request.is_active,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()))?;

        info!(product_id = %id, "Product updated");

        let category_name = Category::find_by_id(&self.pool, product.category_id)
            .await?
            .map(|c| c.name);

        Ok(product.to_response(category_name))
    }

    /// Soft-delete a product
    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        if !Product::deactivate(&self.pool, id).await? {
            return Err(AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()));
        }

        info!(product_id = %id, "Product deactivated");

        Ok(())
    }

    /// Resolve category names for a batch of products in one query
    async fn attach_category_names(
        &self,
        products: Vec<Product>,
    ) -> Result<Vec<ProductResponse>, AppError> {
        let mut category_ids: Vec<Uuid> = products.iter().map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let names: HashMap<Uuid, String> =
            sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM categories WHERE id = ANY($1)")
                .bind(&category_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .collect();

        Ok(products
            .into_iter()
            .map(|p| {
                let name = names.get(&p.category_id).cloned();
                p.to_response(name)
            })
            .collect())
    }
}
