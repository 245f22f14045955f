use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};
use storefront_platform_shared::ProductResponse;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub discount: Decimal,
    pub brand: String,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort orders accepted by the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl ProductSort {
    /// Parse the `sort` query parameter; anything unrecognized falls back
    /// to newest-first.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("price-low") => Self::PriceAsc,
            Some("price-high") => Self::PriceDesc,
            Some("rating") => Self::Rating,
            _ => Self::Newest,
        }
    }

    fn order_clause(self) -> &'static str {
        match self {
            Self::Newest => "ORDER BY created_at DESC",
            Self::PriceAsc => "ORDER BY price ASC, created_at DESC",
            Self::PriceDesc => "ORDER BY price DESC, created_at DESC",
            Self::Rating => "ORDER BY rating DESC, num_reviews DESC",
        }
    }
}

/// Filters for the product listing. `include_inactive` is only set by the
/// admin listing; the public listing never sees deactivated products.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub include_inactive: bool,
    pub sort: ProductSort,
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, original_price, discount, brand, \
     category_id, images, stock, rating, num_reviews, sizes, colors, tags, \
     is_featured, is_active, created_at, updated_at";

impl Product {
    /// Create a new product
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: &str,
        price: Decimal,
        original_price: Decimal,
        discount: Decimal,
        brand: &str,
        category_id: Uuid,
        images: &[String],
        stock: i32,
        sizes: &[String],
        colors: &[String],
        tags: &[String],
        is_featured: bool,
    ) -> Result<Self, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products
                (name, description, price, original_price, discount, brand, category_id,
                 images, stock, sizes, colors, tags, is_featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(original_price)
        .bind(discount)
        .bind(brand)
        .bind(category_id)
        .bind(images)
        .bind(stock)
        .bind(sizes)
        .bind(colors)
        .bind(tags)
        .bind(is_featured)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Find product by ID regardless of active flag
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Find an active product by ID
    pub async fn find_active_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND is_active"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Lock an active product row for the rest of the transaction. Order
    /// placement locks before checking stock so concurrent orders cannot
    /// both pass the check.
    pub async fn find_active_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND is_active FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(product)
    }

    /// Take stock for an order line. The caller holds the row lock and has
    /// already verified availability.
    pub async fn decrement_stock(
        conn: &mut PgConnection,
        id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE products SET stock = stock - $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(quantity)
            .execute(conn)
            .await?;

        Ok(())
    }

    const FILTER_CONDITIONS: &'static str = "(is_active OR $1)
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%'
                   OR brand ILIKE '%' || $3 || '%'
                   OR $3 = ANY(tags))
              AND ($4::boolean IS NULL OR is_featured = $4)
              AND ($5::numeric IS NULL OR price >= $5)
              AND ($6::numeric IS NULL OR price <= $6)";

    /// List products matching the filter
    pub async fn list(
        pool: &PgPool,
        filter: &ProductFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE {} {} LIMIT $7 OFFSET $8",
            Self::FILTER_CONDITIONS,
            filter.sort.order_clause()
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(filter.include_inactive)
            .bind(filter.category_id)
            .bind(filter.search.as_deref())
            .bind(filter.featured)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(products)
    }

    /// Count products matching the filter
    pub async fn count(pool: &PgPool, filter: &ProductFilter) -> Result<i64, AppError> {
        let sql = format!(
            "SELECT COUNT(*) FROM products WHERE {}",
            Self::FILTER_CONDITIONS
        );

        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.include_inactive)
            .bind(filter.category_id)
            .bind(filter.search.as_deref())
            .bind(filter.featured)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Featured storefront products
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Self>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE is_active AND is_featured
            ORDER BY created_at DESC
            LIMIT $1
            "#
        ))
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Update fields; absent fields keep their current value
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        original_price: Option<Decimal>,
        discount: Option<Decimal>,
        brand: Option<&str>,
        category_id: Option<Uuid>,
        images: Option<&[String]>,
        stock: Option<i32>,
        sizes: Option<&[String]>,
        colors: Option<&[String]>,
        tags: Option<&[String]>,
        is_featured: Option<bool>,
        is_active: Option<bool>,
    ) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                original_price = COALESCE($5, original_price),
                discount = COALESCE($6, discount),
                brand = COALESCE($7, brand),
                category_id = COALESCE($8, category_id),
                images = COALESCE($9, images),
                stock = COALESCE($10, stock),
                sizes = COALESCE($11, sizes),
                colors = COALESCE($12, colors),
                tags = COALESCE($13, tags),
                is_featured = COALESCE($14, is_featured),
                is_active = COALESCE($15, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(original_price)
        .bind(discount)
        .bind(brand)
        .bind(category_id)
        .bind(images)
        .bind(stock)
        .bind(sizes)
        .bind(colors)
        .bind(tags)
        .bind(is_featured)
        .bind(is_active)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Deactivate a product. Orders keep their item snapshots; carts prune
    /// deactivated products on the next read.
    pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE products SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the denormalized rating aggregate
    pub async fn set_rating(
        pool: &PgPool,
        id: Uuid,
        rating: f64,
        num_reviews: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE products SET rating = $2, num_reviews = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(rating)
        .bind(num_reviews)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Total number of products (admin dashboard)
    pub async fn count_all(pool: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Active products running low on stock, lowest first (admin dashboard)
    pub async fn list_low_stock(
        pool: &PgPool,
        threshold: i32,
        limit: i64,
    ) -> Result<Vec<Self>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE is_active AND stock < $1
            ORDER BY stock ASC, name ASC
            LIMIT $2
            "#
        ))
        .bind(threshold)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    pub fn primary_image(&self) -> Option<String> {
        self.images.first().cloned()
    }

    /// Convert to full response DTO
    pub fn to_response(&self, category_name: Option<String>) -> ProductResponse {
        ProductResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            brand: self.brand.clone(),
            category_id: self.category_id,
            category_name,
            images: self.images.clone(),
            stock: self.stock,
            rating: self.rating,
            num_reviews: self.num_reviews,
            sizes: self.sizes.clone(),
            colors: self.colors.clone(),
            tags: self.tags.clone(),
            is_featured: self.is_featured,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
