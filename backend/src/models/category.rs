use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use storefront_platform_shared::CategoryResponse;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: &str,
        description: &str,
        image: &str,
    ) -> Result<Self, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, slug, description, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, slug, description, image, is_active, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(image)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Find category by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, image, is_active, created_at, updated_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Check whether a name or slug is already taken
    pub async fn name_or_slug_exists(
        pool: &PgPool,
        name: &str,
        slug: &str,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE name = $1 OR slug = $2)",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// List active categories, alphabetical
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, slug, description, image, is_active, created_at, updated_at
            FROM categories
            WHERE is_active
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    /// Update fields; absent fields keep their current value
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        description: Option<&str>,
        image: Option<&str>,
        is_active: Option<bool>,
    ) -> Result<Option<Self>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, description, image, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(description)
        .bind(image)
        .bind(is_active)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Delete a category
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of products referencing this category
    pub async fn product_count(pool: &PgPool, id: Uuid) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> CategoryResponse {
        CategoryResponse {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}
