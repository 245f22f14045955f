use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use storefront_platform_shared::{CartItemResponse, CartProduct};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart item joined with the live product columns the storefront needs.
/// `price` is the unit price captured when the item was added; the product's
/// current price and stock ride along for display and quantity capping.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub name: String,
    pub brand: String,
    pub image: Option<String>,
    pub current_price: Decimal,
    pub stock: i32,
}

impl Cart {
    /// Find a user's cart
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, AppError> {
        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, created_at, updated_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(cart)
    }

    /// Fetch the user's cart, creating an empty one on first touch. The
    /// upsert keeps concurrent first requests from racing on the unique
    /// user_id constraint.
    pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> Result<Self, AppError> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = NOW()
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(cart)
    }
}

impl CartItem {
    /// Find an item within a specific cart
    pub async fn find_in_cart(
        pool: &PgPool,
        item_id: Uuid,
        cart_id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT id, cart_id, product_id, quantity, price, created_at, updated_at
            FROM cart_items
            WHERE id = $1 AND cart_id = $2
            "#,
        )
        .bind(item_id)
        .bind(cart_id)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Quantity currently held for a product, 0 if absent
    pub async fn quantity_of(
        pool: &PgPool,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<i32, AppError> {
        let quantity = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT SUM(quantity)::int FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_one(pool)
        .await?;

        Ok(quantity.unwrap_or(0))
    }

    /// Add a product to the cart, merging quantity when the product is
    /// already present. The stored unit price follows the latest add.
    pub async fn upsert_add(
        pool: &PgPool,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        price: Decimal,
    ) -> Result<Self, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity, price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cart_id, product_id) DO UPDATE
                SET quantity = cart_items.quantity + EXCLUDED.quantity,
                    price = EXCLUDED.price,
                    updated_at = NOW()
            RETURNING id, cart_id, product_id, quantity, price, created_at, updated_at
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .bind(price)
        .fetch_one(pool)
        .await?;

        Ok(item)
    }

    /// Set an item's absolute quantity
    pub async fn set_quantity(
        pool: &PgPool,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<Option<Self>, AppError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, cart_id, product_id, quantity, price, created_at, updated_at
            "#,
        )
        .bind(item_id)
        .bind(quantity)
        .fetch_optional(pool)
        .await?;

        Ok(item)
    }

    /// Remove an item from the cart; no-op when already gone
    pub async fn remove(pool: &PgPool, item_id: Uuid, cart_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND cart_id = $2")
            .bind(item_id)
            .bind(cart_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every item in the cart
    pub async fn clear(pool: &PgPool, cart_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Drop items whose product has been deactivated or removed
    pub async fn prune_unavailable(pool: &PgPool, cart_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_items
            WHERE cart_id = $1
              AND product_id IN (SELECT id FROM products WHERE NOT is_active)
            "#,
        )
        .bind(cart_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl CartItemRow {
    /// Load the cart's items with product details, oldest first
    pub async fn list_for_cart(pool: &PgPool, cart_id: Uuid) -> Result<Vec<Self>, AppError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT ci.id, ci.product_id, ci.quantity, ci.price,
                   p.name, p.brand, p.images[1] AS image,
                   p.price AS current_price, p.stock
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1 AND p.is_active
            ORDER BY ci.created_at ASC
            "#,
        )
        .bind(cart_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub fn item_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> CartItemResponse {
        CartItemResponse {
            id: self.id,
            product: CartProduct {
                id: self.product_id,
                name: self.name.clone(),
                brand: self.brand.clone(),
                image: self.image.clone(),
                price: self.current_price,
                stock: self.stock,
            },
            quantity: self.quantity,
            price: self.price,
        }
    }
}
