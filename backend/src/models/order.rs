use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use storefront_platform_shared::{
    AdminOrderResponse, OrderItemResponse, OrderResponse, OrderStatus, OrderTotals, PaymentMethod,
    ShippingAddress,
};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub shipping_address: Json<ShippingAddress>,
    pub payment_method: PaymentMethod,
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub cancel_reason: Option<String>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Order joined with the customer name for admin views.
#[derive(Debug, Clone, FromRow)]
pub struct AdminOrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub user_name: String,
    pub total_price: Decimal,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

const ORDER_COLUMNS: &str = "id, order_number, user_id, shipping_address, payment_method, \
     items_price, shipping_price, discount, total_price, coupon_code, status, \
     cancel_reason, delivered_at, cancelled_at, created_at, updated_at";

impl Order {
    /// Insert the order header inside the placement transaction
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        conn: &mut PgConnection,
        id: Uuid,
        order_number: &str,
        user_id: Uuid,
        shipping_address: &ShippingAddress,
        payment_method: PaymentMethod,
        totals: OrderTotals,
        coupon_code: Option<&str>,
    ) -> Result<Self, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders
                (id, order_number, user_id, shipping_address, payment_method,
                 items_price, shipping_price, discount, total_price, coupon_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(order_number)
        .bind(user_id)
        .bind(Json(shipping_address))
        .bind(payment_method)
        .bind(totals.items_price)
        .bind(totals.shipping_price)
        .bind(totals.discount)
        .bind(totals.total_price)
        .bind(coupon_code)
        .fetch_one(conn)
        .await?;

        Ok(order)
    }

    /// Find order by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// Lock an order row while its status changes
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(order)
    }

    /// Find an order owned by the given user
    pub async fn find_for_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// List a user's orders, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }

    /// Number of orders owned by a user
    pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Persist a status change. Delivery and cancellation timestamps are set
    /// by the database the moment the matching status lands. Runs on the
    /// caller's transaction so cancellations restock atomically.
    pub async fn update_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: OrderStatus,
        cancel_reason: Option<&str>,
    ) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $2,
                cancel_reason = COALESCE($3, cancel_reason),
                delivered_at = CASE WHEN $2 = 'delivered' THEN NOW() ELSE delivered_at END,
                cancelled_at = CASE WHEN $2 = 'cancelled' THEN NOW() ELSE cancelled_at END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(cancel_reason)
        .fetch_optional(conn)
        .await?;

        Ok(order)
    }

    /// Whether the user has a delivered order containing the product. Drives
    /// the verified-purchase badge on reviews.
    pub async fn has_delivered_product(
        pool: &PgPool,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM orders o
                JOIN order_items oi ON oi.order_id = o.id
                WHERE o.user_id = $1 AND oi.product_id = $2 AND o.status = 'delivered'
            )
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Total number of orders
    pub async fn count_all(pool: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Revenue across delivered orders
    pub async fn total_revenue(pool: &PgPool) -> Result<Decimal, AppError> {
        let revenue = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(total_price) FROM orders WHERE status = 'delivered'",
        )
        .fetch_one(pool)
        .await?;

        Ok(revenue.unwrap_or(Decimal::ZERO))
    }

    /// Convert to response DTO with its items
    pub fn to_response(&self, items: Vec<OrderItemResponse>) -> OrderResponse {
        OrderResponse {
            id: self.id,
            order_number: self.order_number.clone(),
            user_id: self.user_id,
            items,
            shipping_address: self.shipping_address.0.clone(),
            payment_method: self.payment_method,
            items_price: self.items_price,
            shipping_price: self.shipping_price,
            discount: self.discount,
            total_price: self.total_price,
            coupon_code: self.coupon_code.clone(),
            order_status: self.status,
            cancel_reason: self.cancel_reason.clone(),
            delivered_at: self.delivered_at,
            cancelled_at: self.cancelled_at,
            created_at: self.created_at,
        }
    }
}

impl OrderItem {
    /// Insert one snapshot line inside the placement transaction. Name,
    /// brand, image and price are copied from the product at this moment
    /// and never change afterwards.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        conn: &mut PgConnection,
        order_id: Uuid,
        product_id: Uuid,
        name: &str,
        brand: &str,
        image: &str,
        quantity: i32,
        price: Decimal,
    ) -> Result<Self, AppError> {
        let item = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (order_id, product_id, name, brand, image, quantity, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, order_id, product_id, name, brand, image, quantity, price
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(name)
        .bind(brand)
        .bind(image)
        .bind(quantity)
        .bind(price)
        .fetch_one(conn)
        .await?;

        Ok(item)
    }

    /// Return an order's quantities to product stock on cancellation
    pub async fn restock(conn: &mut PgConnection, order_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE products p
            SET stock = p.stock + oi.quantity, updated_at = NOW()
            FROM order_items oi
            WHERE oi.order_id = $1 AND oi.product_id = p.id
            "#,
        )
        .bind(order_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Items belonging to one order
    pub async fn list_for_order(pool: &PgPool, order_id: Uuid) -> Result<Vec<Self>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name, brand, image, quantity, price
            FROM order_items
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Items for a batch of orders, used to avoid per-order queries when
    /// building listings
    pub async fn list_for_orders(pool: &PgPool, order_ids: &[Uuid]) -> Result<Vec<Self>, AppError> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, name, brand, image, quantity, price
            FROM order_items
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(order_ids)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> OrderItemResponse {
        OrderItemResponse {
            product_id: self.product_id,
            name: self.name.clone(),
            brand: self.brand.clone(),
            image: self.image.clone(),
            quantity: self.quantity,
            price: self.price,
        }
    }
}

impl AdminOrderRow {
    /// List orders with customer names, newest first, optionally filtered
    /// by status
    pub async fn list(
        pool: &PgPool,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let rows = sqlx::query_as::<_, AdminOrderRow>(
            r#"
            SELECT o.id, o.order_number, u.name AS user_name, o.total_price,
                   o.payment_method, o.status, o.created_at
            FROM orders o
            JOIN users u ON u.id = o.user_id
            WHERE ($1::order_status IS NULL OR o.status = $1)
            ORDER BY o.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Count orders matching the status filter
    pub async fn count(pool: &PgPool, status: Option<OrderStatus>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE ($1::order_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Convert to response DTO
    pub fn to_response(&self) -> AdminOrderResponse {
        AdminOrderResponse {
            id: self.id,
            order_number: self.order_number.clone(),
            user_name: self.user_name.clone(),
            total_price: self.total_price,
            payment_method: self.payment_method,
            order_status: self.status,
            created_at: self.created_at,
        }
    }
}
