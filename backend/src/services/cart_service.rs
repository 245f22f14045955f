use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_platform_shared::{
    AddToCartRequest, CartResponse, ERROR_CART_NOT_FOUND, ERROR_PRODUCT_NOT_FOUND,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Cart, CartItem, CartItemRow, Product};

#[cfg(test)]
mod tests;

/// Per-user shopping cart. Stock checks here are advisory (they keep the
/// storefront honest); the authoritative check happens again at order commit
/// under row locks.
#[derive(Clone)]
pub struct CartService {
    pool: PgPool,
}

/// Reject quantities the product cannot currently satisfy.
pub fn ensure_stock(product_name: &str, stock: i32, requested: i32) -> Result<(), AppError> {
    if stock < requested {
        return Err(AppError::InsufficientStock(format!(
            "Insufficient stock for {}: {} requested, {} available",
            product_name, requested, stock
        )));
    }
    Ok(())
}

impl CartService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the user's cart, creating it on first read. Items whose product
    /// has been deactivated are pruned.
    pub async fn get_cart(&self, user_id: Uuid) -> Result<CartResponse, AppError> {
        let cart = Cart::get_or_create(&self.pool, user_id).await?;

        let pruned = CartItem::prune_unavailable(&self.pool, cart.id).await?;
        if pruned > 0 {
            debug!(cart_id = %cart.id, pruned, "Pruned unavailable cart items");
        }

        self.build_response(cart.id).await
    }

    /// Add a product, merging with any existing line. The merged quantity is
    /// validated against current stock.
    pub async fn add_item(
        &self,
        user_id: Uuid,
        request: AddToCartRequest,
    ) -> Result<CartResponse, AppError> {
        let product = Product::find_active_by_id(&self.pool, request.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()))?;

        let cart = Cart::get_or_create(&self.pool, user_id).await?;

        let existing = CartItem::quantity_of(&self.pool, cart.id, product.id).await?;
        ensure_stock(&product.name, product.stock, existing + request.quantity)?;

        CartItem::upsert_add(
            &self.pool,
            cart.id,
            product.id,
            request.quantity,
            product.price,
        )
        .await?;

        info!(cart_id = %cart.id, product_id = %product.id, quantity = request.quantity, "Added to cart");

        self.build_response(cart.id).await
    }

    /// Set an item's absolute quantity
    pub async fn update_item(
        &self,
        user_id: Uuid,
        item_id: Uuid,
        quantity: i32,
    ) -> Result<CartResponse, AppError> {
        let cart = Cart::find_by_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_CART_NOT_FOUND.to_string()))?;

        let item = CartItem::find_in_cart(&self.pool, item_id, cart.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found in cart".to_string()))?;

        let product = Product::find_active_by_id(&self.pool, item.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()))?;

        ensure_stock(&product.name, product.stock, quantity)?;

        CartItem::set_quantity(&self.pool, item.id, quantity).await?;

        self.build_response(cart.id).await
    }

    /// Remove an item; removing an already-absent item is a no-op
    pub async fn remove_item(&self, user_id: Uuid, item_id: Uuid) -> Result<CartResponse, AppError> {
        let cart = Cart::find_by_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_CART_NOT_FOUND.to_string()))?;

        CartItem::remove(&self.pool, item_id, cart.id).await?;

        self.build_response(cart.id).await
    }

    /// Empty the cart
    pub async fn clear(&self, user_id: Uuid) -> Result<(), AppError> {
        let cart = Cart::find_by_user(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_CART_NOT_FOUND.to_string()))?;

        CartItem::clear(&self.pool, cart.id).await?;

        info!(cart_id = %cart.id, "Cart cleared");

        Ok(())
    }

    async fn build_response(&self, cart_id: Uuid) -> Result<CartResponse, AppError> {
        let rows = CartItemRow::list_for_cart(&self.pool, cart_id).await?;

        let total_items: i32 = rows.iter().map(|r| r.quantity).sum();
        let total_price: Decimal = rows.iter().map(CartItemRow::item_total).sum();

        Ok(CartResponse {
            id: cart_id,
            items: rows.iter().map(CartItemRow::to_response).collect(),
            total_items,
            total_price,
        })
    }
}
