use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_platform_shared::{
    CreateOrderRequest, OrderItemInput, OrderItemResponse, OrderResponse, OrderStatus, OrderTotals,
    PaginatedResponse, UserRole, ERROR_COUPON_EXPIRED, ERROR_INVALID_COUPON, ERROR_ORDER_NOT_FOUND,
    ERROR_PRODUCT_NOT_FOUND, SHIPPING_FEE,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Coupon, Order, OrderItem, Product};
use crate::services::cart_service::ensure_stock;
use crate::services::NotificationService;

#[cfg(test)]
mod tests;

/// Collapse repeated product lines into one, preserving first-seen order.
pub fn merge_lines(items: &[OrderItemInput]) -> Vec<(Uuid, i32)> {
    let mut merged: Vec<(Uuid, i32)> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|(id, _)| *id == item.product) {
            Some((_, quantity)) => *quantity += item.quantity,
            None => merged.push((item.product, item.quantity)),
        }
    }
    merged
}

/// Human-facing order number derived from the placement date and the
/// order's own ID.
pub fn order_number(placed_at: DateTime<Utc>, order_id: Uuid) -> String {
    let hex = order_id.simple().to_string();
    format!(
        "ORD-{}-{}",
        placed_at.format("%Y%m%d"),
        hex[..6].to_uppercase()
    )
}

/// Totals as charged: flat shipping on every order, discount never pushes
/// the total below zero.
pub fn compute_totals(
    items_price: Decimal,
    shipping_price: Decimal,
    discount: Decimal,
) -> OrderTotals {
    let items_price = items_price.round_dp(2);
    let shipping_price = shipping_price.round_dp(2);
    let discount = discount.round_dp(2);
    let total_price = (items_price + shipping_price - discount)
        .max(Decimal::ZERO)
        .round_dp(2);

    OrderTotals {
        items_price,
        shipping_price,
        discount,
        total_price,
    }
}

/// Client-sent totals are advisory. When present they must match what was
/// just computed, otherwise the client checked out against stale prices.
pub fn verify_client_totals(
    request: &CreateOrderRequest,
    totals: OrderTotals,
) -> Result<(), AppError> {
    let stale = request.items_price.is_some_and(|p| p != totals.items_price)
        || request
            .shipping_price
            .is_some_and(|p| p != totals.shipping_price)
        || request.total_price.is_some_and(|p| p != totals.total_price);

    if stale {
        return Err(AppError::Validation(
            "Order totals do not match current prices".to_string(),
        ));
    }
    Ok(())
}

/// Reject lifecycle moves the state machine does not allow. `force` is the
/// admin override: any target is reachable while the order is in flight,
/// but terminal orders stay put.
pub fn validate_transition(
    current: OrderStatus,
    target: OrderStatus,
    force: bool,
) -> Result<(), AppError> {
    let allowed = if force {
        !current.is_terminal() && target != current
    } else {
        current.can_transition_to(target)
    };

    if !allowed {
        return Err(AppError::InvalidStateTransition(format!(
            "Cannot move order from {current} to {target}"
        )));
    }
    Ok(())
}

/// Order placement and lifecycle. Placement is a single transaction: stock
/// is taken under row locks, the coupon redemption is counted, prices are
/// snapshotted into order items and the cart is cleared, or none of it
/// happens.
#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
    notifications: NotificationService,
}

impl OrderService {
    pub fn new(pool: PgPool, notifications: NotificationService) -> Self {
        Self {
            pool,
            notifications,
        }
    }

    /// Place an order
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, AppError> {
        let lines = merge_lines(&request.items);

        let mut tx = self.pool.begin().await?;

        let mut items_price = Decimal::ZERO;
        let mut snapshots = Vec::with_capacity(lines.len());
        for (product_id, quantity) in lines {
            let product = Product::find_active_for_update(&mut *tx, product_id)
                .await?
                .ok_or_else(|| AppError::NotFound(ERROR_PRODUCT_NOT_FOUND.to_string()))?;

            ensure_stock(&product.name, product.stock, quantity)?;
            Product::decrement_stock(&mut *tx, product_id, quantity).await?;

            items_price += product.price * Decimal::from(quantity);
            snapshots.push((product, quantity));
        }
        let items_price = items_price.round_dp(2);

        let now = Utc::now();
        let mut discount = Decimal::ZERO;
        let mut coupon_code = None;
        if let Some(code) = request.coupon_code.as_deref() {
            let coupon = Coupon::find_by_code_for_update(&mut *tx, code)
                .await?
                .ok_or_else(|| AppError::NotFound(ERROR_INVALID_COUPON.to_string()))?;

            if !coupon.is_valid_at(now) {
                return Err(AppError::InvalidCoupon(ERROR_COUPON_EXPIRED.to_string()));
            }
            if items_price < coupon.min_order_amount {
                return Err(AppError::BelowMinimumOrder(format!(
                    "Minimum order amount of {} required",
                    coupon.min_order_amount
                )));
            }

            discount = coupon.calculate_discount(items_price);
            Coupon::record_redemption(&mut *tx, coupon.id).await?;
            coupon_code = Some(coupon.code);
        }

        let totals = compute_totals(items_price, SHIPPING_FEE, discount);
        verify_client_totals(&request, totals)?;

        let order_id = Uuid::new_v4();
        let number = order_number(now, order_id);
        let order = Order::create(
            &mut *tx,
            order_id,
            &number,
            user_id,
            &request.shipping_address,
            request.payment_method,
            totals,
            coupon_code.as_deref(),
        )
        .await?;

        let mut items = Vec::with_capacity(snapshots.len());
        for (product, quantity) in &snapshots {
            let item = OrderItem::insert(
                &mut *tx,
                order.id,
                product.id,
                &product.name,
                &product.brand,
                &product.primary_image().unwrap_or_default(),
                *quantity,
                product.price,
            )
            .await?;
            items.push(item.to_response());
        }

        // The cart mirrors what was just ordered; clear it in the same commit.
        sqlx::query(
            "DELETE FROM cart_items WHERE cart_id IN (SELECT id FROM carts WHERE user_id = $1)",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            order_id = %order.id,
            order_number = %order.order_number,
            user_id = %user_id,
            total = %order.total_price,
            "Order placed"
        );

        self.notifications
            .order_confirmation(user_id, &order.order_number, order.total_price)
            .await;

        Ok(order.to_response(items))
    }

    /// A user's order history, newest first
    pub async fn my_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<PaginatedResponse<OrderResponse>, AppError> {
        let orders = Order::list_for_user(&self.pool, user_id, limit, offset).await?;
        let total = Order::count_for_user(&self.pool, user_id).await?;

        let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let mut items_by_order: HashMap<Uuid, Vec<OrderItemResponse>> = HashMap::new();
        for item in OrderItem::list_for_orders(&self.pool, &order_ids).await? {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.to_response());
        }

        let responses = orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                order.to_response(items)
            })
            .collect();

        Ok(PaginatedResponse::new(responses, total, page, limit))
    }

    /// Fetch one order. Customers only see their own; admins see any.
    pub async fn get_order(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<OrderResponse, AppError> {
        let order = match role {
            UserRole::Admin => Order::find_by_id(&self.pool, order_id).await?,
            UserRole::User => Order::find_for_user(&self.pool, order_id, user_id).await?,
        }
        .ok_or_else(|| AppError::NotFound(ERROR_ORDER_NOT_FOUND.to_string()))?;

        let items = OrderItem::list_for_order(&self.pool, order.id)
            .await?
            .iter()
            .map(OrderItem::to_response)
            .collect();

        Ok(order.to_response(items))
    }

    /// Admin status change. Without `force` only the next lifecycle step or
    /// a cancellation is accepted; with it any non-terminal order can be
    /// moved anywhere. Cancellations return stock in the same transaction.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        target: OrderStatus,
        force: bool,
    ) -> Result<OrderResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = Order::find_for_update(&mut *tx, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_ORDER_NOT_FOUND.to_string()))?;

        validate_transition(order.status, target, force)?;
        if force {
            warn!(order_id = %order_id, from = %order.status, to = %target, "Forced status change");
        }

        let updated = Order::update_status(&mut *tx, order_id, target, None)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_ORDER_NOT_FOUND.to_string()))?;

        if target == OrderStatus::Cancelled {
            let restocked = OrderItem::restock(&mut *tx, order_id).await?;
            info!(order_id = %order_id, products = restocked, "Returned stock for cancelled order");
        }

        tx.commit().await?;

        info!(order_id = %order_id, status = %target, "Order status updated");

        self.notifications
            .order_status_change(updated.user_id, &updated.order_number, target)
            .await;

        let items = OrderItem::list_for_order(&self.pool, order_id)
            .await?
            .iter()
            .map(OrderItem::to_response)
            .collect();

        Ok(updated.to_response(items))
    }

    /// Customer cancellation, allowed until the order ships
    pub async fn cancel(
        &self,
        order_id: Uuid,
        user_id: Uuid,
        reason: Option<&str>,
    ) -> Result<OrderResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let order = Order::find_for_update(&mut *tx, order_id)
            .await?
            .filter(|order| order.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(ERROR_ORDER_NOT_FOUND.to_string()))?;

        if !order.status.is_customer_cancellable() {
            return Err(AppError::InvalidStateTransition(format!(
                "Order in status {} can no longer be cancelled",
                order.status
            )));
        }

        let updated = Order::update_status(&mut *tx, order_id, OrderStatus::Cancelled, reason)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_ORDER_NOT_FOUND.to_string()))?;

        OrderItem::restock(&mut *tx, order_id).await?;

        tx.commit().await?;

        info!(order_id = %order_id, user_id = %user_id, "Order cancelled by customer");

        self.notifications
            .order_status_change(user_id, &updated.order_number, OrderStatus::Cancelled)
            .await;

        let items = OrderItem::list_for_order(&self.pool, order_id)
            .await?
            .iter()
            .map(OrderItem::to_response)
            .collect();

        Ok(updated.to_response(items))
    }
}
