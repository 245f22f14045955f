use sqlx::PgPool;
use storefront_platform_shared::{
    AdminOrderResponse, AdminStatsResponse, AdminUpdateUserRequest, LowStockProduct, OrderStatus,
    PaginatedResponse, UserResponse, ERROR_USER_NOT_FOUND, LOW_STOCK_PRODUCT_LIMIT,
    LOW_STOCK_THRESHOLD, RECENT_ORDERS_LIMIT,
};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{AdminOrderRow, Order, Product, User};

/// Back-office views: the dashboard aggregate and user / order management.
/// Product management lives in the catalog service; admins reach it with
/// the inactive filter switched off.
#[derive(Clone)]
pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Dashboard aggregate. Revenue counts delivered orders only;
    /// everything in flight or cancelled is excluded.
    pub async fn stats(&self) -> Result<AdminStatsResponse, AppError> {
        let total_revenue = Order::total_revenue(&self.pool).await?;
        let total_orders = Order::count_all(&self.pool).await?;
        let total_products = Product::count_all(&self.pool).await?;
        let total_users = User::count(&self.pool).await?;

        let recent_orders = AdminOrderRow::list(&self.pool, None, RECENT_ORDERS_LIMIT, 0)
            .await?
            .iter()
            .map(AdminOrderRow::to_response)
            .collect();

        let low_stock_products =
            Product::list_low_stock(&self.pool, LOW_STOCK_THRESHOLD, LOW_STOCK_PRODUCT_LIMIT)
                .await?
                .into_iter()
                .map(|product| LowStockProduct {
                    id: product.id,
                    name: product.name,
                    stock: product.stock,
                })
                .collect();

        Ok(AdminStatsResponse {
            total_revenue,
            total_orders,
            total_products,
            total_users,
            recent_orders,
            low_stock_products,
        })
    }

    /// All registered users, newest first
    pub async fn list_users(
        &self,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<PaginatedResponse<UserResponse>, AppError> {
        let users = User::list(&self.pool, limit, offset).await?;
        let total = User::count(&self.pool).await?;

        let responses = users.iter().map(User::to_response).collect();

        Ok(PaginatedResponse::new(responses, total, page, limit))
    }

    /// Change a user's role or active flag
    pub async fn update_user(
        &self,
        user_id: Uuid,
        request: AdminUpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        let user = User::admin_update(&self.pool, user_id, request.role, request.is_active)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

        info!(user_id = %user_id, "User updated by admin");

        Ok(user.to_response())
    }

    /// Remove a user account. Admins cannot remove themselves.
    pub async fn delete_user(&self, user_id: Uuid, acting_admin: Uuid) -> Result<(), AppError> {
        if user_id == acting_admin {
            return Err(AppError::Validation(
                "You cannot delete your own account".to_string(),
            ));
        }

        let deleted = User::delete(&self.pool, user_id).await?;
        if !deleted {
            return Err(AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()));
        }

        info!(user_id = %user_id, "User deleted by admin");

        Ok(())
    }

    /// All orders with customer names, optionally filtered by status
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: i64,
        limit: i64,
        offset: i64,
    ) -> Result<PaginatedResponse<AdminOrderResponse>, AppError> {
        let orders = AdminOrderRow::list(&self.pool, status, limit, offset).await?;
        let total = AdminOrderRow::count(&self.pool, status).await?;

        let responses = orders.iter().map(AdminOrderRow::to_response).collect();

        Ok(PaginatedResponse::new(responses, total, page, limit))
    }
}
