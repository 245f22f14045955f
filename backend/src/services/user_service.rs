use sqlx::PgPool;
use storefront_platform_shared::{
    AddressRequest, AddressResponse, UpdateProfileRequest, UserResponse, ERROR_ADDRESS_NOT_FOUND,
    ERROR_USER_NOT_FOUND,
};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{User, UserAddress};

/// Profile and address book operations. Address mutations run in
/// transactions so the at-most-one-default invariant survives concurrent
/// requests; a partial unique index backs it in the schema.
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the user's profile
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

        Ok(user.to_response())
    }

    /// Update name / phone / avatar
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        let user = User::update_profile(
            &self.pool,
            user_id,
            request.name.as_deref(),
            request.phone.as_deref(),
            request.avatar.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

        info!(user_id = %user_id, "Profile updated");

        Ok(user.to_response())
    }

    /// The user's address book, default first
    pub async fn list_addresses(&self, user_id: Uuid) -> Result<Vec<AddressResponse>, AppError> {
        let addresses = UserAddress::list_for_user(&self.pool, user_id).await?;
        Ok(addresses.iter().map(UserAddress::to_response).collect())
    }

    /// Add an address. The first address becomes the default; an explicit
    /// default demotes the others.
    pub async fn add_address(
        &self,
        user_id: Uuid,
        request: AddressRequest,
    ) -> Result<Vec<AddressResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_addresses WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        let is_default = existing == 0 || request.is_default.unwrap_or(false);

        if is_default {
            sqlx::query("UPDATE user_addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO user_addresses
                (user_id, full_name, phone, address, city, state, pincode, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user_id)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.pincode)
        .bind(is_default)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user_id = %user_id, "Address added");

        self.list_addresses(user_id).await
    }

    /// Update an address; promoting it to default demotes the others
    pub async fn update_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        request: AddressRequest,
    ) -> Result<Vec<AddressResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM user_addresses WHERE id = $1 AND user_id = $2)",
        )
        .bind(address_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Err(AppError::NotFound(ERROR_ADDRESS_NOT_FOUND.to_string()));
        }

        let make_default = request.is_default.unwrap_or(false);
        if make_default {
            sqlx::query("UPDATE user_addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            UPDATE user_addresses
            SET full_name = $3, phone = $4, address = $5, city = $6, state = $7,
                pincode = $8, is_default = is_default OR $9, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(address_id)
        .bind(user_id)
        .bind(&request.full_name)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.pincode)
        .bind(make_default)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(user_id = %user_id, address_id = %address_id, "Address updated");

        self.list_addresses(user_id).await
    }

    /// Delete an address. Removing the default promotes the oldest
    /// remaining address.
    pub async fn delete_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
    ) -> Result<Vec<AddressResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        let was_default: bool = sqlx::query_scalar(
            "DELETE FROM user_addresses WHERE id = $1 AND user_id = $2 RETURNING is_default",
        )
        .bind(address_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_ADDRESS_NOT_FOUND.to_string()))?;

        if was_default {
            sqlx::query(
                r#"
                UPDATE user_addresses
                SET is_default = TRUE
                WHERE id = (
                    SELECT id FROM user_addresses
                    WHERE user_id = $1
                    ORDER BY created_at ASC
                    LIMIT 1
                )
                "#,
            )
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(user_id = %user_id, address_id = %address_id, "Address deleted");

        self.list_addresses(user_id).await
    }
}
