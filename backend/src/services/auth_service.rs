use sqlx::PgPool;
use storefront_platform_shared::{
    AuthResponse, LoginRequest, RegisterRequest, UserResponse, ERROR_ACCOUNT_DISABLED,
    ERROR_EMAIL_ALREADY_EXISTS, ERROR_INVALID_CREDENTIALS, ERROR_USER_NOT_FOUND,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;
use crate::utils::jwt::JwtService;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::validate_email;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    /// Register a new user account and issue an access token
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        validate_email(&request.email)
            .map_err(|_| AppError::Validation("Invalid email format".to_string()))?;

        if User::email_exists(&self.pool, &request.email).await? {
            return Err(AppError::Conflict(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::create(&self.pool, &request.name, &request.email, &password_hash).await?;

        info!(user_id = %user.id, "Registered new user");

        self.auth_response(user)
    }

    /// Authenticate by email and password
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let user = User::find_by_email(&self.pool, &request.email)
            .await?
            .ok_or_else(|| AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Failed login attempt");
            return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            return Err(AppError::Authentication(ERROR_ACCOUNT_DISABLED.to_string()));
        }

        info!(user_id = %user.id, "User logged in");

        self.auth_response(user)
    }

    /// Current user from a validated token subject
    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(ERROR_USER_NOT_FOUND.to_string()))?;

        Ok(user.to_response())
    }

    fn auth_response(&self, user: User) -> Result<AuthResponse, AppError> {
        let token = self.jwt_service.generate_token(
            user.id,
            user.name.clone(),
            user.email.clone(),
            user.role,
        )?;

        Ok(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        })
    }
}
