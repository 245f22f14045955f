use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use storefront_platform_shared::dto::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Invalid coupon: {0}")]
    InvalidCoupon(String),

    #[error("Below minimum order amount: {0}")]
    BelowMinimumOrder(String),

    #[error("Duplicate review: {0}")]
    DuplicateReview(String),

    #[error("Invalid status transition: {0}")]
    InvalidStateTransition(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::InsufficientStock(msg)
            | AppError::InvalidCoupon(msg)
            | AppError::BelowMinimumOrder(msg)
            | AppError::DuplicateReview(msg)
            | AppError::InvalidStateTransition(msg)
            | AppError::Authentication(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Database(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Jwt(_)
            | AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InsufficientStock(_)
            | AppError::InvalidCoupon(_)
            | AppError::BelowMinimumOrder(_)
            | AppError::DuplicateReview(_)
            | AppError::InvalidStateTransition(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Jwt(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
        }
        HttpResponse::build(self.status_code()).json(ApiResponse::error(self.client_message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_bad_request() {
        for err in [
            AppError::Validation("v".into()),
            AppError::InsufficientStock("s".into()),
            AppError::InvalidCoupon("c".into()),
            AppError::BelowMinimumOrder("m".into()),
            AppError::DuplicateReview("d".into()),
            AppError::InvalidStateTransition("t".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            AppError::Authentication("a".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("f".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn internal_errors_hide_details_from_clients() {
        let err = AppError::Internal("pool exhausted".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "An internal server error occurred");
    }

    #[test]
    fn client_facing_errors_keep_their_message() {
        let err = AppError::NotFound("Product not found".into());
        assert_eq!(err.client_message(), "Product not found");
    }
}
