use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use storefront_platform_shared::{UserRole, JWT_ACCESS_TOKEN_EXPIRY};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,    // Subject (user ID)
    pub name: String,   // Display name
    pub email: String,  // Email
    pub role: UserRole, // User role
    pub exp: i64,       // Expiration time
    pub iat: i64,       // Issued at
    pub jti: String,    // JWT ID
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Authentication("Invalid user ID in token".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn from_secret(secret: &str) -> Result<Self, AppError> {
        if secret.len() < 32 {
            return Err(AppError::Internal(
                "JWT_SECRET must be at least 32 characters long".to_string(),
            ));
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 30; // 30 seconds leeway for clock skew

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Generate an access token for the given user
    pub fn generate_token(
        &self,
        user_id: Uuid,
        name: String,
        email: String,
        role: UserRole,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now
            + Duration::from_std(JWT_ACCESS_TOKEN_EXPIRY)
                .map_err(|_| AppError::Internal("Invalid token expiry duration".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            name,
            email,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Authentication("Token has expired".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::Authentication("Invalid token".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::Authentication("Invalid token signature".to_string())
                    }
                    _ => AppError::Authentication(format!("Token validation failed: {}", e)),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-jwt-secret-key-that-is-long-enough-for-hs256";

    fn jwt_service() -> JwtService {
        JwtService::from_secret(TEST_SECRET).expect("Failed to create JWT service")
    }

    #[test]
    fn test_token_generation_and_validation() {
        let service = jwt_service();
        let user_id = Uuid::new_v4();

        let token = service
            .generate_token(
                user_id,
                "Test User".to_string(),
                "test@example.com".to_string(),
                UserRole::User,
            )
            .expect("Failed to generate token");

        let claims = service
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.name, "Test User");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, UserRole::User);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let service = jwt_service();
        assert!(service.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_from_another_secret_is_rejected() {
        let service = jwt_service();
        let other = JwtService::from_secret("another-secret-key-that-is-also-long-enough")
            .expect("Failed to create JWT service");

        let token = other
            .generate_token(
                Uuid::new_v4(),
                "Test User".to_string(),
                "test@example.com".to_string(),
                UserRole::Admin,
            )
            .expect("Failed to generate token");

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        assert!(JwtService::from_secret("too-short").is_err());
    }

    #[test]
    fn test_admin_role_round_trips() {
        let service = jwt_service();
        let token = service
            .generate_token(
                Uuid::new_v4(),
                "Admin".to_string(),
                "admin@example.com".to_string(),
                UserRole::Admin,
            )
            .expect("Failed to generate token");

        let claims = service.validate_token(&token).expect("Failed to validate");
        assert_eq!(claims.role, UserRole::Admin);
    }
}
