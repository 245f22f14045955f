use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use tracing::debug;

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};
use storefront_platform_shared::{
    ApiResponse, UserRole, ERROR_INSUFFICIENT_PERMISSIONS, ERROR_INVALID_TOKEN,
};

/// Authenticated user information extracted from JWT token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let user_id = claims.user_id()?;

        Ok(Self {
            user_id,
            name: claims.name.clone(),
            email: claims.email.clone(),
            role: claims.role,
        })
    }

}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<Claims>()
            .ok_or_else(|| AppError::Internal("Claims not found in request".to_string()))
            .and_then(AuthenticatedUser::from_claims);
        ready(result)
    }
}

pub struct AuthMiddleware {
    jwt_service: Rc<JwtService>,
    required_role: Option<UserRole>,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
            required_role: None,
        }
    }

    pub fn require_role(mut self, role: UserRole) -> Self {
        self.required_role = Some(role);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
            required_role: self.required_role,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: Rc<JwtService>,
    required_role: Option<UserRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<actix_web::body::EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let jwt_service = self.jwt_service.clone();
        let required_role = self.required_role;

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));

            let token = match auth_header {
                Some(token) => token,
                None => {
                    let response = HttpResponse::Unauthorized()
                        .json(ApiResponse::error("Authorization token is required"));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            let claims = match jwt_service.validate_token(token) {
                Ok(claims) => claims,
                Err(e) => {
                    debug!("Rejected bearer token: {e}");
                    let response =
                        HttpResponse::Unauthorized().json(ApiResponse::error(ERROR_INVALID_TOKEN));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            if let Some(required_role) = required_role {
                if !has_required_role(claims.role, required_role) {
                    let response = HttpResponse::Forbidden()
                        .json(ApiResponse::error(ERROR_INSUFFICIENT_PERMISSIONS));
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Check if user has required role or higher
fn has_required_role(user_role: UserRole, required_role: UserRole) -> bool {
    match required_role {
        UserRole::User => true, // All roles can access user-level endpoints
        UserRole::Admin => matches!(user_role, UserRole::Admin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-jwt-secret-key-that-is-long-enough-for-hs256";

    async fn test_handler() -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().json(serde_json::json!({"message": "success"})))
    }

    fn jwt_service() -> JwtService {
        JwtService::from_secret(TEST_SECRET).expect("Failed to create JWT service")
    }

    fn token_for(role: UserRole) -> String {
        jwt_service()
            .generate_token(
                Uuid::new_v4(),
                "Test User".to_string(),
                "test@example.com".to_string(),
                role,
            )
            .expect("Failed to generate token")
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service()))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_valid_token_passes_through() {
        let token = token_for(UserRole::User);
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service()))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service()))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_user_token_is_forbidden_on_admin_route() {
        let token = token_for(UserRole::User);
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service()).require_role(UserRole::Admin))
                .route("/admin", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
    }

    #[actix_web::test]
    async fn test_admin_token_is_allowed_on_admin_route() {
        let token = token_for(UserRole::Admin);
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service()).require_role(UserRole::Admin))
                .route("/admin", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
    }

    // `use actix_web::test` shadows the built-in `#[test]` attribute in this
    // module's macro namespace, so name it by path.
    #[core::prelude::v1::test]
    fn test_role_hierarchy() {
        assert!(has_required_role(UserRole::User, UserRole::User));
        assert!(has_required_role(UserRole::Admin, UserRole::User));

        assert!(!has_required_role(UserRole::User, UserRole::Admin));
        assert!(has_required_role(UserRole::Admin, UserRole::Admin));
    }
}
