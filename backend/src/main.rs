use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use storefront_platform_shared::UserRole;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod utils;

use config::AppConfig;
use database::Database;
use error::AppError;
use middleware::auth::AuthMiddleware;
use utils::jwt::JwtService;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!(
        "Starting storefront backend on {}:{}",
        config.host, config.port
    );

    let database = Database::new(&config.database_url).await?;
    database.migrate().await?;

    let jwt_service = JwtService::from_secret(&config.jwt_secret)?;

    let pool = database.pool().clone();
    let notification_service = services::NotificationService::new();
    notification_service.start_background_tasks();

    let auth_service = services::AuthService::new(pool.clone(), jwt_service.clone());
    let user_service = services::UserService::new(pool.clone());
    let catalog_service = services::CatalogService::new(pool.clone());
    let cart_service = services::CartService::new(pool.clone());
    let coupon_service = services::CouponService::new(pool.clone());
    let order_service = services::OrderService::new(pool.clone(), notification_service.clone());
    let review_service = services::ReviewService::new(pool.clone());
    let admin_service = services::AdminService::new(pool.clone());

    let cors_origin = config.cors_allowed_origin.clone();
    let bind_address = config.bind_address();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(cart_service.clone()))
            .app_data(web::Data::new(coupon_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(review_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .service(
                web::scope("/api")
                    .service(handlers::health::health_check)
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(handlers::auth::register))
                            .route("/login", web::post().to(handlers::auth::login))
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware::new(jwt_service.clone()))
                                    .route("/me", web::get().to(handlers::auth::me)),
                            ),
                    )
                    .service(
                        web::scope("/users")
                            .wrap(AuthMiddleware::new(jwt_service.clone()))
                            .route("/profile", web::get().to(handlers::users::get_profile))
                            .route("/profile", web::put().to(handlers::users::update_profile))
                            .route("/addresses", web::get().to(handlers::users::list_addresses))
                            .route("/addresses", web::post().to(handlers::users::add_address))
                            .route(
                                "/addresses/{address_id}",
                                web::put().to(handlers::users::update_address),
                            )
                            .route(
                                "/addresses/{address_id}",
                                web::delete().to(handlers::users::delete_address),
                            ),
                    )
                    .service(
                        web::scope("/products")
                            .route("", web::get().to(handlers::products::list_products))
                            .route(
                                "/featured",
                                web::get().to(handlers::products::featured_products),
                            )
                            .route(
                                "/{product_id}",
                                web::get().to(handlers::products::get_product),
                            )
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .require_role(UserRole::Admin),
                                    )
                                    .route("", web::post().to(handlers::products::create_product))
                                    .route(
                                        "/{product_id}",
                                        web::put().to(handlers::products::update_product),
                                    )
                                    .route(
                                        "/{product_id}",
                                        web::delete().to(handlers::products::delete_product),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/categories")
                            .route("", web::get().to(handlers::categories::list_categories))
                            .route(
                                "/{category_id}",
                                web::get().to(handlers::categories::get_category),
                            )
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .require_role(UserRole::Admin),
                                    )
                                    .route(
                                        "",
                                        web::post().to(handlers::categories::create_category),
                                    )
                                    .route(
                                        "/{category_id}",
                                        web::put().to(handlers::categories::update_category),
                                    )
                                    .route(
                                        "/{category_id}",
                                        web::delete().to(handlers::categories::delete_category),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/cart")
                            .wrap(AuthMiddleware::new(jwt_service.clone()))
                            .route("", web::get().to(handlers::cart::get_cart))
                            .route("", web::post().to(handlers::cart::add_to_cart))
                            .route("", web::delete().to(handlers::cart::clear_cart))
                            .route(
                                "/{item_id}",
                                web::put().to(handlers::cart::update_cart_item),
                            )
                            .route(
                                "/{item_id}",
                                web::delete().to(handlers::cart::remove_from_cart),
                            ),
                    )
                    .service(
                        web::scope("/coupons")
                            .service(
                                web::scope("/validate")
                                    .wrap(AuthMiddleware::new(jwt_service.clone()))
                                    .route("", web::post().to(handlers::coupons::validate_coupon)),
                            )
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .require_role(UserRole::Admin),
                                    )
                                    .route("", web::get().to(handlers::coupons::list_coupons))
                                    .route("", web::post().to(handlers::coupons::create_coupon))
                                    .route(
                                        "/{coupon_id}",
                                        web::put().to(handlers::coupons::update_coupon),
                                    )
                                    .route(
                                        "/{coupon_id}",
                                        web::delete().to(handlers::coupons::delete_coupon),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/orders")
                            .service(
                                web::scope("/{order_id}/status")
                                    .wrap(
                                        AuthMiddleware::new(jwt_service.clone())
                                            .require_role(UserRole::Admin),
                                    )
                                    .route(
                                        "",
                                        web::put().to(handlers::orders::update_order_status),
                                    )
                                    .route(
                                        "/force",
                                        web::put().to(handlers::orders::force_order_status),
                                    ),
                            )
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware::new(jwt_service.clone()))
                                    .route("", web::post().to(handlers::orders::create_order))
                                    .route("/myorders", web::get().to(handlers::orders::my_orders))
                                    .route("/{order_id}", web::get().to(handlers::orders::get_order))
                                    .route(
                                        "/{order_id}/cancel",
                                        web::put().to(handlers::orders::cancel_order),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/reviews")
                            .route(
                                "/product/{product_id}",
                                web::get().to(handlers::reviews::product_reviews),
                            )
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware::new(jwt_service.clone()))
                                    .route("", web::post().to(handlers::reviews::create_review))
                                    .route(
                                        "/{review_id}",
                                        web::put().to(handlers::reviews::update_review),
                                    )
                                    .route(
                                        "/{review_id}",
                                        web::delete().to(handlers::reviews::delete_review),
                                    ),
                            ),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(
                                AuthMiddleware::new(jwt_service.clone())
                                    .require_role(UserRole::Admin),
                            )
                            .route("/stats", web::get().to(handlers::admin::stats))
                            .route("/users", web::get().to(handlers::admin::list_users))
                            .route(
                                "/users/{user_id}",
                                web::put().to(handlers::admin::update_user),
                            )
                            .route(
                                "/users/{user_id}",
                                web::delete().to(handlers::admin::delete_user),
                            )
                            .route("/orders", web::get().to(handlers::admin::list_orders))
                            .route("/products", web::get().to(handlers::admin::list_products)),
                    ),
            )
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(AppError::from)
}
