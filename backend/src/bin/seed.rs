use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;
use storefront_platform_shared::{DiscountType, UserRole};
use tracing::{info, warn};
use uuid::Uuid;

// (name, brand, price, original_price, discount_percent, stock, description)
type SeedProduct = (&'static str, &'static str, i64, i64, i64, i32, &'static str);

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Men", "men", "Men's fashion and accessories"),
    ("Women", "women", "Women's fashion and accessories"),
    ("Kids", "kids", "Kids fashion and toys"),
    ("Home & Living", "home-living", "Home decor and living essentials"),
    ("Beauty", "beauty", "Beauty and personal care products"),
];

const MEN: &[SeedProduct] = &[
    ("Casual Cotton Shirt", "Roadster", 849, 1699, 50, 15, "Comfortable cotton shirt perfect for casual wear"),
    ("Slim Fit Denim Jeans", "Levis", 2299, 4599, 50, 8, "Classic slim fit jeans with stretch comfort"),
    ("Formal Blazer", "Raymond", 3499, 6999, 50, 0, "Professional formal blazer"),
    ("Running Shoes", "Nike", 3799, 5999, 37, 18, "Lightweight running shoes"),
];

const WOMEN: &[SeedProduct] = &[
    ("Floral Summer Dress", "H&M", 1499, 2999, 50, 11, "Beautiful floral summer dress"),
    ("Ethnic Kurti", "Biba", 1299, 2299, 43, 19, "Traditional ethnic kurti"),
    ("Party Dress", "Mango", 2799, 4999, 44, 4, "Glamorous party dress"),
    ("Handbag", "Michael Kors", 3999, 6999, 43, 0, "Premium leather handbag"),
];

const KIDS: &[SeedProduct] = &[
    ("Kids T-Shirt", "H&M Kids", 399, 799, 50, 32, "Colorful kids t-shirt"),
    ("Kids Jeans", "Gap Kids", 899, 1599, 44, 18, "Comfortable kids jeans"),
    ("Kids Shoes", "Adidas Kids", 1499, 2499, 40, 0, "Sporty kids shoes"),
    ("Kids Hoodie", "H&M Kids", 999, 1799, 44, 15, "Cozy kids hoodie"),
];

const HOME: &[SeedProduct] = &[
    ("Bed Sheet Set", "Bombay Dyeing", 1899, 3499, 46, 8, "Premium bed sheet set"),
    ("Bath Towels", "Welspun", 799, 1499, 47, 22, "Soft bath towels"),
    ("Table Lamp", "Philips", 1799, 2999, 40, 13, "Modern table lamp"),
    ("Curtains", "IKEA", 1299, 2299, 43, 0, "Elegant window curtains"),
];

const BEAUTY: &[SeedProduct] = &[
    ("Face Cream", "Lakme", 599, 999, 40, 30, "Moisturizing face cream"),
    ("Lipstick", "Maybelline", 399, 699, 43, 45, "Long-lasting lipstick"),
    ("Perfume", "Bella Vita", 1999, 3999, 50, 0, "Luxury perfume"),
    ("Face Wash", "Neutrogena", 349, 599, 42, 50, "Gentle face wash"),
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    warn!("Seeding wipes all existing storefront data");
    clear_data(&pool).await?;

    seed_users(&pool).await?;
    let category_ids = seed_categories(&pool).await?;
    seed_products(&pool, &category_ids).await?;
    seed_coupons(&pool).await?;

    info!("Database seeded successfully");
    info!("Admin login: admin@example.com / admin123");
    info!("User login: user@example.com / user123");

    Ok(())
}

async fn clear_data(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "TRUNCATE reviews, order_items, orders, cart_items, carts, coupons, products, \
         categories, user_addresses, users CASCADE",
    )
    .execute(pool)
    .await
    .context("Failed to clear existing data")?;

    info!("Cleared existing data");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<()> {
    let admin_hash =
        bcrypt::hash("admin123", bcrypt::DEFAULT_COST).context("Failed to hash admin password")?;
    let user_hash =
        bcrypt::hash("user123", bcrypt::DEFAULT_COST).context("Failed to hash user password")?;

    sqlx::query("INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4)")
        .bind("Admin User")
        .bind("admin@example.com")
        .bind(&admin_hash)
        .bind(UserRole::Admin)
        .execute(pool)
        .await
        .context("Failed to create admin user")?;

    sqlx::query("INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4)")
        .bind("Test User")
        .bind("user@example.com")
        .bind(&user_hash)
        .bind(UserRole::User)
        .execute(pool)
        .await
        .context("Failed to create test user")?;

    info!("Created admin and test users");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> Result<Vec<Uuid>> {
    let mut ids = Vec::with_capacity(CATEGORIES.len());

    for (name, slug, description) in CATEGORIES {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO categories (name, slug, description) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(slug)
        .bind(description)
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to create category: {}", name))?;

        ids.push(id);
    }

    info!("Created {} categories", ids.len());
    Ok(ids)
}

async fn seed_products(pool: &PgPool, category_ids: &[Uuid]) -> Result<()> {
    let groups: [(&[SeedProduct], Uuid); 5] = [
        (MEN, category_ids[0]),
        (WOMEN, category_ids[1]),
        (KIDS, category_ids[2]),
        (HOME, category_ids[3]),
        (BEAUTY, category_ids[4]),
    ];

    let mut count = 0;
    for (products, category_id) in groups {
        for &(name, brand, price, original_price, discount, stock, description) in products {
            sqlx::query(
                "INSERT INTO products \
                 (name, description, price, original_price, discount, brand, category_id, \
                  images, stock, is_featured) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
            )
            .bind(name)
            .bind(description)
            .bind(Decimal::from(price))
            .bind(Decimal::from(original_price))
            .bind(Decimal::from(discount))
            .bind(brand)
            .bind(category_id)
            .bind(vec![format!(
                "https://images.example.com/products/{}.jpg",
                name.to_lowercase().replace(' ', "-")
            )])
            .bind(stock)
            .bind(stock > 10)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create product: {}", name))?;

            count += 1;
        }
    }

    info!("Created {} products", count);
    Ok(())
}

async fn seed_coupons(pool: &PgPool) -> Result<()> {
    sqlx::query(
        "INSERT INTO coupons \
         (code, description, discount_type, discount_value, min_order_amount, \
          max_discount_amount, valid_from, valid_until, usage_limit) \
         VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW() + INTERVAL '90 days', $7)",
    )
    .bind("WELCOME10")
    .bind("10% off your first order")
    .bind(DiscountType::Percentage)
    .bind(Decimal::from(10))
    .bind(Decimal::from(500))
    .bind(Decimal::from(200))
    .bind(1000)
    .execute(pool)
    .await
    .context("Failed to create WELCOME10 coupon")?;

    sqlx::query(
        "INSERT INTO coupons \
         (code, description, discount_type, discount_value, min_order_amount, \
          valid_from, valid_until) \
         VALUES ($1, $2, $3, $4, $5, NOW(), NOW() + INTERVAL '90 days')",
    )
    .bind("FLAT150")
    .bind("Flat 150 off on orders above 999")
    .bind(DiscountType::Fixed)
    .bind(Decimal::from(150))
    .bind(Decimal::from(999))
    .execute(pool)
    .await
    .context("Failed to create FLAT150 coupon")?;

    info!("Created sample coupons");
    Ok(())
}
