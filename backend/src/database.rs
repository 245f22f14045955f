use crate::error::AppError;
use sqlx::PgPool;
use std::time::Duration;
use storefront_platform_shared::constants::{
    DB_CONNECTION_TIMEOUT_SECONDS, DB_MAX_CONNECTIONS, DB_MIN_CONNECTIONS,
};

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(DB_MAX_CONNECTIONS)
            .min_connections(DB_MIN_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(DB_CONNECTION_TIMEOUT_SECONDS))
            .connect(database_url)
            .await?;

        Ok(Database { pool })
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
