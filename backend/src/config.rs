use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub cors_allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("cors_allowed_origin", "http://localhost:3000")?
            .add_source(config::Environment::default())
            .build()?;

        config.try_deserialize()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn loads_from_environment_with_defaults() {
        env::set_var("DATABASE_URL", "postgres://localhost/storefront_test");
        env::set_var(
            "JWT_SECRET",
            "test-jwt-secret-key-that-is-long-enough-for-hs256",
        );

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "postgres://localhost/storefront_test");
        assert_eq!(config.cors_allowed_origin, "http://localhost:3000");
    }
}
