//! Environment-backed configuration

use anyhow::Context;

/// Process configuration, loaded once at startup and immutable for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Symmetric signing secret shared by all service instances.
    pub jwt_secret: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!jwt_secret.is_empty(), "JWT_SECRET must not be empty");

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Ok(Self {
            database_url,
            jwt_secret,
            bind_address,
        })
    }
}
