//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, server port, and the token signing secret.

use anyhow::{Context, Result, bail};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_expires_in_seconds: u64,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// An absent or empty `JWT_SECRET` is rejected here so the process never
    /// starts in a state where it would sign tokens with an empty key.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_seconds = env::var("JWT_EXPIRES_IN_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_expires_in_seconds,
            server_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> Vec<(&'static str, Option<&'static str>)> {
        vec![
            ("DATABASE_URL", Some("sqlite::memory:")),
            ("JWT_SECRET", Some("unit-test-secret")),
            ("DB_MAX_CONNECTIONS", None),
            ("DB_ACQUIRE_TIMEOUT_SECONDS", None),
            ("JWT_EXPIRES_IN_SECONDS", None),
            ("SERVER_PORT", None),
        ]
    }

    #[test]
    fn loads_with_defaults() {
        temp_env::with_vars(base_vars(), || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.database_url, "sqlite::memory:");
            assert_eq!(config.max_connections, 5);
            assert_eq!(config.acquire_timeout_seconds, 3);
            assert_eq!(config.jwt_expires_in_seconds, 3600);
            assert_eq!(config.server_port, 5000);
        });
    }

    #[test]
    fn rejects_missing_secret() {
        let mut vars = base_vars();
        vars[1] = ("JWT_SECRET", None);
        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn rejects_empty_secret() {
        let mut vars = base_vars();
        vars[1] = ("JWT_SECRET", Some("   "));
        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn rejects_non_numeric_port() {
        let mut vars = base_vars();
        vars[5] = ("SERVER_PORT", Some("not-a-port"));
        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }
}
