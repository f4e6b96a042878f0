//! Application settings loaded from environment variables.
//!
//! All settings have development defaults so the server can start with nothing
//! but a writable `data/` directory. In deployment they come from the
//! environment (typically via a `.env` file loaded in `main`).

use crate::errors::{Error, Result};
use std::net::SocketAddr;

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SeaORM connection URL (e.g., `sqlite://data/insuremyway.sqlite?mode=rwc`)
    pub database_url: String,
    /// Socket address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Optional path to a TOML file overriding the built-in seed catalog
    pub seed_config: Option<String>,
    /// Password for the seeded admin account
    pub admin_password: String,
}

/// Loads the application configuration from the environment.
///
/// `DATABASE_URL`, `BIND_ADDR`, and `ADMIN_PASSWORD` fall back to development
/// defaults when unset; `SEED_CONFIG` is optional and has no default. An
/// unparseable `BIND_ADDR` is a configuration error.
pub fn load_app_configuration() -> Result<AppConfig> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/insuremyway.sqlite?mode=rwc".to_string());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| Error::Config {
        message: format!("BIND_ADDR is not a valid socket address: {bind_addr}"),
    })?;

    let seed_config = std::env::var("SEED_CONFIG").ok();

    let admin_password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "adminpass".to_string());

    Ok(AppConfig {
        database_url,
        bind_addr,
        seed_config,
        admin_password,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(unsafe_code)]
    use super::*;

    // Environment mutation is process-wide, so every loader scenario runs
    // inside this one test to avoid racing parallel tests.
    #[test]
    fn test_load_app_configuration_from_env() {
        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("BIND_ADDR");
            std::env::remove_var("SEED_CONFIG");
            std::env::remove_var("ADMIN_PASSWORD");
        }
        let config = load_app_configuration().unwrap();
        assert_eq!(config.database_url, "sqlite://data/insuremyway.sqlite?mode=rwc");
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert!(config.seed_config.is_none());
        assert_eq!(config.admin_password, "adminpass");

        unsafe {
            std::env::set_var("BIND_ADDR", "not-an-addr");
        }
        let result = load_app_configuration();
        assert!(matches!(result.unwrap_err(), Error::Config { .. }));

        unsafe {
            std::env::set_var("DATABASE_URL", "sqlite::memory:");
            std::env::set_var("BIND_ADDR", "0.0.0.0:8080");
            std::env::set_var("SEED_CONFIG", "seed.toml");
            std::env::set_var("ADMIN_PASSWORD", "hunter22");
        }
        let config = load_app_configuration().unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.seed_config.as_deref(), Some("seed.toml"));
        assert_eq!(config.admin_password, "hunter22");

        unsafe {
            std::env::remove_var("DATABASE_URL");
            std::env::remove_var("BIND_ADDR");
            std::env::remove_var("SEED_CONFIG");
            std::env::remove_var("ADMIN_PASSWORD");
        }
    }
}
