/// Database connection and table creation
pub mod database;

/// Seed data loading (policy catalog, product catalog, admin account)
pub mod seed;

/// Application settings from environment variables
pub mod settings;

pub use settings::{AppConfig, load_app_configuration};
