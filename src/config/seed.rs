//! Seed data for the policy catalog, product catalog, and admin account.
//!
//! Seeding is idempotent: each section is skipped when its table already has
//! rows, so restarting the server never duplicates catalog entries or clobbers
//! existing users. A TOML file can override the built-in catalog.

use crate::config::AppConfig;
use crate::core::auth;
use crate::entities::{Policy, Product, User, policy, product, user};
use crate::errors::{Error, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Seed catalog parsed from a TOML file (or built from the defaults).
#[derive(Debug, Deserialize)]
pub struct SeedCatalog {
    /// Policies for the recommendation engine
    #[serde(default)]
    pub policies: Vec<PolicySeed>,
    /// Products for the purchase catalog
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

/// One policy entry in the seed catalog
#[derive(Debug, Deserialize, Clone)]
pub struct PolicySeed {
    /// Policy name
    pub name: String,
    /// Policy type: health, auto, home, life, travel
    pub policy_type: String,
    /// Monthly premium
    pub premium: f64,
    /// Coverage description
    pub coverage: String,
    /// Minimum eligible age
    pub min_age: i32,
    /// Maximum eligible age
    pub max_age: i32,
    /// Targeted risk level: low, medium, high
    pub risk_level: String,
}

/// One product entry in the seed catalog
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Price in currency units
    pub price: f64,
}

/// Loads a seed catalog from a TOML file.
pub fn load_seed_catalog<P: AsRef<Path>>(path: P) -> Result<SeedCatalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Built-in seed catalog used when no seed file is configured.
#[must_use]
pub fn default_seed_catalog() -> SeedCatalog {
    let policy = |name: &str, policy_type: &str, premium, coverage: &str, min_age, max_age, risk_level: &str| {
        PolicySeed {
            name: name.to_string(),
            policy_type: policy_type.to_string(),
            premium,
            coverage: coverage.to_string(),
            min_age,
            max_age,
            risk_level: risk_level.to_string(),
        }
    };
    let product = |name: &str, description: &str, price| ProductSeed {
        name: name.to_string(),
        description: description.to_string(),
        price,
    };

    SeedCatalog {
        policies: vec![
            policy("Comprehensive Health Insurance", "health", 50.0, "Full medical coverage including hospitalization, outpatient care, and emergency services", 18, 65, "medium"),
            policy("Basic Health Insurance", "health", 25.0, "Basic medical coverage for routine checkups and minor treatments", 18, 70, "low"),
            policy("Premium Health Insurance", "health", 100.0, "Premium medical coverage with private rooms, specialist consultations, and dental care", 25, 60, "high"),
            policy("Comprehensive Auto Insurance", "auto", 30.0, "Full vehicle coverage including collision, theft, and third-party liability", 21, 70, "medium"),
            policy("Basic Auto Insurance", "auto", 15.0, "Basic vehicle coverage for third-party liability only", 18, 75, "low"),
            policy("Premium Auto Insurance", "auto", 60.0, "Premium vehicle coverage with roadside assistance, rental car, and comprehensive protection", 25, 65, "high"),
            policy("Home Insurance Standard", "home", 40.0, "Standard home coverage for fire, theft, and natural disasters", 21, 80, "medium"),
            policy("Home Insurance Basic", "home", 20.0, "Basic home coverage for fire and theft protection", 18, 85, "low"),
            policy("Home Insurance Premium", "home", 80.0, "Premium home coverage with full replacement value and additional living expenses", 25, 75, "high"),
            policy("Life Insurance Term", "life", 35.0, "Term life insurance with death benefit for beneficiaries", 18, 65, "medium"),
            policy("Travel Insurance", "travel", 12.0, "Travel coverage for trip cancellation, medical emergencies abroad, and lost luggage", 16, 80, "low"),
        ],
        products: vec![
            product("Basic Health Plan", "Essential medical coverage for routine care, doctor visits, and emergency services", 25000.0),
            product("Family Health Shield", "Comprehensive family medical coverage including pediatric care, maternity, and wellness programs", 65000.0),
            product("Premium Health Plus", "Premium medical coverage with private rooms, specialist consultations, dental, and vision care", 120000.0),
            product("Senior Health Care", "Specialized medical coverage for seniors with chronic disease management and home care services", 85000.0),
            product("Basic Auto Coverage", "Essential vehicle protection with liability coverage and roadside assistance", 20000.0),
            product("Complete Auto Shield", "Full vehicle protection including collision, comprehensive, theft, and rental car coverage", 45000.0),
            product("Basic Home Protection", "Essential property coverage for fire, theft, and basic natural disasters", 30000.0),
            product("Complete Home Guard", "Comprehensive property protection with full replacement cost and additional living expenses", 60000.0),
            product("Term Life Basic", "Affordable term life insurance providing financial security for your family", 25000.0),
            product("Travel Adventure Pro", "Comprehensive travel insurance covering trips, medical emergencies, and adventure sports", 35000.0),
            product("Student Protection Plan", "Affordable insurance for students covering health, personal property, and liability", 18000.0),
            product("Disability Income Guard", "Income protection insurance providing benefits if you become unable to work", 50000.0),
        ],
    }
}

/// Seeds the database from the configured catalog plus the admin account.
///
/// Reads the seed file named by `SEED_CONFIG` when present, otherwise uses the
/// built-in catalog. Each section only runs against an empty table.
pub async fn seed_database(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    let catalog = match &config.seed_config {
        Some(path) => load_seed_catalog(path)?,
        None => default_seed_catalog(),
    };

    if Policy::find().count(db).await? == 0 {
        for seed in &catalog.policies {
            let model = policy::ActiveModel {
                name: Set(seed.name.clone()),
                policy_type: Set(seed.policy_type.clone()),
                premium: Set(seed.premium),
                coverage: Set(seed.coverage.clone()),
                min_age: Set(seed.min_age),
                max_age: Set(seed.max_age),
                risk_level: Set(seed.risk_level.clone()),
                ..Default::default()
            };
            Policy::insert(model).exec(db).await?;
        }
        info!("Seeded {} policies", catalog.policies.len());
    }

    if Product::find().count(db).await? == 0 {
        for seed in &catalog.products {
            let model = product::ActiveModel {
                name: Set(seed.name.clone()),
                description: Set(seed.description.clone()),
                price: Set(seed.price),
                ..Default::default()
            };
            Product::insert(model).exec(db).await?;
        }
        info!("Seeded {} products", catalog.products.len());
    }

    seed_admin_user(db, &config.admin_password).await?;

    Ok(())
}

/// Creates the `admin` account if no user with that name exists.
async fn seed_admin_user(db: &DatabaseConnection, password: &str) -> Result<()> {
    let existing = User::find()
        .filter(user::Column::Username.eq("admin"))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let hashed = auth::hash_password(password)?;
    let admin = user::ActiveModel {
        username: Set("admin".to_string()),
        password_hash: Set(hashed),
        email: Set(Some("admin@example.com".to_string())),
        is_admin: Set(true),
        ..Default::default()
    };
    User::insert(admin).exec(db).await?;
    info!("Admin user created");

    Ok(())
}
