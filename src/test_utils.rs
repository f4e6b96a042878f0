//! Shared test utilities for `InsureMyWay`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{auth, product},
    entities::{self, loan_history, policy},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user with sensible defaults.
///
/// # Defaults
/// * password: `"secret12"`
/// * email: `<name>@example.com`
/// * not an admin, empty profile
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    auth::register_user(
        db,
        username,
        "secret12",
        Some(format!("{username}@example.com")),
    )
    .await
}

/// Creates a test admin user.
pub async fn create_test_admin(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    use sea_orm::IntoActiveModel;
    let user = create_test_user(db, username).await?;
    let mut active = user.into_active_model();
    active.is_admin = Set(true);
    active.update(db).await.map_err(Into::into)
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * description: `"Test coverage"`
/// * price: 100.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), "Test coverage".to_string(), 100.0).await
}

/// Creates a test product with custom description and price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
    price: f64,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), description.to_string(), price).await
}

/// Creates a test policy with the given matching attributes.
///
/// # Defaults
/// * premium: 50.0
/// * coverage: `"Test coverage"`
pub async fn create_test_policy(
    db: &DatabaseConnection,
    name: &str,
    policy_type: &str,
    min_age: i32,
    max_age: i32,
    risk_level: &str,
) -> Result<entities::policy::Model> {
    let model = policy::ActiveModel {
        name: Set(name.to_string()),
        policy_type: Set(policy_type.to_string()),
        premium: Set(50.0),
        coverage: Set("Test coverage".to_string()),
        min_age: Set(min_age),
        max_age: Set(max_age),
        risk_level: Set(risk_level.to_string()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates a loan history record with the given repayment status.
///
/// # Defaults
/// * `loan_type`: `"personal"`
/// * amount: 10,000.0
pub async fn create_test_loan_history(
    db: &DatabaseConnection,
    user_id: i32,
    repayment_status: &str,
) -> Result<entities::loan_history::Model> {
    let completed = repayment_status == "completed";
    let model = loan_history::ActiveModel {
        user_id: Set(user_id),
        loan_type: Set("personal".to_string()),
        loan_amount: Set(10_000.0),
        repayment_status: Set(repayment_status.to_string()),
        loan_date: Set(chrono::Utc::now()),
        completion_date: Set(completed.then(chrono::Utc::now)),
        repayment_score: Set(if completed { 100 } else { 0 }),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}
