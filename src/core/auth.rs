//! Authentication business logic - registration, login, and password hashing.
//!
//! Passwords are stored as argon2id PHC strings and never logged. Username
//! lookup on login is case-insensitive, matching how users actually type
//! their names, while registration keeps the stored casing.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, warn};

/// Validates registration/login form input.
///
/// Mirrors the form rules: username at least 3 characters, password at least
/// 6, and an email (when given) must contain `@`.
pub fn validate_credentials(username: &str, password: &str, email: Option<&str>) -> Result<()> {
    if username.trim().len() < 3 {
        return Err(Error::Validation {
            message: "Username must be at least 3 characters long".to_string(),
        });
    }
    if password.len() < 6 {
        return Err(Error::Validation {
            message: "Password must be at least 6 characters long".to_string(),
        });
    }
    if let Some(email) = email
        && !email.contains('@')
    {
        return Err(Error::Validation {
            message: "Invalid email format".to_string(),
        });
    }
    Ok(())
}

/// Hashes a password into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// An unparseable stored hash counts as a failed verification rather than an
/// error, so corrupt rows cannot be used to probe the system.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        warn!("Stored password hash failed to parse");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Registers a new user with a hashed password.
///
/// Validates the input, rejects duplicate usernames or emails with a conflict
/// error, and stores the trimmed username.
pub async fn register_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    email: Option<String>,
) -> Result<user::Model> {
    validate_credentials(username, password, email.as_deref())?;

    let username = username.trim();

    let mut duplicate = User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?;
    if duplicate.is_none()
        && let Some(email) = &email
    {
        duplicate = User::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(db)
            .await?;
    }
    if duplicate.is_some() {
        return Err(Error::Conflict {
            message: "Username or email already exists".to_string(),
        });
    }

    let hashed = hash_password(password)?;
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hashed),
        email: Set(email),
        is_admin: Set(false),
        ..Default::default()
    };

    let result = User::insert(model).exec_with_returning(db).await?;
    debug!(user_id = result.id, "Registered user {}", result.username);
    Ok(result)
}

/// Authenticates a user by username (case-insensitive) and password.
///
/// Returns the same validation error for unknown users and wrong passwords so
/// the response does not reveal which usernames exist.
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    validate_credentials(username, password, None)?;

    let user = User::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(user::Column::Username)))
                .eq(username.trim().to_lowercase()),
        )
        .one(db)
        .await?;

    match user {
        Some(user) if verify_password(password, &user.password_hash) => {
            debug!(user_id = user.id, "Login successful");
            Ok(user)
        }
        Some(user) => {
            warn!(user_id = user.id, "Password mismatch");
            Err(Error::Validation {
                message: "Invalid username or password".to_string(),
            })
        }
        None => {
            warn!("No user found for username: {username}");
            Err(Error::Validation {
                message: "Invalid username or password".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("bob", "secret1", None).is_ok());
        assert!(validate_credentials("ab", "secret1", None).is_err());
        assert!(validate_credentials("bob", "short", None).is_err());
        assert!(validate_credentials("bob", "secret1", Some("not-an-email")).is_err());
        assert!(validate_credentials("bob", "secret1", Some("bob@example.com")).is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("hunter22").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
        assert!(!verify_password("hunter22", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_register_and_authenticate() -> Result<()> {
        let db = setup_test_db().await?;

        let user =
            register_user(&db, "alice", "secret12", Some("alice@example.com".to_string())).await?;
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
        assert_ne!(user.password_hash, "secret12");

        // Login is case-insensitive on the username
        let logged_in = authenticate(&db, "ALICE", "secret12").await?;
        assert_eq!(logged_in.id, user.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_username_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, "alice", "secret12", None).await?;

        let result = register_user(&db, "alice", "other-pass", None).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, "alice", "secret12", Some("a@example.com".to_string())).await?;

        let result = register_user(&db, "bob", "secret12", Some("a@example.com".to_string())).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() -> Result<()> {
        let db = setup_test_db().await?;
        register_user(&db, "alice", "secret12", None).await?;

        let result = authenticate(&db, "alice", "wrong-pass").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = authenticate(&db, "nobody", "secret12").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        Ok(())
    }
}
