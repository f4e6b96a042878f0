//! Registration, login, and logout handlers.

use crate::{
    core::auth,
    errors::Result,
    web::{AppState, session::USER_ID_KEY},
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username
    pub username: String,
    /// Plaintext password
    pub password: String,
    /// Optional contact email
    pub email: Option<String>,
}

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username, matched case-insensitively
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// The logged-in (or newly registered) account, minus credentials.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// User id
    pub id: i32,
    /// Username as stored
    pub username: String,
    /// Whether the account has admin privileges
    pub is_admin: bool,
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AccountResponse>> {
    let user = auth::register_user(&state.db, &body.username, &body.password, body.email).await?;
    Ok(Json(AccountResponse {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    }))
}

/// `POST /login`
///
/// Stores the user id in the session; the response carries the admin flag so
/// clients know where to route next.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AccountResponse>> {
    let user = auth::authenticate(&state.db, &body.username, &body.password).await?;
    session.insert(USER_ID_KEY, user.id).await?;
    Ok(Json(AccountResponse {
        id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    }))
}

/// `POST /logout` - destroys the session.
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    session.flush().await?;
    Ok(Json(serde_json::json!({ "message": "Logged out" })))
}
