//! HTTP layer: axum router, session wiring, and the JSON handlers.
//!
//! Handlers stay thin; everything interesting lives in [`crate::core`]. Each
//! handler returns `Result<Json<_>>` and lets the error type pick the status
//! code.

use crate::errors::Result;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

/// Admin panel handlers
pub mod admin;
/// Registration, login, and logout handlers
pub mod auth;
/// Catalog, dashboard, and purchase handlers
pub mod catalog;
/// Support chat handlers
pub mod chat;
/// Top-up loan handlers
pub mod loans;
/// Profile and recommendation handlers
pub mod profile;
mod session;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: DatabaseConnection,
}

/// Builds the application router with the session layer attached.
pub fn router(state: AppState) -> Router {
    let store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/", get(catalog::index))
        .route("/products", get(catalog::products))
        .route("/dashboard", get(catalog::dashboard))
        .route("/profile", get(profile::get_profile).put(profile::put_profile))
        .route("/recommendations", get(profile::recommendations))
        .route("/purchase/{product_id}", post(catalog::purchase))
        .route("/chat", get(chat::thread))
        .route("/chat/messages", post(chat::send))
        .route("/loans", get(loans::list))
        .route("/loans/apply", post(loans::apply))
        .route("/admin", get(admin::panel))
        .route("/admin/products", post(admin::create_product))
        .route("/admin/products/{id}", put(admin::update_product))
        .route("/admin/products/{id}", delete(admin::delete_product))
        .route("/admin/messages/{user_id}/reply", post(admin::reply))
        .route("/admin/loans", get(admin::loans))
        .route("/admin/loans/{id}/review", post(admin::review_loan))
        .with_state(state)
        .layer(session_layer)
}

/// Binds the listener and serves the application until shutdown.
pub async fn run_server(db: DatabaseConnection, bind_addr: std::net::SocketAddr) -> Result<()> {
    let app = router(AppState { db });
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{bind_addr}");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
