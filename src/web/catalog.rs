//! Catalog, dashboard, and purchase handlers.

use crate::{
    core::{message, notification, product, profile, purchase},
    entities::{Policy, policy},
    errors::Result,
    web::{AppState, session::current_user},
};
use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Serialize;
use tower_sessions::Session;

/// `GET /` - the public policy catalog.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<policy::Model>>> {
    let policies = Policy::find()
        .order_by_asc(policy::Column::Name)
        .all(&state.db)
        .await?;
    Ok(Json(policies))
}

/// Catalog view with the caller's already-purchased products marked.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    /// Full product catalog
    pub products: Vec<crate::entities::product::Model>,
    /// Ids of products the caller already bought (empty when logged out)
    pub purchased_product_ids: Vec<i32>,
}

/// `GET /products`
pub async fn products(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProductsResponse>> {
    let products = product::get_all_products(&state.db).await?;

    let purchased_product_ids = match current_user(&state.db, &session).await {
        Ok(user) => purchase::get_purchases_with_products(&state.db, user.id)
            .await?
            .into_iter()
            .map(|(purchase, _)| purchase.product_id)
            .collect(),
        Err(_) => Vec::new(),
    };

    Ok(Json(ProductsResponse {
        products,
        purchased_product_ids,
    }))
}

/// One purchased product as shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct PurchaseView {
    /// Purchase id
    pub id: i32,
    /// Product name
    pub product_name: String,
    /// Product price
    pub price: f64,
    /// When the purchase was made
    pub purchase_date: chrono::DateTime<chrono::Utc>,
}

/// Everything the dashboard screen needs in one response.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// The caller's purchases
    pub purchases: Vec<PurchaseView>,
    /// Monthly spending chart data as (label, total) pairs
    pub monthly_spending: Vec<(String, f64)>,
    /// Purchases per inferred insurance type
    pub product_type_distribution: Vec<(String, usize)>,
    /// The caller's support chat thread
    pub messages: Vec<crate::entities::message::Model>,
    /// The caller's notifications, newest first
    pub notifications: Vec<crate::entities::notification::Model>,
    /// Profile completion percentage
    pub profile_completion: u8,
}

/// `GET /dashboard`
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<DashboardResponse>> {
    let user = current_user(&state.db, &session).await?;

    let rows = purchase::get_purchases_with_products(&state.db, user.id).await?;
    let monthly_spending = purchase::monthly_spending(&rows);
    let product_type_distribution = purchase::product_type_distribution(&rows);
    let purchases = rows
        .into_iter()
        .map(|(purchase, product)| PurchaseView {
            id: purchase.id,
            product_name: product.name,
            price: product.price,
            purchase_date: purchase.purchase_date,
        })
        .collect();

    let messages = message::get_thread_for_user(&state.db, user.id).await?;
    let notifications = notification::get_notifications_for_user(&state.db, user.id).await?;
    let profile_completion = profile::completion_percentage(&user);

    Ok(Json(DashboardResponse {
        purchases,
        monthly_spending,
        product_type_distribution,
        messages,
        notifications,
        profile_completion,
    }))
}

/// `POST /purchase/{product_id}`
pub async fn purchase(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i32>,
) -> Result<Json<crate::entities::purchase::Model>> {
    let user = current_user(&state.db, &session).await?;
    let purchase = purchase::record_purchase(&state.db, user.id, product_id).await?;
    Ok(Json(purchase))
}
