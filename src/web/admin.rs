//! Admin panel handlers. Every route here requires an admin session.

use crate::{
    core::{loan, message, product, report},
    entities::{self, User},
    errors::Result,
    web::{AppState, session::require_admin},
};
use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// One row of the admin purchase table.
#[derive(Debug, Serialize)]
pub struct PurchaseStatRow {
    /// Purchase id
    pub id: i32,
    /// Buyer's username
    pub username: String,
    /// Purchased product name
    pub product_name: String,
    /// Price paid
    pub price: f64,
    /// When the purchase was made
    pub purchase_date: chrono::DateTime<chrono::Utc>,
}

/// Everything the admin panel screen needs in one response.
#[derive(Debug, Serialize)]
pub struct AdminPanelResponse {
    /// All registered users (credentials omitted by the entity)
    pub users: Vec<entities::user::Model>,
    /// Product catalog
    pub products: Vec<entities::product::Model>,
    /// Per-purchase rows
    pub purchases: Vec<PurchaseStatRow>,
    /// Aggregate figures
    pub analytics: report::Analytics,
    /// Every chat message across all threads
    pub messages: Vec<entities::message::Model>,
}

/// `GET /admin`
pub async fn panel(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<AdminPanelResponse>> {
    require_admin(&state.db, &session).await?;

    let users = User::find().all(&state.db).await?;
    let products = product::get_all_products(&state.db).await?;
    let analytics = report::compute_analytics(&state.db).await?;
    let messages = message::get_all_messages(&state.db).await?;
    let purchases = report::purchase_stats(&state.db)
        .await?
        .into_iter()
        .map(|(purchase, username, product_name, price)| PurchaseStatRow {
            id: purchase.id,
            username,
            product_name,
            price,
            purchase_date: purchase.purchase_date,
        })
        .collect();

    Ok(Json(AdminPanelResponse {
        users,
        products,
        purchases,
        analytics,
        messages,
    }))
}

/// A new catalog product.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    /// Product name
    pub name: String,
    /// Product description
    pub description: String,
    /// Product price
    pub price: f64,
}

/// `POST /admin/products`
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateProductRequest>,
) -> Result<Json<entities::product::Model>> {
    require_admin(&state.db, &session).await?;
    let product = product::create_product(&state.db, body.name, body.description, body.price).await?;
    Ok(Json(product))
}

/// A partial product update; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New price
    pub price: Option<f64>,
}

/// `PUT /admin/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<entities::product::Model>> {
    require_admin(&state.db, &session).await?;
    let product =
        product::update_product(&state.db, id, body.name, body.description, body.price).await?;
    Ok(Json(product))
}

/// `DELETE /admin/products/{id}` - removes the product and its purchases.
pub async fn delete_product(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>> {
    require_admin(&state.db, &session).await?;
    product::delete_product(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "message": "Product deleted" })))
}

/// An admin reply into a user's chat thread.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    /// Reply text
    pub content: String,
}

/// `POST /admin/messages/{user_id}/reply`
pub async fn reply(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(body): Json<ReplyRequest>,
) -> Result<Json<entities::message::Model>> {
    require_admin(&state.db, &session).await?;
    let reply = message::send_admin_reply(&state.db, user_id, body.content).await?;
    Ok(Json(reply))
}

/// Loan review screen payload.
#[derive(Debug, Serialize)]
pub struct LoansResponse {
    /// All applications, newest first
    pub applications: Vec<entities::top_up_loan::Model>,
    /// Aggregate counts by status
    pub stats: loan::LoanStats,
}

/// `GET /admin/loans`
pub async fn loans(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<LoansResponse>> {
    require_admin(&state.db, &session).await?;
    let applications = loan::get_all_applications(&state.db).await?;
    let stats = loan::application_stats(&applications);
    Ok(Json(LoansResponse {
        applications,
        stats,
    }))
}

/// An admin decision on a pending application.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    /// `approve` or `reject`
    pub action: String,
    /// Free-form review notes
    pub notes: Option<String>,
}

/// `POST /admin/loans/{id}/review`
pub async fn review_loan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<entities::top_up_loan::Model>> {
    require_admin(&state.db, &session).await?;

    let action = match body.action.as_str() {
        "approve" => loan::ReviewAction::Approve,
        "reject" => loan::ReviewAction::Reject,
        other => {
            return Err(crate::errors::Error::Validation {
                message: format!("Unknown review action: {other}"),
            });
        }
    };

    let application = loan::review(&state.db, id, action, body.notes).await?;
    Ok(Json(application))
}
