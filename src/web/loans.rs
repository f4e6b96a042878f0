//! Top-up loan application handler.

use crate::{
    core::loan,
    entities,
    errors::Result,
    web::{AppState, session::current_user},
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// The loan application form.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    /// Declared applicant age
    pub age: i32,
    /// Declared monthly income in currency units
    pub monthly_income: f64,
    /// Requested amount in currency units
    pub loan_amount: f64,
}

/// What happened to the application.
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    /// Final status: `approved`, `rejected`, or `pending`
    pub status: String,
    /// User-facing explanation
    pub message: String,
    /// Why the application was rejected, when it was
    pub rejection_reason: Option<String>,
    /// The stored application, absent for age/income rejections
    pub application: Option<entities::top_up_loan::Model>,
}

/// `GET /loans` - the caller's own applications, newest first.
pub async fn list(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<entities::top_up_loan::Model>>> {
    let user = current_user(&state.db, &session).await?;
    let applications = loan::get_applications_for_user(&state.db, user.id).await?;
    Ok(Json(applications))
}

/// `POST /loans/apply`
///
/// Age and income rejections come back with nothing persisted; every other
/// outcome stores the application and notifies the applicant.
pub async fn apply(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>> {
    let user = current_user(&state.db, &session).await?;

    let outcome = loan::apply(
        &state.db,
        &user,
        loan::LoanApplication {
            age: body.age,
            monthly_income: body.monthly_income,
            loan_amount: body.loan_amount,
        },
    )
    .await?;

    let response = match outcome {
        loan::ApplyOutcome::Rejected { reason, message } => ApplyResponse {
            status: "rejected".to_string(),
            message,
            rejection_reason: Some(reason.as_str().to_string()),
            application: None,
        },
        loan::ApplyOutcome::Filed {
            application,
            message,
        } => ApplyResponse {
            status: application.status.clone(),
            message,
            rejection_reason: application.rejection_reason.clone(),
            application: Some(application),
        },
    };
    Ok(Json(response))
}
