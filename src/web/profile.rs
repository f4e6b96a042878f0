//! Profile and recommendation handlers.

use crate::{
    core::{profile, recommendation},
    entities::user,
    errors::Result,
    web::{AppState, session::current_user},
};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Profile screen payload: the record plus completion scoring.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The caller's account record (credentials omitted by the entity)
    pub user: user::Model,
    /// Profile completion percentage
    pub completion: u8,
    /// Completion quality tier
    pub quality: &'static str,
    /// Human explanation of the tier
    pub quality_message: &'static str,
}

fn profile_response(user: user::Model) -> ProfileResponse {
    let completion = profile::completion_percentage(&user);
    let (quality, quality_message) = profile::completion_quality(completion);
    ProfileResponse {
        user,
        completion,
        quality,
        quality_message,
    }
}

/// `GET /profile`
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ProfileResponse>> {
    let user = current_user(&state.db, &session).await?;
    Ok(Json(profile_response(user)))
}

/// `PUT /profile`
pub async fn put_profile(
    State(state): State<AppState>,
    session: Session,
    Json(update): Json<profile::ProfileUpdate>,
) -> Result<Json<ProfileResponse>> {
    let user = current_user(&state.db, &session).await?;
    let updated = profile::update_profile(&state.db, user.id, update).await?;
    Ok(Json(profile_response(updated)))
}

/// Catalog filters for the recommendation screen.
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Limit to one policy type; `all` or absent means no filter
    pub insurance_type: Option<String>,
    /// Maximum premium the caller is willing to pay
    pub max_budget: Option<f64>,
}

/// Recommendation screen payload.
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    /// Scored policies, best first, at most three
    pub recommendations: Vec<recommendation::ScoredPolicy>,
    /// Profile completion percentage driving the quality message
    pub profile_completion: u8,
    /// Completion quality tier
    pub quality: &'static str,
    /// Human explanation of the tier
    pub quality_message: &'static str,
}

/// `GET /recommendations`
///
/// Requires the basic profile fields; scored results are persisted so the
/// history survives the request.
pub async fn recommendations(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationsResponse>> {
    let user = current_user(&state.db, &session).await?;

    let scored = recommendation::get_recommendations(
        &state.db,
        &user,
        query.insurance_type.as_deref(),
        query.max_budget,
    )
    .await?;
    recommendation::save_recommendations(&state.db, user.id, &scored).await?;

    let profile_completion = profile::completion_percentage(&user);
    let (quality, quality_message) = profile::completion_quality(profile_completion);

    Ok(Json(RecommendationsResponse {
        recommendations: scored,
        profile_completion,
        quality,
        quality_message,
    }))
}
