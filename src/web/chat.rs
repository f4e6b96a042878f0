//! Support chat handlers.

use crate::{
    core::message,
    entities,
    errors::Result,
    web::{AppState, session::current_user},
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// A new chat message from the user.
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    /// Message text
    pub content: String,
}

/// The stored message paired with the automatic acknowledgement.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    /// The caller's message as stored
    pub message: entities::message::Model,
    /// The automatic acknowledgement
    pub auto_reply: entities::message::Model,
}

/// `GET /chat` - the caller's conversation thread, oldest first.
pub async fn thread(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<entities::message::Model>>> {
    let user = current_user(&state.db, &session).await?;
    let thread = message::get_thread_for_user(&state.db, user.id).await?;
    Ok(Json(thread))
}

/// `POST /chat/messages`
pub async fn send(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SendRequest>,
) -> Result<Json<SendResponse>> {
    let user = current_user(&state.db, &session).await?;
    let (message, auto_reply) = message::send_user_message(&state.db, user.id, body.content).await?;
    Ok(Json(SendResponse {
        message,
        auto_reply,
    }))
}
