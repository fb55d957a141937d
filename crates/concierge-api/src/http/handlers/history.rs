//! Read-side history endpoints.
//!
//! Endpoints:
//! - GET /chatHistory/{chatId} - message sequence for one session
//! - GET /chatIds              - all known ids in creation order
//! - GET /allChatHistory       - full snapshot (also forces a flush)

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /chatHistory/{chatId} - the message sequence for one session.
pub async fn chat_history(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let session = state.registry.get(&chat_id)?;
    Ok(Json(json!({ "chatHistory": session.messages })))
}

/// GET /chatIds - all known chat ids in creation order.
pub async fn chat_ids(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "chatIds": state.registry.list_ids() }))
}

/// GET /allChatHistory - every session with embedded contact details.
///
/// Also forces a history flush, historical behavior the operator dashboard
/// relies on.
pub async fn all_chat_history(State(state): State<AppState>) -> Json<Value> {
    state.registry.flush_histories().await;
    Json(json!({ "chatHistories": state.registry.history_records() }))
}
