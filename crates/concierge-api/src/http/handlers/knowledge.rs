//! Knowledge base replacement endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use concierge_types::knowledge::KnowledgeProfile;

use crate::state::AppState;

/// POST /storeTextareaContent - replace the knowledge profile.
///
/// The body is the full structured profile; omitted fields fall back to the
/// built-in defaults rather than keeping their previous values, so every
/// call is a complete replacement.
pub async fn store_textarea_content(
    State(state): State<AppState>,
    Json(profile): Json<KnowledgeProfile>,
) -> Json<Value> {
    let prompt = state.knowledge.replace(profile);
    Json(json!({
        "message": "Knowledge base updated",
        "welcomeMessage": state.knowledge.current_welcome_message(),
        "promptChars": prompt.chars().count(),
    }))
}
