//! Usage counter endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /analytics - aggregate usage counters.
///
/// Session and contact counts are recomputed from the owning collections on
/// every request; the historical response key names are preserved for the
/// dashboard.
pub async fn analytics(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.counters.snapshot(
        state.registry.session_count(),
        state.directory.contact_count(),
    );

    Json(json!({
        "analytics": {
            "numberOfContacts": snapshot.contact_count,
            "numberOfMessagesSent": snapshot.total_messages,
            "numberOfChatIds": snapshot.session_count,
            "numberOfManualMessagesEnabledChats": snapshot.manual_mode_activations,
        }
    }))
}
