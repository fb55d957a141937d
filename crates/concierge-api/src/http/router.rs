//! Axum router configuration with middleware.
//!
//! The route paths are the historical ones -- flat, no version prefix --
//! because the deployed widget frontend calls them verbatim.
//! Middleware: CORS (allow-any) and request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // History reads
        .route("/chatHistory/{chat_id}", get(handlers::history::chat_history))
        .route("/chatIds", get(handlers::history::chat_ids))
        .route("/allChatHistory", get(handlers::history::all_chat_history))
        // Message appends
        .route("/sendMessage", post(handlers::message::send_message))
        .route("/sendMessagebot", post(handlers::message::send_message_bot))
        .route("/sendMessageuser", post(handlers::message::send_message_user))
        .route(
            "/sendMessagebotstart",
            post(handlers::message::send_message_bot_start),
        )
        .route(
            "/sendMessagebotend",
            post(handlers::message::send_message_bot_end),
        )
        .route(
            "/sendMessagetobot",
            post(handlers::message::send_message_to_bot),
        )
        // Contact capture
        .route("/submitUserData", post(handlers::contact::submit_user_data))
        .route("/userData/{chat_id}", get(handlers::contact::user_data))
        .route("/viewUserData", get(handlers::contact::view_user_data))
        // Knowledge base
        .route(
            "/storeTextareaContent",
            post(handlers::knowledge::store_textarea_content),
        )
        // Counters
        .route("/analytics", get(handlers::analytics::analytics))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness probe.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
