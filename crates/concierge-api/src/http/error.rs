//! Application error type mapping to HTTP status codes.
//!
//! Response bodies keep the historical `{"error": "..."}` shape the widget
//! frontend parses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use concierge_types::error::{ContactError, SessionError};
use concierge_types::gateway::GatewayError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Unknown chat id on a read.
    Session(SessionError),
    /// Contact directory failures (duplicate or missing submission).
    Contact(ContactError),
    /// Completion gateway failure. The triggering user message stays
    /// persisted; the caller observes the partial state on retry.
    Gateway(GatewayError),
    /// Missing or malformed request fields.
    Validation(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        AppError::Contact(e)
    }
}

impl From<GatewayError> for AppError {
    fn from(e: GatewayError) -> Self {
        AppError::Gateway(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Session(SessionError::NotFound(chat_id)) => (
                StatusCode::NOT_FOUND,
                format!("Chat history for chatId {chat_id} not found"),
            ),
            AppError::Contact(ContactError::AlreadyExists(_)) => (
                StatusCode::BAD_REQUEST,
                "User data already exists for this chatId".to_string(),
            ),
            AppError::Contact(ContactError::NotFound(chat_id)) => (
                StatusCode::NOT_FOUND,
                format!("User data for chatId {chat_id} not found"),
            ),
            AppError::Gateway(err) => {
                tracing::warn!(error = %err, "completion gateway call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
