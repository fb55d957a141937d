//! Contact capture endpoints.
//!
//! Endpoints:
//! - POST /submitUserData    - record contact details, first-write-wins
//! - GET  /userData/{chatId} - one session's contact record
//! - GET  /viewUserData      - the full submission log

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use concierge_types::error::ContactError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Body for POST /submitUserData.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitUserDataRequest {
    #[serde(default)]
    pub chat_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number: String,
}

/// POST /submitUserData - record contact details for a session.
///
/// First-write-wins: a second submission for the same chatId is rejected
/// with a 400 and the stored record is left untouched.
pub async fn submit_user_data(
    State(state): State<AppState>,
    Json(body): Json<SubmitUserDataRequest>,
) -> Result<Json<Value>, AppError> {
    let chat_id = body.chat_id.trim();
    let name = body.name.trim();
    let number = body.number.trim();
    if chat_id.is_empty() || name.is_empty() || number.is_empty() {
        return Err(AppError::Validation(
            "chatId, name and number are required".to_string(),
        ));
    }

    state.directory.submit(chat_id, name, number).await?;
    Ok(Json(json!({ "message": "User data saved successfully" })))
}

/// GET /userData/{chatId} - one session's contact record.
pub async fn user_data(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = state
        .directory
        .get(&chat_id)
        .ok_or_else(|| AppError::Contact(ContactError::NotFound(chat_id.clone())))?;
    Ok(Json(json!({ "userData": record })))
}

/// GET /viewUserData - the full submission log in submission order.
pub async fn view_user_data(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "userData": state.directory.list_all() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_uses_camel_case_chat_id() {
        let body: SubmitUserDataRequest =
            serde_json::from_str(r#"{"chatId":"abc","name":"Jane","number":"555-0100"}"#).unwrap();
        assert_eq!(body.chat_id, "abc");
        assert_eq!(body.name, "Jane");
        assert_eq!(body.number, "555-0100");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let body: SubmitUserDataRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.chat_id.is_empty());
        assert!(body.name.is_empty());
    }
}
