//! Message-append endpoints.
//!
//! Endpoints:
//! - POST /sendMessage         - user message + gateway completion
//! - POST /sendMessagebot      - operator message recorded as the assistant
//! - POST /sendMessageuser     - visitor message without a completion
//! - POST /sendMessagebotstart - manual-takeover marker (counted)
//! - POST /sendMessagebotend   - automated-resume marker
//! - POST /sendMessagetobot    - resolve or create the session, nothing else
//!
//! Every variant funnels through `SessionRegistry::append`. /sendMessage is
//! the only one that invokes the completion gateway, and it does so without
//! holding any lock over shared state.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use concierge_core::gateway::CompletionGateway;
use concierge_types::chat::MessageRole;
use concierge_types::gateway::CompletionRequest;

use crate::http::error::AppError;
use crate::state::AppState;

/// Body for the append endpoints that carry message text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Absent or empty means "start a new session".
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Body for the append endpoints that only name a session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOnlyRequest {
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// POST /sendMessage - append the user message, ask the gateway for a
/// reply, append the reply, return both.
///
/// On gateway failure the user message stays persisted and the caller gets
/// a 500; the partial state is observable on retry, never silently dropped.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let SendMessageRequest { chat_id, message } = body;
    ensure_message(&message)?;

    let (chat_id, history) = state
        .registry
        .append(chat_id.as_deref(), MessageRole::User, message)
        .await;

    // No lock is held across the gateway call: the append above released
    // its guard, and the reply is appended under exclusion afterwards.
    let request = CompletionRequest {
        model: state.config.model.clone(),
        messages: history,
        system: Some(state.knowledge.current_prompt()),
        max_tokens: state.config.max_tokens,
        temperature: Some(state.config.temperature),
    };
    let completion = state.gateway.complete(&request).await?;

    let (_, history) = state
        .registry
        .append(
            Some(&chat_id),
            MessageRole::Assistant,
            completion.content.clone(),
        )
        .await;

    Ok(Json(json!({
        "chatId": chat_id,
        "chatHistory": history,
        "assistantResponse": completion.content,
    })))
}

/// POST /sendMessagebot - operator message recorded as the assistant,
/// without invoking the gateway.
pub async fn send_message_bot(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let SendMessageRequest { chat_id, message } = body;
    ensure_message(&message)?;

    let (chat_id, history) = state
        .registry
        .append(chat_id.as_deref(), MessageRole::Assistant, message)
        .await;

    Ok(Json(json!({ "chatId": chat_id, "chatHistory": history })))
}

/// POST /sendMessageuser - visitor message recorded without a completion.
pub async fn send_message_user(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let SendMessageRequest { chat_id, message } = body;
    ensure_message(&message)?;

    let (chat_id, history) = state
        .registry
        .append(chat_id.as_deref(), MessageRole::User, message)
        .await;

    Ok(Json(json!({ "chatId": chat_id, "chatHistory": history })))
}

/// POST /sendMessagebotstart - manual-takeover marker; increments the
/// manual-mode counter.
pub async fn send_message_bot_start(
    State(state): State<AppState>,
    Json(body): Json<SessionOnlyRequest>,
) -> Json<Value> {
    let (chat_id, history) = state.registry.begin_manual(body.chat_id.as_deref()).await;
    Json(json!({ "chatId": chat_id, "chatHistory": history }))
}

/// POST /sendMessagebotend - automated-resume marker.
pub async fn send_message_bot_end(
    State(state): State<AppState>,
    Json(body): Json<SessionOnlyRequest>,
) -> Json<Value> {
    let (chat_id, history) = state.registry.end_manual(body.chat_id.as_deref()).await;
    Json(json!({ "chatId": chat_id, "chatHistory": history }))
}

/// POST /sendMessagetobot - resolve or create the session, nothing else.
pub async fn send_message_to_bot(
    State(state): State<AppState>,
    Json(body): Json<SessionOnlyRequest>,
) -> Json<Value> {
    let session = state.registry.get_or_create(body.chat_id.as_deref()).await;
    Json(json!({ "chatId": session.chat_id, "chatHistory": session.messages }))
}

fn ensure_message(message: &str) -> Result<(), AppError> {
    if message.trim().is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_accepts_missing_chat_id() {
        let body: SendMessageRequest = serde_json::from_str(r#"{"message":"Hi"}"#).unwrap();
        assert!(body.chat_id.is_none());
        assert_eq!(body.message, "Hi");
    }

    #[test]
    fn test_body_uses_camel_case_chat_id() {
        let body: SendMessageRequest =
            serde_json::from_str(r#"{"chatId":"abc","message":"Hi"}"#).unwrap();
        assert_eq!(body.chat_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_blank_message_is_rejected() {
        assert!(ensure_message("   ").is_err());
        assert!(ensure_message("Hi").is_ok());
    }
}
