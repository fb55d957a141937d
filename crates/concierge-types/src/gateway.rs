//! Completion gateway request/response types.
//!
//! The gateway is the stateless bridge to the language model: given a system
//! prompt and an ordered message list it returns generated text or fails.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

/// Request to the completion gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// The session's message sequence, in conversation order.
    pub messages: Vec<ChatMessage>,
    /// The knowledge-base prompt, injected at completion time only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from the completion gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// Errors from completion gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("provider error: {message}")]
    Provider { message: String },

    /// Expiry of the call timeout; retryable, not fatal.
    #[error("gateway call timed out after {0}ms")]
    Timeout(u64),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageRole;

    #[test]
    fn test_completion_request_serde_skips_absent_options() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: MessageRole::User,
                content: "Hi".to_string(),
            }],
            system: None,
            max_tokens: 150,
            temperature: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("system"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_gateway_error_display() {
        let err = GatewayError::Timeout(30_000);
        assert!(err.to_string().contains("30000"));
        let err = GatewayError::Provider {
            message: "upstream 503".to_string(),
        };
        assert!(err.to_string().contains("upstream 503"));
    }
}
