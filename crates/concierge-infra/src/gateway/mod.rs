//! OpenAI-compatible completion gateway.
//!
//! One adapter covers OpenAI and any provider that speaks its
//! chat-completion protocol, via a configurable base URL. Uses
//! [`async_openai`] for type-safe request/response handling. Every call is
//! wrapped in a timeout; expiry surfaces as the retryable
//! `GatewayError::Timeout`, and a failed call never produces a partial
//! reply for the caller to store.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};

use concierge_core::gateway::CompletionGateway;
use concierge_types::chat::MessageRole;
use concierge_types::gateway::{CompletionRequest, CompletionResponse, GatewayError};

/// Completion gateway speaking the OpenAI chat-completion protocol.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiGateway {
    client: Client<OpenAIConfig>,
    default_model: String,
    timeout: Duration,
}

impl OpenAiGateway {
    /// Gateway against the official OpenAI endpoint.
    pub fn new(
        api_key: &SecretString,
        default_model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
            default_model: default_model.into(),
            timeout,
        }
    }

    /// Gateway against a custom OpenAI-compatible base URL.
    pub fn with_base_url(
        api_key: &SecretString,
        base_url: &str,
        default_model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(base_url);
        Self {
            client: Client::with_config(config),
            default_model: default_model.into(),
            timeout,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic
    /// [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        // System prompt first, never taken from the stored history.
        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            };
            messages.push(oai_msg);
        }

        // Use the model from the request if set, otherwise the configured default.
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl CompletionGateway for OpenAiGateway {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        let oai_request = self.build_request(request);

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(oai_request))
            .await
            .map_err(|_| GatewayError::Timeout(self.timeout.as_millis() as u64))?
            .map_err(map_openai_error)?;

        let Some(choice) = response.choices.first() else {
            return Err(GatewayError::Provider {
                message: "completion response contained no choices".to_string(),
            });
        };
        let content = choice.message.content.clone().unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: response.model,
        })
    }
}

/// Map `async_openai` errors onto the gateway error taxonomy.
fn map_openai_error(err: async_openai::error::OpenAIError) -> GatewayError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                GatewayError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                GatewayError::RateLimited
            } else {
                GatewayError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::InvalidArgument(msg) => GatewayError::InvalidRequest(msg.clone()),
        _ => GatewayError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_types::chat::ChatMessage;

    fn test_gateway() -> OpenAiGateway {
        OpenAiGateway::new(
            &SecretString::from("test-key".to_string()),
            "gpt-4o-mini",
            Duration::from_secs(30),
        )
    }

    fn test_request() -> CompletionRequest {
        CompletionRequest {
            model: String::new(),
            messages: vec![
                ChatMessage {
                    role: MessageRole::User,
                    content: "Hi".to_string(),
                },
                ChatMessage {
                    role: MessageRole::Assistant,
                    content: "Hello".to_string(),
                },
            ],
            system: Some("You are a helpful assistant.".to_string()),
            max_tokens: 150,
            temperature: Some(0.7),
        }
    }

    #[test]
    fn test_build_request_puts_system_prompt_first() {
        let gateway = test_gateway();
        let request = gateway.build_request(&test_request());

        assert_eq!(request.messages.len(), 3);
        assert!(matches!(
            request.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            request.messages[1],
            ChatCompletionRequestMessage::User(_)
        ));
        assert!(matches!(
            request.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
    }

    #[test]
    fn test_build_request_falls_back_to_default_model() {
        let gateway = test_gateway();
        let request = gateway.build_request(&test_request());
        assert_eq!(request.model, "gpt-4o-mini");

        let mut explicit = test_request();
        explicit.model = "gpt-4o".to_string();
        assert_eq!(gateway.build_request(&explicit).model, "gpt-4o");
    }

    #[test]
    fn test_build_request_carries_limits() {
        let gateway = test_gateway();
        let request = gateway.build_request(&test_request());
        assert_eq!(request.max_completion_tokens, Some(150));
        assert_eq!(request.temperature, Some(0.7f32));
    }

    #[test]
    fn test_invalid_argument_maps_to_invalid_request() {
        let err = map_openai_error(async_openai::error::OpenAIError::InvalidArgument(
            "bad body".to_string(),
        ));
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
    }
}
