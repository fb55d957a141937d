//! Completion gateway trait.
//!
//! The stateless request/response bridge to the language model.
//! Implementations live in concierge-infra.

use concierge_types::gateway::{CompletionRequest, CompletionResponse, GatewayError};

/// Trait for completion gateway backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Callers must
/// not hold any exclusion scope over shared state across `complete` -- the
/// gateway call is the one high-latency operation in the system.
pub trait CompletionGateway: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Send the conversation and system prompt, receive the full reply.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, GatewayError>> + Send;
}
