//! Completion provider abstraction.
//!
//! The gateway treats the language model as an opaque capability: given a
//! request with a prompt, produce completion text. `AnthropicProvider` is the
//! production implementation; tests substitute their own.

mod anthropic;

pub use anthropic::AnthropicProvider;

use async_trait::async_trait;

// ============================================================================
// Provider Trait
// ============================================================================

/// Unified interface for LLM providers.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name.
    fn name(&self) -> &str;

    /// Send a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;
}

/// Error from a provider.
#[derive(Debug, Clone)]
pub struct ProviderError {
    pub provider: String,
    pub model: String,
    pub message: String,
    pub status_code: Option<u16>,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(status) => write!(
                f,
                "[{}:{}] {} (status {})",
                self.provider, self.model, self.message, status
            ),
            None => write!(f, "[{}:{}] {}", self.provider, self.model, self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Unified chat request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model to use
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<i64>,
}

impl ChatRequest {
    /// A single-turn request carrying one user message.
    pub fn user_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message {
                role: "user".into(),
                content: prompt.into(),
            }],
            max_tokens: None,
        }
    }

    /// Set the generation limit.
    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

/// Unified chat response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Provider name
    pub provider: String,
    /// Model used
    pub model: String,
    /// Response content
    pub content: String,
    /// Token usage
    pub usage: TokenUsage,
    /// Finish reason
    pub finish_reason: Option<String>,
    /// Response latency in milliseconds
    pub latency_ms: u64,
}

/// Token usage information.
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: i64,
    pub output_tokens: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_request() {
        let request = ChatRequest::user_prompt("claude-sonnet-4", "Hello").with_max_tokens(1024);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, "Hello");
        assert_eq!(request.model, "claude-sonnet-4");
        assert_eq!(request.max_tokens, Some(1024));
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError {
            provider: "anthropic".into(),
            model: "claude-sonnet-4".into(),
            message: "API error: overloaded".into(),
            status_code: Some(529),
        };
        assert_eq!(
            err.to_string(),
            "[anthropic:claude-sonnet-4] API error: overloaded (status 529)"
        );

        let err = ProviderError {
            status_code: None,
            ..err
        };
        assert_eq!(
            err.to_string(),
            "[anthropic:claude-sonnet-4] API error: overloaded"
        );
    }
}
