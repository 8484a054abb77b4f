//! Text → prompt → provider → validated sentiment record.

use aura_common::{AnalysisConfig, Config, LlmConfig};
use std::sync::Arc;
use std::time::Duration;

use crate::error::AnalysisError;
use crate::extraction::parse_completion;
use crate::prompt::sentiment_prompt;
use crate::provider::{AnthropicProvider, ChatRequest, Provider};
use crate::sentiment::{KeywordBounds, SentimentResult};

/// Runs one analysis per call. Holds no per-request state, so a single
/// instance is shared by every request.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: i64,
    timeout: Duration,
    bounds: KeywordBounds,
}

impl SentimentAnalyzer {
    /// Create an analyzer over any provider.
    pub fn new(provider: Arc<dyn Provider>, llm: &LlmConfig, analysis: &AnalysisConfig) -> Self {
        Self {
            provider,
            model: llm.model.clone(),
            max_tokens: llm.max_tokens,
            timeout: Duration::from_secs(llm.timeout_secs),
            bounds: KeywordBounds::from(analysis),
        }
    }

    /// Create an analyzer backed by Anthropic, failing when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let api_key = config.require_anthropic_key()?;

        // Transport timeout sits above the analysis timeout so the latter fires first.
        let transport_timeout = Duration::from_secs(config.llm.timeout_secs.saturating_add(5));
        let provider =
            AnthropicProvider::with_base_url(api_key, &config.llm.base_url, transport_timeout)?;

        Ok(Self::new(Arc::new(provider), &config.llm, &config.analysis))
    }

    /// Override the provider call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Analyze one piece of text.
    pub async fn analyze(&self, text: &str) -> Result<SentimentResult, AnalysisError> {
        let request =
            ChatRequest::user_prompt(&self.model, sentiment_prompt(text)).with_max_tokens(self.max_tokens);

        let response = tokio::time::timeout(self.timeout, self.provider.chat(request))
            .await
            .map_err(|_| AnalysisError::Timeout(self.timeout))??;

        tracing::debug!(
            provider = %response.provider,
            model = %response.model,
            latency_ms = response.latency_ms,
            output_tokens = response.usage.output_tokens,
            completion = %response.content,
            "Completion received"
        );

        parse_completion(&response.content, self.bounds)
    }
}
