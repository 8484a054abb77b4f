//! Aura Gateway - Text in, validated sentiment record out.
//!
//! This crate provides:
//! - Origin-based cross-origin header policy
//! - Completion provider abstraction (Anthropic)
//! - Extraction of a sentiment record from free-form completions
//! - The HTTP surface tying them together
//!
//! ## Architecture
//!
//! ```text
//! Client → access gate → /process_text → prompt → Provider
//!                                                    ↓
//!          response ← validate ← parse ← strip fences
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod access;
pub mod analysis;
pub mod error;
pub mod extraction;
pub mod prompt;
pub mod provider;
pub mod routes;
pub mod sentiment;

pub use access::{AccessDecision, AccessPolicy, HeaderLayer, OriginRule};
pub use analysis::SentimentAnalyzer;
pub use error::{AnalysisError, ErrorResponse};
pub use provider::{
    AnthropicProvider, ChatRequest, ChatResponse, Message, Provider, ProviderError, TokenUsage,
};
pub use sentiment::{AnalysisRequest, Emotion, KeywordBounds, SentimentResult};

use aura_common::config::Config;
use axum::Router;
use routes::AppState;

/// Build the gateway router from its parts.
pub fn build_router_with(analyzer: SentimentAnalyzer, policy: AccessPolicy) -> Router {
    policy.layer(routes::build_routes(AppState { analyzer }))
}

/// Build the gateway router from configuration.
///
/// Fails when the provider cannot be configured, e.g. without an API key.
pub fn build_router(config: &Config) -> Result<Router, AnalysisError> {
    let analyzer = SentimentAnalyzer::from_config(config)?;
    let policy = AccessPolicy::from_config(&config.access);
    Ok(build_router_with(analyzer, policy))
}

/// Start the gateway server.
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let router = build_router(config)?;
    let addr = config.listen_address();

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    tracing::info!(
        "Starting Aura Gateway on {} (model {})",
        listener.local_addr()?,
        config.llm.model
    );

    axum::serve(listener, router).await?;

    Ok(())
}
