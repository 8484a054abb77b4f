//! Configuration management for Sentiment Aura services.
//!
//! Configuration lives at `~/.sentiment-aura/config.json`. A missing file is
//! not an error; every section falls back to its defaults.
//!
//! # Configuration Priority
//!
//! 1. Environment variables
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `ANTHROPIC_API_KEY` → secrets.anthropic
//! - `AURA_BIND_ADDRESS` → network.bind
//! - `AURA_PORT` → network.port
//! - `AURA_MODEL` → llm.model
//! - `AURA_LLM_TIMEOUT_SECS` → llm.timeout_secs
//! - `AURA_LOG_LEVEL` → observability.log_level
//! - `AURA_LOG_FORMAT` → observability.log_format

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".sentiment-aura"),
        |dirs| dirs.home_dir().join(".sentiment-aura"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Network
// ============================================================================

/// Listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Bind address. Default: "0.0.0.0"
    #[serde(default = "default_bind_address")]
    pub bind: String,

    /// Listen port. Default: 8000
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            port: default_port(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

// ============================================================================
// Secrets
// ============================================================================

/// API keys for the completion provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    /// Anthropic API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
}

// ============================================================================
// LLM
// ============================================================================

/// Completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier sent to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens the provider may generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i64,

    /// Upper bound on a single provider call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Provider API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            base_url: default_base_url(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".into()
}

fn default_max_tokens() -> i64 {
    1024
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_base_url() -> String {
    "https://api.anthropic.com".into()
}

// ============================================================================
// Access
// ============================================================================

/// Origins that receive credentialed cross-origin grants.
///
/// Matching is a plain prefix/suffix test on the raw `Origin` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// An origin starting with any of these is trusted
    #[serde(default = "default_origin_prefixes")]
    pub origin_prefixes: Vec<String>,

    /// An origin ending with any of these is trusted
    #[serde(default = "default_origin_suffixes")]
    pub origin_suffixes: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            origin_prefixes: default_origin_prefixes(),
            origin_suffixes: default_origin_suffixes(),
        }
    }
}

fn default_origin_prefixes() -> Vec<String> {
    vec!["http://localhost".into()]
}

fn default_origin_suffixes() -> Vec<String> {
    vec![".vercel.app".into()]
}

// ============================================================================
// Analysis
// ============================================================================

/// Constraints applied to the parsed sentiment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Fewest keywords accepted
    #[serde(default = "default_min_keywords")]
    pub min_keywords: usize,

    /// Most keywords accepted
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_keywords: default_min_keywords(),
            max_keywords: default_max_keywords(),
        }
    }
}

fn default_min_keywords() -> usize {
    3
}

fn default_max_keywords() -> usize {
    5
}

// ============================================================================
// Observability
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub secrets: SecretsConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub access: AccessConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration and apply environment overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("ANTHROPIC_API_KEY") {
            self.secrets.anthropic = Some(key);
        }

        if let Some(bind) = lookup("AURA_BIND_ADDRESS") {
            self.network.bind = bind;
        }
        if let Some(port) = lookup("AURA_PORT") {
            match port.parse() {
                Ok(p) => self.network.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid AURA_PORT"),
            }
        }

        if let Some(model) = lookup("AURA_MODEL") {
            self.llm.model = model;
        }
        if let Some(secs) = lookup("AURA_LLM_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(s) => self.llm.timeout_secs = s,
                Err(_) => tracing::warn!(value = %secs, "Ignoring invalid AURA_LLM_TIMEOUT_SECS"),
            }
        }

        if let Some(level) = lookup("AURA_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("AURA_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }

    /// Socket address string the server binds to.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.network.bind, self.network.port)
    }

    /// The provider API key, or a configuration error when it is absent.
    pub fn require_anthropic_key(&self) -> std::result::Result<&str, Error> {
        match self.secrets.anthropic.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(Error::Config(
                "ANTHROPIC_API_KEY is not set (secrets.anthropic)".into(),
            )),
        }
    }
}
