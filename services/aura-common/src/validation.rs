//! Configuration validation.
//!
//! Checks that required values are present and within valid ranges before
//! the server starts.

use thiserror::Error;

use crate::config::{AccessConfig, AnalysisConfig, Config, LlmConfig, NetworkConfig, ObservabilityConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["json", "pretty"];

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16, field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate every section, collecting all failures.
    pub fn validate(&self) -> ValidationResult<()> {
        let sections: [&dyn Validate; 5] = [
            &self.network,
            &self.llm,
            &self.access,
            &self.analysis,
            &self.observability,
        ];

        let mut errors: Vec<ValidationError> = sections
            .iter()
            .filter_map(|section| section.validate().err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(ValidationError::Multiple(errors))
        }
    }
}

impl Validate for NetworkConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort {
                port: self.port,
                field: "network.port".into(),
            });
        }
        if self.bind.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "network.bind".into(),
            });
        }
        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "llm.model".into(),
            });
        }
        if self.max_tokens <= 0 {
            return Err(ValidationError::InvalidValue {
                field: "llm.max_tokens".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "llm.timeout_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidValue {
                field: "llm.base_url".into(),
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        Ok(())
    }
}

impl Validate for AccessConfig {
    fn validate(&self) -> ValidationResult<()> {
        let empty_prefix = self.origin_prefixes.iter().any(|p| p.is_empty());
        let empty_suffix = self.origin_suffixes.iter().any(|s| s.is_empty());

        // An empty pattern matches every origin.
        if empty_prefix || empty_suffix {
            return Err(ValidationError::InvalidValue {
                field: if empty_prefix {
                    "access.origin_prefixes".into()
                } else {
                    "access.origin_suffixes".into()
                },
                reason: "patterns must not be empty".into(),
            });
        }
        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.min_keywords == 0 {
            return Err(ValidationError::InvalidValue {
                field: "analysis.min_keywords".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.min_keywords > self.max_keywords {
            return Err(ValidationError::InvalidValue {
                field: "analysis.max_keywords".into(),
                reason: format!(
                    "must not be less than min_keywords ({})",
                    self.min_keywords
                ),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_level".into(),
                reason: format!("expected one of {:?}", LOG_LEVELS),
            });
        }
        if !LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "observability.log_format".into(),
                reason: format!("expected one of {:?}", LOG_FORMATS),
            });
        }
        Ok(())
    }
}
