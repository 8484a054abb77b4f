//! Error types shared by Sentiment Aura services.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using the shared error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Startup and configuration failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values failed validation
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a configuration error of either kind.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::Config("ANTHROPIC_API_KEY is not set".into());
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: ANTHROPIC_API_KEY is not set"
        );
    }

    #[test]
    fn test_validation_error_converts() {
        let err: Error = ValidationError::MissingField {
            field: "secrets.anthropic".into(),
        }
        .into();
        assert!(err.is_config());
        assert!(err.to_string().contains("secrets.anthropic"));
    }

    #[test]
    fn test_io_error_is_not_config() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy").into();
        assert!(!err.is_config());
    }
}
