//! Aura Common - Shared configuration, errors, and logging for Sentiment Aura.
//!
//! This crate provides:
//! - Configuration types, loading and environment overrides
//! - Configuration validation
//! - Startup error type
//! - Logging setup

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::{
    AccessConfig, AnalysisConfig, Config, LlmConfig, NetworkConfig, ObservabilityConfig,
    SecretsConfig,
};
pub use error::{Error, Result};
pub use validation::{Validate, ValidationError, ValidationResult};
