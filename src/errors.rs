/// # Reconciliation Engine Errors
/// This module defines the `ReconEngineError` enum, which encapsulates all potential errors that can occur within the LFD reconciliation engine.
/// The enum variants provide specific error types for different components and operations, facilitating clear error handling and reporting throughout the engine.
///
/// Expected absence is deliberately NOT represented here: a malformed date degrades to
/// `None` inside the date normalizer, and an unresolvable lookup key surfaces as the
/// `Ok(None)` arm of the reconciler. Only genuine faults (misconfiguration, payload
/// serialization, transport plumbing) become a `ReconEngineError`.

use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ReconEngineError {
    /// Represents errors arising from misconfigurations or invalid settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents errors occurring during HTTP communication with a provider.
    #[error("Provider transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Represents errors while handling a provider payload that is not valid JSON at all.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Represents errors surfaced by a provider client outside the HTTP layer
    /// (e.g., an invalid endpoint URL built from settings).
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Represents errors during the initialization of the logging system.
    #[error("Logging initialization error: {0}")]
    LoggingError(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl From<config::ConfigError> for ReconEngineError {
    fn from(err: config::ConfigError) -> Self {
        ReconEngineError::ConfigError(err.to_string())
    }
}

impl From<url::ParseError> for ReconEngineError {
    fn from(err: url::ParseError) -> Self {
        ReconEngineError::ProviderError(err.to_string())
    }
}

pub type ReconResult<T> = Result<T, ReconEngineError>;
