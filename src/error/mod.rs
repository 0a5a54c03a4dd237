//! Error types for the Azure AI Foundry provider.

use thiserror::Error;

/// Primary error type for all provider operations.
#[derive(Error, Debug)]
pub enum FoundryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A vendor call failed; `context` says which operation, e.g. "image generation failed".
    #[error("{context}: {source}")]
    Operation {
        context: String,
        #[source]
        source: Box<FoundryError>,
    },

    #[error("stream error: {0}")]
    Stream(#[source] Box<FoundryError>),

    #[error("streaming callback error: {0}")]
    Callback(#[source] Box<FoundryError>),

    #[error("failed to unmarshal tool arguments for '{tool_name}': {source}")]
    ToolArguments {
        tool_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {0} found in request")]
    MissingInput(String),
}

impl FoundryError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Wrap a vendor failure with the operation that produced it.
    pub fn operation(context: impl Into<String>, source: FoundryError) -> Self {
        Self::Operation {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, skipping operation/stream/callback wrappers.
    pub fn root_cause(&self) -> &FoundryError {
        match self {
            Self::Operation { source, .. } | Self::Stream(source) | Self::Callback(source) => {
                source.root_cause()
            }
            other => other,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FoundryError>;
