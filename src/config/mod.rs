//! Plugin configuration and typed per-operation options.

pub mod options;

pub use options::{ChatConfig, ImageConfig, SpeechConfig, ToolChoice, TranscriptionConfig};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bon::Builder;

use crate::error::FoundryError;

pub const DEFAULT_API_VERSION: &str = "2025-03-01-preview";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Supplies bearer tokens for Azure AD (Entra ID) authentication.
///
/// Token acquisition is owned by the host; the client asks for a token on
/// every request and never caches it.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self) -> Result<String, FoundryError>;
}

/// A fixed bearer token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenCredential for StaticToken {
    async fn get_token(&self) -> Result<String, FoundryError> {
        Ok(self.0.clone())
    }
}

/// How requests are authenticated.
#[derive(Clone)]
pub enum Credential {
    /// Sent as the `api-key` header.
    ApiKey(String),
    /// Sent as `Authorization: Bearer <token>`.
    Token(Arc<dyn TokenCredential>),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::Token(_) => f.write_str("Token(..)"),
        }
    }
}

/// Configuration for the Azure AI Foundry plugin.
///
/// ```
/// use azure_foundry::config::{Credential, FoundryConfig};
///
/// let config = FoundryConfig::builder()
///     .endpoint("https://my-resource.openai.azure.com".to_string())
///     .credential(Credential::ApiKey("secret".to_string()))
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct FoundryConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    pub credential: Credential,
    #[builder(default = DEFAULT_API_VERSION.to_string())]
    pub api_version: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl FoundryConfig {
    /// Load from environment variables (and `.env` if present).
    ///
    /// Reads `AZURE_OPENAI_ENDPOINT` (or `AZURE_AI_FOUNDRY_ENDPOINT`),
    /// `AZURE_OPENAI_API_KEY` or `AZURE_OPENAI_AD_TOKEN`, and optionally
    /// `AZURE_OPENAI_API_VERSION`.
    pub fn from_env() -> Result<Self, FoundryError> {
        let _ = dotenvy::dotenv();

        let endpoint = env_non_empty("AZURE_OPENAI_ENDPOINT")
            .or_else(|| env_non_empty("AZURE_AI_FOUNDRY_ENDPOINT"))
            .ok_or_else(|| {
                FoundryError::Configuration(
                    "Missing AZURE_OPENAI_ENDPOINT".to_string(),
                )
            })?;

        let credential = if let Some(key) = env_non_empty("AZURE_OPENAI_API_KEY") {
            Credential::ApiKey(key)
        } else if let Some(token) = env_non_empty("AZURE_OPENAI_AD_TOKEN") {
            Credential::Token(Arc::new(StaticToken::new(token)))
        } else {
            return Err(FoundryError::Authentication(
                "Missing AZURE_OPENAI_API_KEY or AZURE_OPENAI_AD_TOKEN".to_string(),
            ));
        };

        let config = Self {
            endpoint,
            credential,
            api_version: env_non_empty("AZURE_OPENAI_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: DEFAULT_TIMEOUT,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<(), FoundryError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(FoundryError::Configuration(
                "Endpoint is required".to_string(),
            ));
        }
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(FoundryError::Configuration(format!(
                "Endpoint must be an http(s) URL, got '{endpoint}'"
            )));
        }
        if let Credential::ApiKey(key) = &self.credential {
            if key.trim().is_empty() {
                return Err(FoundryError::Authentication(
                    "API key cannot be empty".to_string(),
                ));
            }
        }
        if self.api_version.trim().is_empty() {
            return Err(FoundryError::Configuration(
                "API version cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str, credential: Credential) -> FoundryConfig {
        FoundryConfig::builder()
            .endpoint(endpoint.to_string())
            .credential(credential)
            .build()
    }

    #[test]
    fn builder_applies_defaults() {
        let config = config(
            "https://res.openai.azure.com",
            Credential::ApiKey("k".into()),
        );
        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let err = config("  ", Credential::ApiKey("k".into()))
            .validate()
            .unwrap_err();
        assert!(matches!(err, FoundryError::Configuration(msg) if msg.contains("Endpoint")));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let err = config("res.openai.azure.com", Credential::ApiKey("k".into()))
            .validate()
            .unwrap_err();
        assert!(matches!(err, FoundryError::Configuration(_)));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let err = config("https://res.openai.azure.com", Credential::ApiKey(" ".into()))
            .validate()
            .unwrap_err();
        assert!(matches!(err, FoundryError::Authentication(_)));
    }

    #[test]
    fn credential_debug_hides_secrets() {
        let rendered = format!("{:?}", Credential::ApiKey("super-secret".into()));
        assert!(!rendered.contains("super-secret"));
    }

    #[tokio::test]
    async fn static_token_returns_token() {
        let token = StaticToken::new("abc");
        assert_eq!(token.get_token().await.unwrap(), "abc");
    }
}
