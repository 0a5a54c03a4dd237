//! Plugin entry point: model and embedder definitions over a shared client.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::audio::{generate_speech, transcribe};
use crate::config::FoundryConfig;
use crate::convert::{build_chat_request, from_chat_completion};
use crate::embedding::embed_documents;
use crate::error::FoundryError;
use crate::image::generate_image;
use crate::models::{
    Modality, ModelCapabilities, ModelDefinition, COMMON_CHAT_MODELS, COMMON_EMBEDDERS,
};
use crate::provider::{AzureOpenAiClient, OpenAiApi};
use crate::streaming::aggregate;
use crate::types::{EmbedRequest, EmbedResponse, GenerateRequest, ModelResponse, StreamCallback};

/// Provider name used to namespace model labels.
pub const PROVIDER: &str = "azureaifoundry";

/// The Azure AI Foundry plugin.
///
/// Construction validates the configuration and builds the client; the
/// handle is immutable afterwards and cheap to clone.
#[derive(Clone)]
pub struct AzureFoundry {
    client: Arc<dyn OpenAiApi>,
}

impl AzureFoundry {
    pub fn new(config: FoundryConfig) -> Result<Self, FoundryError> {
        let client = AzureOpenAiClient::new(&config)?;
        debug!(
            endpoint = config.endpoint.as_str(),
            api_version = config.api_version.as_str(),
            "Azure AI Foundry client ready"
        );
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Build from `AZURE_OPENAI_*` environment variables (and `.env`).
    pub fn from_env() -> Result<Self, FoundryError> {
        Self::new(FoundryConfig::from_env()?)
    }

    /// Use an already-built client, e.g. a test double.
    pub fn with_client(client: Arc<dyn OpenAiApi>) -> Self {
        Self { client }
    }

    pub fn name(&self) -> &'static str {
        PROVIDER
    }

    /// Define a model. Capabilities are inferred from the name when not given.
    pub fn define_model(
        &self,
        definition: ModelDefinition,
        capabilities: Option<ModelCapabilities>,
    ) -> FoundryModel {
        let capabilities = capabilities
            .unwrap_or_else(|| ModelCapabilities::infer(&definition.name, definition.supports_media));
        let modality = Modality::for_model(&definition.name);
        debug!(model = definition.name.as_str(), %modality, "Defining model");

        FoundryModel {
            client: Arc::clone(&self.client),
            label: format!("{PROVIDER}-{}", definition.name),
            definition,
            capabilities,
            modality,
        }
    }

    pub fn define_embedder(&self, name: impl Into<String>) -> FoundryEmbedder {
        let name = name.into();
        FoundryEmbedder {
            client: Arc::clone(&self.client),
            label: format!("{PROVIDER}-{name}"),
            name,
        }
    }

    /// Define the well-known chat models, keyed by name.
    pub fn define_common_models(&self) -> BTreeMap<String, FoundryModel> {
        COMMON_CHAT_MODELS
            .iter()
            .map(|(name, media)| {
                let model = self.define_model(ModelDefinition::chat(*name, *media), None);
                (name.to_string(), model)
            })
            .collect()
    }

    /// Define the well-known embedders, keyed by name.
    pub fn define_common_embedders(&self) -> BTreeMap<String, FoundryEmbedder> {
        COMMON_EMBEDDERS
            .iter()
            .map(|name| (name.to_string(), self.define_embedder(*name)))
            .collect()
    }
}

impl fmt::Debug for AzureFoundry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureFoundry").finish_non_exhaustive()
    }
}

/// A deployment reachable through [`FoundryModel::generate`].
#[derive(Clone)]
pub struct FoundryModel {
    client: Arc<dyn OpenAiApi>,
    label: String,
    definition: ModelDefinition,
    capabilities: ModelCapabilities,
    modality: Modality,
}

impl FoundryModel {
    /// Deployment name sent to the service.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Namespaced label, `azureaifoundry-<name>`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    pub fn capabilities(&self) -> &ModelCapabilities {
        &self.capabilities
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    /// Run a generation request.
    ///
    /// Image, speech and transcription models ignore `callback`. For chat
    /// models a callback switches to streaming and receives every text delta.
    pub async fn generate(
        &self,
        request: &GenerateRequest,
        callback: Option<&mut StreamCallback<'_>>,
    ) -> Result<ModelResponse, FoundryError> {
        let deployment = self.name();
        match self.modality {
            Modality::Image => generate_image(self.client.as_ref(), deployment, request).await,
            Modality::Speech => generate_speech(self.client.as_ref(), deployment, request).await,
            Modality::Transcription => transcribe(self.client.as_ref(), deployment, request).await,
            Modality::Chat => match callback {
                Some(cb) => self.stream_chat(request, cb).await,
                None => self.chat(request).await,
            },
        }
    }

    async fn chat(&self, request: &GenerateRequest) -> Result<ModelResponse, FoundryError> {
        let chat_request = build_chat_request(self.name(), request, false);
        let completion = self
            .client
            .chat_completion(&chat_request)
            .await
            .map_err(|e| {
                FoundryError::operation(
                    format!("chat completion failed for model '{}'", self.name()),
                    e,
                )
            })?;
        Ok(from_chat_completion(completion))
    }

    async fn stream_chat(
        &self,
        request: &GenerateRequest,
        callback: &mut StreamCallback<'_>,
    ) -> Result<ModelResponse, FoundryError> {
        let chat_request = build_chat_request(self.name(), request, true);
        let stream = self
            .client
            .chat_completion_stream(&chat_request)
            .await
            .map_err(|e| FoundryError::Stream(Box::new(e)))?;
        aggregate(stream, Some(callback)).await
    }
}

impl fmt::Debug for FoundryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoundryModel")
            .field("label", &self.label)
            .field("capabilities", &self.capabilities)
            .field("modality", &self.modality)
            .finish_non_exhaustive()
    }
}

/// An embedding deployment.
#[derive(Clone)]
pub struct FoundryEmbedder {
    client: Arc<dyn OpenAiApi>,
    label: String,
    name: String,
}

impl FoundryEmbedder {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub async fn embed(&self, request: &EmbedRequest) -> Result<EmbedResponse, FoundryError> {
        embed_documents(self.client.as_ref(), &self.name, request).await
    }
}

impl fmt::Debug for FoundryEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoundryEmbedder")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
