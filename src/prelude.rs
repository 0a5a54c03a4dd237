//! Convenience re-exports for common use.

pub use crate::config::{Credential, FoundryConfig, StaticToken, TokenCredential};
pub use crate::error::{FoundryError, Result};
pub use crate::models::{Modality, ModelCapabilities, ModelDefinition, ModelKind};
pub use crate::plugin::{AzureFoundry, FoundryEmbedder, FoundryModel};
pub use crate::types::{
    Document, EmbedRequest, EmbedResponse, FinishReason, GenerateRequest, Message,
    ModelResponse, ModelResponseChunk, Part, Role, StreamCallback, ToolDefinition, ToolRequest,
    ToolResponse, Usage,
};
