//! Model capabilities descriptor.

use serde::{Deserialize, Serialize};

/// Describes what a model can do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelCapabilities {
    pub multiturn: bool,
    pub tools: bool,
    pub system_role: bool,
    pub media: bool,
}

impl ModelCapabilities {
    /// Guess capabilities from the deployment name.
    ///
    /// Azure exposes no capability discovery for a deployment, so tool support
    /// is assumed for names containing `gpt` (case-insensitive). Media support
    /// is whatever the caller declared.
    pub fn infer(model_id: &str, supports_media: bool) -> Self {
        Self {
            multiturn: true,
            tools: model_id.to_lowercase().contains("gpt"),
            system_role: true,
            media: supports_media,
        }
    }
}
