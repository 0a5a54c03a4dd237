//! Model definitions, well-known deployments and modality routing.

pub mod capabilities;

pub use capabilities::ModelCapabilities;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DALL_E_2: &str = "dall-e-2";
pub const DALL_E_3: &str = "dall-e-3";
pub const GPT_IMAGE_1: &str = "gpt-image-1";

pub const TTS_1: &str = "tts-1";
pub const TTS_1_HD: &str = "tts-1-hd";
pub const GPT_4O_MINI_TTS: &str = "gpt-4o-mini-tts";

pub const WHISPER_1: &str = "whisper-1";
pub const GPT_4O_MINI_TRANSCRIBE: &str = "gpt-4o-mini-transcribe";
pub const GPT_4O_TRANSCRIBE: &str = "gpt-4o-transcribe";
pub const GPT_4O_TRANSCRIBE_DIARIZE: &str = "gpt-4o-transcribe-diarize";

/// Common chat deployments and whether they accept media input.
pub const COMMON_CHAT_MODELS: &[(&str, bool)] = &[
    ("gpt-5", true),
    ("gpt-5-mini", true),
    ("gpt-4o", true),
    ("gpt-4o-mini", true),
    ("gpt-4-turbo", true),
    ("gpt-4", false),
    ("gpt-35-turbo", false),
];

/// Common embedding deployments.
pub const COMMON_EMBEDDERS: &[&str] = &[
    "text-embedding-ada-002",
    "text-embedding-3-small",
    "text-embedding-3-large",
];

/// Kind of model a deployment serves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Chat,
    Text,
}

/// A deployment to expose as a model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModelDefinition {
    /// Deployment name in Azure AI Foundry.
    pub name: String,
    #[serde(default)]
    pub kind: ModelKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub supports_media: bool,
}

impl ModelDefinition {
    pub fn chat(name: impl Into<String>, supports_media: bool) -> Self {
        Self {
            name: name.into(),
            kind: ModelKind::Chat,
            max_tokens: None,
            supports_media,
        }
    }
}

/// Which vendor operation serves a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Modality {
    Image,
    Speech,
    Transcription,
    Chat,
}

impl Modality {
    /// Route by case-insensitive substring, checked in a fixed order:
    /// image, then speech, then transcription, falling back to chat.
    pub fn for_model(model_id: &str) -> Self {
        let id = model_id.to_lowercase();
        if id.contains("dall-e") || id.contains("gpt-image") {
            Self::Image
        } else if id.contains("tts") {
            Self::Speech
        } else if id.contains("whisper") || id.contains("transcribe") {
            Self::Transcription
        } else {
            Self::Chat
        }
    }
}
