//! Typed per-operation options read from the untyped configuration bag.
//!
//! The bag is only inspected here. Unknown keys and values of the wrong JSON
//! type are ignored, leaving the default (or unset) value in place.

use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing::debug;

/// Options for chat completion (`maxOutputTokens`, `temperature`, `topP`, `toolChoice`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatConfig {
    pub max_output_tokens: Option<i64>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub tool_choice: Option<ToolChoice>,
}

impl ChatConfig {
    pub fn from_bag(bag: Option<&Value>) -> Self {
        let mut config = Self::default();
        let Some(map) = as_map(bag) else {
            return config;
        };

        if let Some(v) = int_key(map, "maxOutputTokens") {
            config.max_output_tokens = Some(v);
        }
        if let Some(v) = float_key(map, "temperature") {
            config.temperature = Some(v);
        }
        if let Some(v) = float_key(map, "topP") {
            config.top_p = Some(v);
        }
        if let Some(v) = str_key(map, "toolChoice") {
            config.tool_choice = v.parse().ok();
        }
        config
    }
}

/// Tool-choice policy. Only these three literals select a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ToolChoice {
    Auto,
    Required,
    None,
}

/// Options for image generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageConfig {
    pub n: i64,
    pub size: String,
    pub quality: String,
    pub style: String,
    pub response_format: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            n: 1,
            size: "1024x1024".to_string(),
            quality: "standard".to_string(),
            style: "vivid".to_string(),
            response_format: "url".to_string(),
        }
    }
}

impl ImageConfig {
    pub fn from_bag(bag: Option<&Value>) -> Self {
        let mut config = Self::default();
        let Some(map) = as_map(bag) else {
            return config;
        };

        if let Some(v) = int_key(map, "n") {
            config.n = v;
        }
        override_string(map, "size", &mut config.size);
        override_string(map, "quality", &mut config.quality);
        override_string(map, "style", &mut config.style);
        override_string(map, "response_format", &mut config.response_format);
        config
    }
}

/// Options for speech synthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    pub voice: String,
    pub response_format: String,
    pub speed: f64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice: "alloy".to_string(),
            response_format: "mp3".to_string(),
            speed: 1.0,
        }
    }
}

impl SpeechConfig {
    pub fn from_bag(bag: Option<&Value>) -> Self {
        let mut config = Self::default();
        let Some(map) = as_map(bag) else {
            return config;
        };

        override_string(map, "voice", &mut config.voice);
        override_string(map, "response_format", &mut config.response_format);
        if let Some(v) = float_key(map, "speed") {
            config.speed = v;
        }
        config
    }
}

/// Options for transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionConfig {
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub response_format: String,
    pub temperature: Option<f64>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            language: None,
            prompt: None,
            response_format: "json".to_string(),
            temperature: None,
        }
    }
}

impl TranscriptionConfig {
    pub fn from_bag(bag: Option<&Value>) -> Self {
        let mut config = Self::default();
        let Some(map) = as_map(bag) else {
            return config;
        };

        config.language = str_key(map, "language").map(str::to_string);
        config.prompt = str_key(map, "prompt").map(str::to_string);
        override_string(map, "response_format", &mut config.response_format);
        config.temperature = float_key(map, "temperature");
        config
    }
}

fn as_map(bag: Option<&Value>) -> Option<&Map<String, Value>> {
    match bag {
        Some(Value::Object(map)) => Some(map),
        Some(Value::Null) | None => None,
        Some(other) => {
            debug!(bag = %other, "Ignoring non-object configuration");
            None
        }
    }
}

fn typed<'a, T>(
    map: &'a Map<String, Value>,
    key: &str,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Option<T> {
    let value = map.get(key)?;
    let typed = extract(value);
    if typed.is_none() {
        debug!(key, value = %value, "Ignoring configuration value of unexpected type");
    }
    typed
}

fn int_key(map: &Map<String, Value>, key: &str) -> Option<i64> {
    typed(map, key, Value::as_i64)
}

fn float_key(map: &Map<String, Value>, key: &str) -> Option<f64> {
    typed(map, key, Value::as_f64)
}

fn str_key<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    typed(map, key, Value::as_str)
}

fn override_string(map: &Map<String, Value>, key: &str, target: &mut String) {
    if let Some(v) = str_key(map, key) {
        *target = v.to_string();
    }
}
