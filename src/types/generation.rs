//! Generation requests, responses and finish reasons.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::message::{Message, Part, Role};
use super::usage::Usage;
use crate::error::FoundryError;

/// A generation request from the host framework.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    /// Untyped configuration bag; see [`crate::config`] for recognized keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl GenerateRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = Some(config);
        self
    }
}

/// A tool the model may call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema for the tool input, forwarded as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

/// Response to a generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelResponse {
    pub message: Message,
    pub finish_reason: FinishReason,
    #[serde(default)]
    pub usage: Usage,
}

impl ModelResponse {
    /// A model message with the given parts, `stop` finish reason and no usage.
    pub fn stopped(content: Vec<Part>) -> Self {
        Self {
            message: Message::new(Role::Model, content),
            finish_reason: FinishReason::Stop,
            usage: Usage::default(),
        }
    }

    /// Concatenated text of the response message.
    pub fn text(&self) -> String {
        self.message.text()
    }
}

/// One incremental piece of a streamed response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelResponseChunk {
    pub content: Vec<Part>,
}

impl ModelResponseChunk {
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Caller-supplied sink receiving streamed chunks. An error aborts the stream.
pub type StreamCallback<'a> =
    dyn FnMut(ModelResponseChunk) -> Result<(), FoundryError> + Send + 'a;

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    Blocked,
    Other,
    Unknown,
}
