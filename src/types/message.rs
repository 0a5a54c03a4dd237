//! Conversation messages and their content parts.

use serde::{Deserialize, Serialize};

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Vec<Part>,
}

impl Message {
    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: vec![Part::text(text)],
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![Part::text(text)],
        }
    }

    /// Create a model (assistant) message.
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: vec![Part::text(text)],
        }
    }

    /// Create a message with an arbitrary role and parts.
    pub fn new(role: Role, content: Vec<Part>) -> Self {
        Self { role, content }
    }

    /// Create a tool message carrying one tool response.
    pub fn tool_response(name: impl Into<String>, output: serde_json::Value) -> Self {
        Self {
            role: Role::Tool,
            content: vec![Part::ToolResponse(ToolResponse {
                name: name.into(),
                output,
                reference: None,
            })],
        }
    }

    /// Concatenate all text parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("")
    }

    /// Tool requests carried by this message.
    pub fn tool_requests(&self) -> Vec<&ToolRequest> {
        self.content
            .iter()
            .filter_map(|part| match part {
                Part::ToolRequest(req) => Some(req),
                _ => None,
            })
            .collect()
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
    Tool,
}

/// A single part of message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Part {
    Text {
        text: String,
    },
    /// `url` is either a plain URL or a `data:<mime>;base64,<payload>` literal.
    Media {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
    },
    ToolRequest(ToolRequest),
    ToolResponse(ToolResponse),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn media(url: impl Into<String>, content_type: Option<String>) -> Self {
        Self::Media {
            url: url.into(),
            content_type,
        }
    }

    pub fn tool_request(name: impl Into<String>, input: serde_json::Value) -> Self {
        Self::ToolRequest(ToolRequest {
            name: name.into(),
            input,
            reference: None,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_media(&self) -> bool {
        matches!(self, Self::Media { .. })
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRequest {
    pub name: String,
    pub input: serde_json::Value,
    /// Call identifier pairing this request with its response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// The result of running a tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    pub name: String,
    pub output: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
