//! Embedding request and response types.

use serde::{Deserialize, Serialize};

use super::message::Part;

/// A document to embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub content: Vec<Part>,
}

impl Document {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Part::text(text)],
        }
    }

    /// Concatenated text of the document.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(Part::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbedRequest {
    pub input: Vec<Document>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EmbedResponse {
    pub embeddings: Vec<Embedding>,
}

/// A fixed-width embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    pub embedding: Vec<f32>,
}
