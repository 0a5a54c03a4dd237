//! Streaming aggregation of chat completion chunks.
//!
//! Text deltas are forwarded to the caller's sink as they arrive. Tool-call
//! fragments are accumulated per vendor slot and only decoded once the stream
//! is exhausted; a decode failure at that point fails the whole call.

use std::collections::BTreeMap;

use futures::StreamExt;
use serde_json::Value;
use tracing::debug;

use crate::convert::{decode_tool_arguments, map_finish_reason, usage_from};
use crate::error::FoundryError;
use crate::provider::wire::{ChatCompletionChunk, ToolCallDelta};
use crate::provider::ChunkStream;
use crate::types::{
    FinishReason, Message, ModelResponse, ModelResponseChunk, Part, Role, StreamCallback,
    ToolRequest, Usage,
};

/// Partial tool call for one stream slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCallAccumulator {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCallAccumulator {
    fn apply(&mut self, delta: &ToolCallDelta) {
        let Some(function) = &delta.function else {
            return;
        };
        if let Some(name) = function.name.as_deref().filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(arguments) = &function.arguments {
            self.arguments.push_str(arguments);
        }
    }

    /// Decode the accumulated arguments. An empty buffer or `null` yields `null`.
    fn finish(self) -> Result<ToolRequest, FoundryError> {
        let input = if self.arguments.is_empty() {
            Value::Null
        } else {
            decode_tool_arguments(&self.arguments).map_err(|source| {
                FoundryError::ToolArguments {
                    tool_name: self.name.clone(),
                    source,
                }
            })?
        };
        Ok(ToolRequest {
            name: self.name,
            input,
            reference: (!self.id.is_empty()).then_some(self.id),
        })
    }
}

/// Accumulated state of one streamed turn.
#[derive(Debug, Default)]
pub struct StreamAggregator {
    text: String,
    tool_calls: BTreeMap<u32, ToolCallAccumulator>,
    finish_reason: Option<String>,
    usage: Usage,
}

impl StreamAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chunk into the state, returning the text delta it carried.
    pub fn push(&mut self, chunk: ChatCompletionChunk) -> Option<String> {
        if chunk.usage.is_some() {
            self.usage = usage_from(chunk.usage);
        }

        let choice = chunk.choices.into_iter().next()?;
        if let Some(reason) = choice.finish_reason.filter(|r| !r.is_empty()) {
            self.finish_reason = Some(reason);
        }
        for delta in choice.delta.tool_calls.unwrap_or_default() {
            self.tool_calls
                .entry(delta.index)
                .or_insert_with(|| ToolCallAccumulator {
                    id: delta.id.clone().unwrap_or_default(),
                    ..Default::default()
                })
                .apply(&delta);
        }

        let text = choice.delta.content.filter(|t| !t.is_empty())?;
        self.text.push_str(&text);
        Some(text)
    }

    /// Accumulated tool calls in ascending slot order.
    #[cfg(test)]
    fn tool_calls(&self) -> impl Iterator<Item = (&u32, &ToolCallAccumulator)> {
        self.tool_calls.iter()
    }

    /// Build the final response. Nameless slots are dropped.
    pub fn finish(self) -> Result<ModelResponse, FoundryError> {
        let mut content = Vec::with_capacity(self.tool_calls.len() + 1);
        if !self.text.is_empty() {
            content.push(Part::text(self.text));
        }
        for (slot, acc) in self.tool_calls {
            if acc.name.is_empty() {
                debug!(slot, "Dropping streamed tool call without a name");
                continue;
            }
            content.push(Part::ToolRequest(acc.finish()?));
        }

        Ok(ModelResponse {
            message: Message::new(Role::Model, content),
            finish_reason: self
                .finish_reason
                .as_deref()
                .map(map_finish_reason)
                .unwrap_or(FinishReason::Stop),
            usage: self.usage,
        })
    }
}

/// Drain `stream`, forwarding text to `callback`, and build the final response.
///
/// The stream is dropped on every return path, which releases the connection.
pub async fn aggregate(
    mut stream: ChunkStream,
    mut callback: Option<&mut StreamCallback<'_>>,
) -> Result<ModelResponse, FoundryError> {
    let mut state = StreamAggregator::new();

    while let Some(item) = stream.next().await {
        let chunk = item.map_err(|e| FoundryError::Stream(Box::new(e)))?;
        let Some(text) = state.push(chunk) else {
            continue;
        };
        if let Some(cb) = callback.as_deref_mut() {
            cb(ModelResponseChunk {
                content: vec![Part::text(text)],
            })
            .map_err(|e| FoundryError::Callback(Box::new(e)))?;
        }
    }
    drop(stream);

    state.finish()
}
