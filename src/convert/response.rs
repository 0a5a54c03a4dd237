//! Vendor chat completions back to framework responses.

use serde_json::{Map, Value};
use tracing::debug;

use crate::provider::wire::{ChatCompletion, CompletionUsage, ToolCall};
use crate::types::{FinishReason, Message, ModelResponse, Part, Role, ToolRequest, Usage};

/// Convert a unary chat completion.
///
/// Only the first choice is used. Tool calls with undecodable arguments are
/// skipped individually.
pub fn from_chat_completion(completion: ChatCompletion) -> ModelResponse {
    let usage = usage_from(completion.usage);

    let Some(choice) = completion.choices.into_iter().next() else {
        return ModelResponse {
            message: Message::new(Role::Model, Vec::new()),
            finish_reason: FinishReason::Unknown,
            usage,
        };
    };

    let mut content = Vec::new();
    if let Some(text) = choice.message.content.filter(|t| !t.is_empty()) {
        content.push(Part::text(text));
    }
    for call in choice.message.tool_calls.unwrap_or_default() {
        if let Some(request) = inbound_tool_request(call) {
            content.push(Part::ToolRequest(request));
        }
    }

    ModelResponse {
        message: Message::new(Role::Model, content),
        finish_reason: choice
            .finish_reason
            .as_deref()
            .map(map_finish_reason)
            .unwrap_or(FinishReason::Other),
        usage,
    }
}

fn inbound_tool_request(call: ToolCall) -> Option<ToolRequest> {
    if !call.is_function() || call.id.is_empty() {
        return None;
    }
    match decode_tool_arguments(&call.function.arguments) {
        Ok(input) => Some(ToolRequest {
            name: call.function.name,
            input,
            reference: Some(call.id),
        }),
        Err(e) => {
            debug!(tool = %call.function.name, error = %e, "Skipping tool call with malformed arguments");
            None
        }
    }
}

/// Decode tool-call arguments: a JSON object, or `null` for no input.
pub fn decode_tool_arguments(raw: &str) -> Result<Value, serde_json::Error> {
    Ok(serde_json::from_str::<Option<Map<String, Value>>>(raw)?
        .map(Value::Object)
        .unwrap_or(Value::Null))
}

/// Normalize a vendor finish reason.
pub fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "content_filter" => FinishReason::Blocked,
        "tool_calls" | "function_call" => FinishReason::Stop,
        _ => FinishReason::Other,
    }
}

/// Usage is only reported when the prompt token count is non-zero.
pub fn usage_from(usage: Option<CompletionUsage>) -> Usage {
    match usage {
        Some(u) if u.prompt_tokens > 0 => Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        },
        _ => Usage::default(),
    }
}
