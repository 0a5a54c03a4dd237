//! Conversation messages to vendor chat messages.

use tracing::debug;

use crate::provider::wire::{ChatMessage, ContentFragment, ImageUrl, ToolCall, UserContent};
use crate::types::{Message, Part, Role, ToolRequest, ToolResponse};

/// Translate a conversation into vendor chat messages, preserving order.
///
/// Messages without content, or whose content yields nothing for their role,
/// are omitted.
pub fn to_chat_messages(messages: &[Message]) -> Vec<ChatMessage> {
    let mut out = Vec::with_capacity(messages.len());
    for msg in messages {
        if msg.content.is_empty() {
            continue;
        }
        match msg.role {
            Role::System => out.extend(system_message(msg)),
            Role::User => out.extend(user_message(msg)),
            Role::Model => out.extend(model_message(msg)),
            Role::Tool => out.extend(tool_messages(msg)),
        }
    }
    out
}

/// A user message needs array content if it has media or more than one part.
pub fn is_multimodal(msg: &Message) -> bool {
    msg.content.len() > 1 || msg.content.iter().any(Part::is_media)
}

/// All text parts of all messages, concatenated in order.
pub fn flatten_text(messages: &[Message]) -> String {
    messages.iter().map(Message::text).collect()
}

/// Call id used on the wire for a tool request or response.
///
/// The framework-side reference wins; without one the id is `call_<name>`,
/// which collides when one tool is called twice in a turn.
pub fn tool_call_id(name: &str, reference: Option<&str>) -> String {
    match reference {
        Some(reference) if !reference.is_empty() => reference.to_string(),
        _ => format!("call_{name}"),
    }
}

// Only the first part counts; later system parts are dropped.
fn system_message(msg: &Message) -> Option<ChatMessage> {
    let text = msg.content.first()?.as_text().unwrap_or_default();
    Some(ChatMessage::System {
        content: text.to_string(),
    })
}

fn user_message(msg: &Message) -> Option<ChatMessage> {
    if !is_multimodal(msg) {
        let text = msg.content.first()?.as_text()?;
        return Some(ChatMessage::User {
            content: UserContent::Text(text.to_string()),
        });
    }

    let fragments: Vec<ContentFragment> = msg
        .content
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(ContentFragment::Text { text: text.clone() }),
            Part::Media { url, .. } => Some(ContentFragment::ImageUrl {
                image_url: ImageUrl { url: url.clone() },
            }),
            Part::ToolRequest(_) | Part::ToolResponse(_) => None,
        })
        .collect();

    if fragments.is_empty() {
        return None;
    }
    Some(ChatMessage::User {
        content: UserContent::Parts(fragments),
    })
}

fn model_message(msg: &Message) -> Option<ChatMessage> {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for part in &msg.content {
        match part {
            Part::Text { text: t } => text.push_str(t),
            Part::ToolRequest(req) => tool_calls.extend(outbound_tool_call(req)),
            Part::Media { .. } | Part::ToolResponse(_) => {}
        }
    }

    if text.is_empty() && tool_calls.is_empty() {
        return None;
    }
    Some(ChatMessage::Assistant {
        content: (!text.is_empty()).then_some(text),
        tool_calls,
    })
}

fn outbound_tool_call(req: &ToolRequest) -> Option<ToolCall> {
    let arguments = match serde_json::to_string(&req.input) {
        Ok(arguments) => arguments,
        Err(e) => {
            debug!(tool = %req.name, error = %e, "Dropping tool request with unencodable input");
            return None;
        }
    };
    Some(ToolCall::function(
        tool_call_id(&req.name, req.reference.as_deref()),
        &req.name,
        arguments,
    ))
}

fn tool_messages(msg: &Message) -> Vec<ChatMessage> {
    msg.content
        .iter()
        .filter_map(|part| match part {
            Part::ToolResponse(resp) => tool_result(resp),
            _ => None,
        })
        .collect()
}

fn tool_result(resp: &ToolResponse) -> Option<ChatMessage> {
    match serde_json::to_string(&resp.output) {
        Ok(content) => Some(ChatMessage::Tool {
            content,
            tool_call_id: tool_call_id(&resp.name, resp.reference.as_deref()),
        }),
        Err(e) => {
            debug!(tool = %resp.name, error = %e, "Dropping tool response with unencodable output");
            None
        }
    }
}
