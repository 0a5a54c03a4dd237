//! Chat completion request assembly.

use tracing::debug;

use super::messages::to_chat_messages;
use crate::config::ChatConfig;
use crate::provider::wire::{ChatCompletionRequest, ChatTool, FunctionDefinition, StreamOptions};
use crate::types::{GenerateRequest, ToolDefinition};

/// Build the vendor request for `deployment` from a generation request.
///
/// Streaming requests ask for a trailing usage chunk.
pub fn build_chat_request(
    deployment: &str,
    request: &GenerateRequest,
    stream: bool,
) -> ChatCompletionRequest {
    let config = ChatConfig::from_bag(request.config.as_ref());
    let tools: Vec<ChatTool> = request.tools.iter().map(to_chat_tool).collect();

    // Tool choice without tools is rejected by the service.
    let tool_choice = if tools.is_empty() {
        None
    } else {
        config.tool_choice.map(|choice| choice.to_string())
    };

    debug!(
        deployment,
        messages = request.messages.len(),
        tools = tools.len(),
        stream,
        "Building chat completion request"
    );

    ChatCompletionRequest {
        model: deployment.to_string(),
        messages: to_chat_messages(&request.messages),
        max_tokens: config.max_output_tokens,
        temperature: config.temperature,
        top_p: config.top_p,
        tools,
        tool_choice,
        stream,
        stream_options: stream.then_some(StreamOptions {
            include_usage: true,
        }),
    }
}

fn to_chat_tool(tool: &ToolDefinition) -> ChatTool {
    ChatTool {
        kind: "function".to_string(),
        function: FunctionDefinition {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.input_schema.clone(),
        },
    }
}
