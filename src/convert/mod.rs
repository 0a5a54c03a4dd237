//! Translation between framework messages and the vendor chat API.

pub mod messages;
pub mod request;
pub mod response;

pub use messages::{flatten_text, is_multimodal, to_chat_messages, tool_call_id};
pub use request::build_chat_request;
pub use response::{decode_tool_arguments, from_chat_completion, map_finish_reason, usage_from};
