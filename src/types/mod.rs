//! Host-framework object model: messages, parts, requests and responses.

pub mod embedding;
pub mod generation;
pub mod message;
pub mod usage;

pub use embedding::*;
pub use generation::*;
pub use message::*;
pub use usage::*;
