//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Token usage for a generation. All zero when the service reported none.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}
