//! Azure AI Foundry provider.
//!
//! Adapts a generative-AI framework's message, tool and embedding model to
//! Azure's OpenAI-compatible API: chat completion (unary and streaming),
//! image generation, text-to-speech, transcription and embeddings.
//!
//! # Quick Start
//!
//! ```no_run
//! use azure_foundry::prelude::*;
//!
//! # async fn example() -> azure_foundry::error::Result<()> {
//! let plugin = AzureFoundry::from_env()?;
//! let model = plugin.define_model(ModelDefinition::chat("gpt-4o", true), None);
//!
//! let request = GenerateRequest::new(vec![Message::user("Hello!")]);
//! let response = model.generate(&request, None).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod config;
pub mod convert;
pub mod embedding;
pub mod error;
pub mod image;
pub mod models;
pub mod plugin;
pub mod prelude;
pub mod provider;
pub mod streaming;
pub mod types;
pub mod util;

pub use plugin::{AzureFoundry, FoundryEmbedder, FoundryModel, PROVIDER};
