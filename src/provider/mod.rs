//! Vendor API seam and the Azure OpenAI HTTP client.

pub mod azure;
pub mod http;
mod multipart;
pub mod wire;

pub use azure::AzureOpenAiClient;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::FoundryError;
use wire::*;

/// Stream of chat completion chunks. Dropping it releases the connection.
pub type ChunkStream = BoxStream<'static, Result<ChatCompletionChunk, FoundryError>>;

/// Operations of the OpenAI-compatible API this crate relies on.
///
/// `model` fields in the request types name the deployment to call.
#[async_trait]
pub trait OpenAiApi: Send + Sync {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, FoundryError>;

    /// Start a streaming chat completion. Transport failures after the stream
    /// is opened surface as `Err` items.
    async fn chat_completion_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChunkStream, FoundryError>;

    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImagesResponse, FoundryError>;

    /// Synthesize speech, returning the raw audio bytes.
    async fn create_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, FoundryError>;

    async fn create_transcription(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResponse, FoundryError>;

    async fn create_embeddings(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, FoundryError>;
}
