//! Shared test helpers and a mock vendor API.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use azure_foundry::error::FoundryError;
use azure_foundry::provider::wire::*;
use azure_foundry::provider::{ChunkStream, OpenAiApi};
use azure_foundry::AzureFoundry;

/// A mock vendor API that records requests and replays queued responses.
#[derive(Default)]
pub struct MockApi {
    pub chat_requests: Mutex<Vec<ChatCompletionRequest>>,
    pub image_requests: Mutex<Vec<ImageGenerationRequest>>,
    pub speech_requests: Mutex<Vec<SpeechRequest>>,
    pub transcription_requests: Mutex<Vec<TranscriptionRequest>>,
    pub embedding_requests: Mutex<Vec<EmbeddingRequest>>,
    completions: Mutex<Vec<ChatCompletion>>,
    streams: Mutex<Vec<ChunkStream>>,
    images: Mutex<Vec<ImagesResponse>>,
    audio: Mutex<Vec<Vec<u8>>>,
    transcripts: Mutex<Vec<TranscriptionResponse>>,
    embeddings: Mutex<Vec<EmbeddingResponse>>,
    failure: Mutex<Option<(u16, String)>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails with an API error of the given status.
    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        let api = Self::default();
        *api.failure.lock().unwrap() = Some((status, message.to_string()));
        Arc::new(api)
    }

    /// A plugin backed by this mock.
    pub fn plugin(self: &Arc<Self>) -> AzureFoundry {
        AzureFoundry::with_client(self.clone())
    }

    pub fn queue_completion(&self, completion: ChatCompletion) {
        self.completions.lock().unwrap().push(completion);
    }

    pub fn queue_chunks(&self, chunks: Vec<Result<ChatCompletionChunk, FoundryError>>) {
        self.queue_stream(Box::pin(futures::stream::iter(chunks)));
    }

    pub fn queue_stream(&self, stream: ChunkStream) {
        self.streams.lock().unwrap().push(stream);
    }

    pub fn queue_images(&self, response: ImagesResponse) {
        self.images.lock().unwrap().push(response);
    }

    pub fn queue_audio(&self, bytes: &[u8]) {
        self.audio.lock().unwrap().push(bytes.to_vec());
    }

    pub fn queue_transcript(&self, text: &str) {
        self.transcripts.lock().unwrap().push(TranscriptionResponse {
            text: text.to_string(),
            ..Default::default()
        });
    }

    pub fn queue_embedding(&self, vector: Vec<f64>) {
        self.embeddings.lock().unwrap().push(EmbeddingResponse {
            data: vec![EmbeddingData {
                index: 0,
                embedding: vector,
            }],
        });
    }

    /// Total number of vendor calls made.
    pub fn calls(&self) -> usize {
        self.chat_requests.lock().unwrap().len()
            + self.image_requests.lock().unwrap().len()
            + self.speech_requests.lock().unwrap().len()
            + self.transcription_requests.lock().unwrap().len()
            + self.embedding_requests.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<(), FoundryError> {
        match &*self.failure.lock().unwrap() {
            Some((status, message)) => Err(FoundryError::api(*status, message.clone())),
            None => Ok(()),
        }
    }
}

fn next<T>(queue: &Mutex<Vec<T>>, what: &str) -> Result<T, FoundryError> {
    let mut queue = queue.lock().unwrap();
    if queue.is_empty() {
        return Err(FoundryError::InvalidState(format!("no {what} queued")));
    }
    Ok(queue.remove(0))
}

#[async_trait]
impl OpenAiApi for MockApi {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, FoundryError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.check_failure()?;
        next(&self.completions, "completion")
    }

    async fn chat_completion_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChunkStream, FoundryError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.check_failure()?;
        next(&self.streams, "stream")
    }

    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImagesResponse, FoundryError> {
        self.image_requests.lock().unwrap().push(request.clone());
        self.check_failure()?;
        next(&self.images, "image response")
    }

    async fn create_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, FoundryError> {
        self.speech_requests.lock().unwrap().push(request.clone());
        self.check_failure()?;
        next(&self.audio, "audio")
    }

    async fn create_transcription(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResponse, FoundryError> {
        self.transcription_requests
            .lock()
            .unwrap()
            .push(request.clone());
        self.check_failure()?;
        next(&self.transcripts, "transcript")
    }

    async fn create_embeddings(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, FoundryError> {
        self.embedding_requests.lock().unwrap().push(request.clone());
        self.check_failure()?;
        next(&self.embeddings, "embedding")
    }
}

// Chunk builders

pub fn text_chunk(text: &str) -> ChatCompletionChunk {
    ChatCompletionChunk {
        choices: vec![ChunkChoice {
            delta: ChunkDelta {
                content: Some(text.to_string()),
                tool_calls: None,
            },
            ..Default::default()
        }],
        usage: None,
    }
}

pub fn tool_chunk(
    index: u32,
    id: Option<&str>,
    name: Option<&str>,
    arguments: &str,
) -> ChatCompletionChunk {
    ChatCompletionChunk {
        choices: vec![ChunkChoice {
            delta: ChunkDelta {
                content: None,
                tool_calls: Some(vec![ToolCallDelta {
                    index,
                    id: id.map(str::to_string),
                    function: Some(FunctionDelta {
                        name: name.map(str::to_string),
                        arguments: Some(arguments.to_string()),
                    }),
                }]),
            },
            ..Default::default()
        }],
        usage: None,
    }
}

pub fn finish_chunk(reason: &str) -> ChatCompletionChunk {
    ChatCompletionChunk {
        choices: vec![ChunkChoice {
            finish_reason: Some(reason.to_string()),
            ..Default::default()
        }],
        usage: None,
    }
}

pub fn usage_chunk(prompt: u32, completion: u32) -> ChatCompletionChunk {
    ChatCompletionChunk {
        choices: vec![],
        usage: Some(CompletionUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: prompt + completion,
        }),
    }
}

pub fn completion(content: Option<&str>, tool_calls: Vec<ToolCall>, finish: &str) -> ChatCompletion {
    ChatCompletion {
        choices: vec![Choice {
            index: 0,
            message: ResponseMessage {
                content: content.map(str::to_string),
                tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
            },
            finish_reason: Some(finish.to_string()),
        }],
        usage: Some(CompletionUsage {
            prompt_tokens: 12,
            completion_tokens: 8,
            total_tokens: 20,
        }),
    }
}
