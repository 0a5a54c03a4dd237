//! Azure OpenAI HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::http::{auth_headers, parse_sse_data, shared_client, status_to_error, LineBuffer};
use super::multipart::build_transcription_multipart;
use super::wire::*;
use super::{ChunkStream, OpenAiApi};
use crate::config::{Credential, FoundryConfig};
use crate::error::FoundryError;
use crate::util::timeout::with_timeout;

/// Client for deployment-scoped Azure OpenAI endpoints:
/// `{endpoint}/openai/deployments/{deployment}/{operation}?api-version={version}`.
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    endpoint: String,
    api_version: String,
    credential: Credential,
    timeout: Duration,
}

impl AzureOpenAiClient {
    /// Validate the configuration and build a ready-to-use client.
    pub fn new(config: &FoundryConfig) -> Result<Self, FoundryError> {
        config.validate()?;
        Ok(Self {
            endpoint: config.endpoint.trim().trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            credential: config.credential.clone(),
            timeout: config.timeout,
        })
    }

    fn url(&self, deployment: &str, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            self.endpoint, deployment, operation, self.api_version
        )
    }

    async fn send(
        &self,
        deployment: &str,
        operation: &str,
        build: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Response, FoundryError> {
        let url = self.url(deployment, operation);
        debug!(deployment, operation, "Azure OpenAI request");

        let response = with_timeout(self.timeout, async move {
            Ok(build(shared_client().post(&url).headers(headers)).send().await?)
        })
        .await?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(response)
    }

    async fn post_json<B, R>(
        &self,
        deployment: &str,
        operation: &str,
        body: &B,
    ) -> Result<R, FoundryError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let headers = auth_headers(&self.credential).await?;
        let response = self
            .send(deployment, operation, |req| req.json(body), headers)
            .await?;
        let text = with_timeout(self.timeout, async move { Ok(response.text().await?) }).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl OpenAiApi for AzureOpenAiClient {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, FoundryError> {
        self.post_json(&request.model, "chat/completions", request)
            .await
    }

    async fn chat_completion_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChunkStream, FoundryError> {
        let headers = auth_headers(&self.credential).await?;
        let response = self
            .send(
                &request.model,
                "chat/completions",
                |req| req.json(request),
                headers,
            )
            .await?;

        let byte_stream = response.bytes_stream();

        let stream = async_stream::stream! {
            let mut lines = LineBuffer::new();
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(FoundryError::Network(e));
                        break;
                    }
                };

                for line in lines.push(&chunk) {
                    if line.is_empty() || line.starts_with(':') {
                        continue;
                    }

                    if let Some(data) = parse_sse_data(&line) {
                        match serde_json::from_str::<ChatCompletionChunk>(data) {
                            Ok(parsed) => yield Ok(parsed),
                            Err(e) => debug!(error = %e, "Skipping unparseable stream line"),
                        }
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn generate_images(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImagesResponse, FoundryError> {
        self.post_json(&request.model, "images/generations", request)
            .await
    }

    async fn create_speech(&self, request: &SpeechRequest) -> Result<Vec<u8>, FoundryError> {
        let headers = auth_headers(&self.credential).await?;
        let response = self
            .send(&request.model, "audio/speech", |req| req.json(request), headers)
            .await?;

        let content_type = content_type_of(&response);
        if content_type.starts_with("application/json") {
            return Err(FoundryError::InvalidState(
                "Expected audio payload, got JSON response".to_string(),
            ));
        }

        let bytes = with_timeout(self.timeout, async move { Ok(response.bytes().await?) }).await?;
        if bytes.is_empty() {
            return Err(FoundryError::InvalidState(
                "Speech response contained empty audio payload".to_string(),
            ));
        }
        Ok(bytes.to_vec())
    }

    async fn create_transcription(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResponse, FoundryError> {
        let boundary = format!("foundry-{}", Uuid::new_v4().simple());
        let body = build_transcription_multipart(&boundary, request);

        let mut headers = auth_headers(&self.credential).await?;
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={boundary}")).map_err(
                |e| FoundryError::InvalidArgument(format!("Failed to build multipart content-type: {e}")),
            )?,
        );

        let response = self
            .send(
                &request.model,
                "audio/transcriptions",
                |req| req.body(body),
                headers,
            )
            .await?;

        let content_type = content_type_of(&response);
        let text = with_timeout(self.timeout, async move { Ok(response.text().await?) }).await?;

        // text, srt and vtt formats come back as the transcript itself
        if content_type.starts_with("application/json") {
            Ok(serde_json::from_str(&text)?)
        } else {
            Ok(TranscriptionResponse {
                text,
                ..Default::default()
            })
        }
    }

    async fn create_embeddings(
        &self,
        request: &EmbeddingRequest,
    ) -> Result<EmbeddingResponse, FoundryError> {
        self.post_json(&request.model, "embeddings", request).await
    }
}

fn content_type_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
