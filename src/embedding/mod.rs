//! Text embeddings.

use tracing::debug;

use crate::error::FoundryError;
use crate::provider::wire::EmbeddingRequest;
use crate::provider::OpenAiApi;
use crate::types::{EmbedRequest, EmbedResponse, Embedding};

/// Embed each non-empty document with one vendor call per document.
///
/// Documents with no text are skipped, so the response may hold fewer
/// vectors than the request held documents.
pub async fn embed_documents(
    api: &dyn OpenAiApi,
    deployment: &str,
    request: &EmbedRequest,
) -> Result<EmbedResponse, FoundryError> {
    let mut embeddings = Vec::with_capacity(request.input.len());

    for doc in &request.input {
        let input = doc.text();
        if input.is_empty() {
            continue;
        }

        debug!(model = deployment, chars = input.len(), "Embedding document");
        let response = api
            .create_embeddings(&EmbeddingRequest {
                model: deployment.to_string(),
                input,
            })
            .await
            .map_err(|e| {
                FoundryError::operation(
                    format!("embedding generation failed for model '{deployment}'"),
                    e,
                )
            })?;

        if let Some(first) = response.data.into_iter().next() {
            embeddings.push(Embedding {
                embedding: first.embedding.into_iter().map(|v| v as f32).collect(),
            });
        }
    }

    Ok(EmbedResponse { embeddings })
}
