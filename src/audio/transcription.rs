//! Speech-to-text.

use base64::Engine;
use tracing::debug;

use super::media::{filename_for_audio, AudioInput};
use crate::config::TranscriptionConfig;
use crate::error::FoundryError;
use crate::provider::wire::TranscriptionRequest;
use crate::provider::OpenAiApi;
use crate::types::{GenerateRequest, Message, ModelResponse, Part};

const BASE64_MARKER: &str = "base64,";

/// Decode the first media part carrying an inline `base64,` payload.
///
/// Returns `MissingInput` when no such part exists.
pub fn extract_audio(messages: &[Message]) -> Result<AudioInput, FoundryError> {
    let (url, content_type) = messages
        .iter()
        .flat_map(|msg| msg.content.iter())
        .find_map(|part| match part {
            Part::Media { url, content_type } if url.contains(BASE64_MARKER) => {
                Some((url, content_type.as_deref()))
            }
            _ => None,
        })
        .ok_or_else(|| FoundryError::MissingInput("audio data".to_string()))?;

    let (prefix, payload) = url
        .split_once(BASE64_MARKER)
        .unwrap_or((url.as_str(), ""));

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| FoundryError::InvalidArgument(format!("failed to decode audio: {e}")))?;
    if data.is_empty() {
        return Err(FoundryError::MissingInput("audio data".to_string()));
    }

    Ok(AudioInput {
        data,
        filename: filename_for_audio(content_type, prefix).to_string(),
    })
}

pub fn build_transcription_request(
    deployment: &str,
    audio: AudioInput,
    request: &GenerateRequest,
) -> TranscriptionRequest {
    let config = TranscriptionConfig::from_bag(request.config.as_ref());
    TranscriptionRequest {
        model: deployment.to_string(),
        file: audio.data,
        filename: audio.filename,
        language: config.language.filter(|l| !l.is_empty()),
        prompt: config.prompt.filter(|p| !p.is_empty()),
        response_format: Some(config.response_format),
        temperature: config.temperature.filter(|t| *t > 0.0),
    }
}

/// Transcribe the audio carried by the request. No vendor call is made when
/// the request has no audio.
pub async fn transcribe(
    api: &dyn OpenAiApi,
    deployment: &str,
    request: &GenerateRequest,
) -> Result<ModelResponse, FoundryError> {
    let audio = extract_audio(&request.messages)?;
    let stt_request = build_transcription_request(deployment, audio, request);
    debug!(
        deployment,
        filename = stt_request.filename.as_str(),
        bytes = stt_request.file.len(),
        "Audio transcription"
    );

    let response = api
        .create_transcription(&stt_request)
        .await
        .map_err(|e| FoundryError::operation("audio transcription failed", e))?;

    Ok(ModelResponse::stopped(vec![Part::text(response.text)]))
}
