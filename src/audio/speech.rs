//! Text-to-speech.

use base64::Engine;
use tracing::debug;

use crate::config::SpeechConfig;
use crate::convert::flatten_text;
use crate::error::FoundryError;
use crate::provider::wire::SpeechRequest;
use crate::provider::OpenAiApi;
use crate::types::{GenerateRequest, ModelResponse, Part};

pub fn build_speech_request(deployment: &str, request: &GenerateRequest) -> SpeechRequest {
    let config = SpeechConfig::from_bag(request.config.as_ref());
    SpeechRequest {
        model: deployment.to_string(),
        input: flatten_text(&request.messages),
        voice: config.voice,
        response_format: Some(config.response_format),
        speed: (config.speed > 0.0).then_some(config.speed),
    }
}

/// Synthesize speech. The audio comes back base64-encoded in a single text part.
pub async fn generate_speech(
    api: &dyn OpenAiApi,
    deployment: &str,
    request: &GenerateRequest,
) -> Result<ModelResponse, FoundryError> {
    let speech_request = build_speech_request(deployment, request);
    debug!(
        deployment,
        voice = speech_request.voice.as_str(),
        chars = speech_request.input.len(),
        "Speech synthesis"
    );

    let audio = api
        .create_speech(&speech_request)
        .await
        .map_err(|e| FoundryError::operation("speech generation failed", e))?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(audio);
    Ok(ModelResponse::stopped(vec![Part::text(encoded)]))
}
