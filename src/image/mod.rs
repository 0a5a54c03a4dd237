//! Image generation (DALL-E, gpt-image).

use tracing::debug;

use crate::config::ImageConfig;
use crate::convert::flatten_text;
use crate::error::FoundryError;
use crate::provider::wire::{ImageData, ImageGenerationRequest};
use crate::provider::OpenAiApi;
use crate::types::{GenerateRequest, ModelResponse, Part};

/// Build the vendor image request. The prompt is every text part of every message.
pub fn build_image_request(deployment: &str, request: &GenerateRequest) -> ImageGenerationRequest {
    let config = ImageConfig::from_bag(request.config.as_ref());
    ImageGenerationRequest {
        model: deployment.to_string(),
        prompt: flatten_text(&request.messages),
        n: Some(config.n).filter(|n| *n > 0),
        size: non_empty(config.size),
        quality: non_empty(config.quality),
        style: non_empty(config.style),
        response_format: non_empty(config.response_format),
    }
}

/// Generate images, returning one text part per image (URL, else base64 payload).
pub async fn generate_image(
    api: &dyn OpenAiApi,
    deployment: &str,
    request: &GenerateRequest,
) -> Result<ModelResponse, FoundryError> {
    let image_request = build_image_request(deployment, request);
    debug!(
        deployment,
        n = image_request.n,
        size = image_request.size.as_deref(),
        "Image generation"
    );

    let response = api
        .generate_images(&image_request)
        .await
        .map_err(|e| FoundryError::operation("image generation failed", e))?;

    let content = response.data.into_iter().filter_map(image_part).collect();
    Ok(ModelResponse::stopped(content))
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn image_part(image: ImageData) -> Option<Part> {
    image
        .url
        .filter(|url| !url.is_empty())
        .or(image.b64_json.filter(|b64| !b64.is_empty()))
        .map(Part::text)
}
