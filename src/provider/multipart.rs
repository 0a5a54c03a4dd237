//! `multipart/form-data` body for transcription uploads.

use super::wire::TranscriptionRequest;

pub(super) fn build_transcription_multipart(
    boundary: &str,
    request: &TranscriptionRequest,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(request.file.len() + 512);

    append_field(&mut body, boundary, "model", &request.model);
    if let Some(language) = &request.language {
        append_field(&mut body, boundary, "language", language.trim());
    }
    if let Some(prompt) = &request.prompt {
        append_field(&mut body, boundary, "prompt", prompt);
    }
    if let Some(format) = &request.response_format {
        append_field(&mut body, boundary, "response_format", format);
    }
    if let Some(temperature) = request.temperature {
        append_field(&mut body, boundary, "temperature", &temperature.to_string());
    }

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            request.filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("Content-Type: {}\r\n\r\n", mime_for_filename(&request.filename)).as_bytes(),
    );
    body.extend_from_slice(&request.file);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

fn append_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

fn mime_for_filename(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "opus" => "audio/opus",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}
