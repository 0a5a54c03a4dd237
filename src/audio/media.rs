//! Audio payload helpers.

/// Decoded audio ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInput {
    pub data: Vec<u8>,
    pub filename: String,
}

/// Upload filename for an audio payload. The service sniffs the format from
/// the extension.
///
/// The declared content type wins; otherwise the data-URI prefix is used.
pub fn filename_for_audio(content_type: Option<&str>, data_uri_prefix: &str) -> &'static str {
    content_type
        .and_then(normalize_mime_type)
        .and_then(extension_for_mime)
        .or_else(|| extension_in_prefix(data_uri_prefix))
        .map(filename_for_extension)
        .unwrap_or("audio.mp3")
}

fn normalize_mime_type(mime_type: &str) -> Option<&str> {
    let normalized = mime_type
        .split(';')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    if normalized.is_empty() {
        return None;
    }
    Some(normalized)
}

fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    match mime_type.to_ascii_lowercase().as_str() {
        "audio/mpeg" | "audio/mp3" | "audio/mpga" => Some("mp3"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some("wav"),
        "audio/opus" => Some("opus"),
        "audio/webm" => Some("webm"),
        "audio/ogg" => Some("ogg"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/mp4" | "audio/x-m4a" => Some("m4a"),
        _ => None,
    }
}

// "data:audio/wav;base64," -> "audio/wav"
fn extension_in_prefix(prefix: &str) -> Option<&'static str> {
    let mime = prefix.strip_prefix("data:").unwrap_or(prefix);
    normalize_mime_type(mime).and_then(extension_for_mime)
}

fn filename_for_extension(extension: &str) -> &'static str {
    match extension {
        "wav" => "audio.wav",
        "opus" => "audio.opus",
        "webm" => "audio.webm",
        "ogg" => "audio.ogg",
        "flac" => "audio.flac",
        "m4a" => "audio.m4a",
        _ => "audio.mp3",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_from_content_type() {
        assert_eq!(filename_for_audio(Some("audio/mpeg"), ""), "audio.mp3");
        assert_eq!(filename_for_audio(Some("audio/wav; codecs=1"), ""), "audio.wav");
        assert_eq!(filename_for_audio(Some("audio/flac"), "data:audio/wav;"), "audio.flac");
    }

    #[test]
    fn filename_from_data_uri_prefix() {
        assert_eq!(filename_for_audio(None, "data:audio/wav;"), "audio.wav");
        assert_eq!(filename_for_audio(None, "data:audio/opus;"), "audio.opus");
        assert_eq!(filename_for_audio(Some("text/plain"), "data:audio/ogg;"), "audio.ogg");
    }

    #[test]
    fn unknown_formats_default_to_mp3() {
        assert_eq!(filename_for_audio(None, "data:application/octet-stream;"), "audio.mp3");
        assert_eq!(filename_for_audio(None, ""), "audio.mp3");
    }
}
