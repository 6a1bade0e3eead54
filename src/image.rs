use base64::Engine;
use tracing::warn;

/// A screenshot decoded from the request payload, ready to attach to a
/// model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Decode a screenshot sent as raw base64 or as a data URI
/// (`data:image/png;base64,...`).
///
/// Returns `None` when the payload does not decode or is not a recognized
/// raster format; the analyze path then continues text-only.
pub fn decode_inline_image(payload: &str) -> Option<InlineImage> {
    // Browsers send canvas captures as data URIs; strip the header.
    let b64 = match payload.split_once("base64,") {
        Some((_, rest)) => rest,
        None => payload,
    };

    let bytes = match base64::engine::general_purpose::STANDARD.decode(b64.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Discarding undecodable screenshot payload");
            return None;
        }
    };

    match detect_media_type(&bytes) {
        Some(media_type) => Some(InlineImage {
            media_type: media_type.to_string(),
            bytes,
        }),
        None => {
            warn!(len = bytes.len(), "Discarding screenshot with unrecognized format");
            None
        }
    }
}

/// Sniff the media type from magic bytes. PNG, JPEG, GIF and WebP cover
/// what browsers produce for tab captures.
fn detect_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
