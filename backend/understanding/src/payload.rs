//! Image payload decoding.
//!
//! Clients send images as raw file bytes, as base64 (optionally a
//! `data:image/...;base64,` URL) inside a JSON field, or as a bare request
//! body that may or may not be base64.

use base64::{engine::general_purpose::STANDARD, Engine};
use docgate_core::ClassificationVerdict;
use thiserror::Error;

/// Default upper bound on decoded image size: 10 MiB.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub enum ImagePayload<'a> {
    /// Uploaded file contents, used as-is.
    File(&'a [u8]),
    /// Base64 text from a JSON field; must decode.
    Base64(&'a str),
    /// Bare body: decoded as base64 when it is valid, used raw otherwise.
    Body(&'a [u8]),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("no image data provided")]
    Missing,

    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("invalid base64 image data: {0}")]
    InvalidBase64(String),
}

impl PayloadError {
    pub fn verdict(&self) -> ClassificationVerdict {
        match self {
            Self::Missing => {
                ClassificationVerdict::failure("No image data provided", "No image data provided")
            }
            Self::TooLarge { limit, .. } => ClassificationVerdict::failure(
                "Image too large",
                format!("Image too large. Maximum size is {}MB.", limit / (1024 * 1024)),
            ),
            Self::InvalidBase64(detail) => ClassificationVerdict::failure(
                format!("Invalid base64 image data: {detail}"),
                "Invalid image data",
            ),
        }
    }
}

/// Decode a payload into image bytes and enforce `max_bytes`.
pub fn decode_payload(
    payload: Option<ImagePayload<'_>>,
    max_bytes: usize,
) -> Result<Vec<u8>, PayloadError> {
    let bytes = match payload.ok_or(PayloadError::Missing)? {
        ImagePayload::File(bytes) => bytes.to_vec(),
        ImagePayload::Base64(text) => decode_base64(text)?,
        ImagePayload::Body(body) => match std::str::from_utf8(body).ok().map(decode_base64) {
            Some(Ok(decoded)) => decoded,
            _ => body.to_vec(),
        },
    };

    if bytes.is_empty() {
        return Err(PayloadError::Missing);
    }
    if bytes.len() > max_bytes {
        return Err(PayloadError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

fn decode_base64(text: &str) -> Result<Vec<u8>, PayloadError> {
    let text = strip_data_url(text.trim());
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| PayloadError::InvalidBase64(e.to_string()))
}

/// `data:image/png;base64,AAAA` -> `AAAA`.
fn strip_data_url(text: &str) -> &str {
    if text.starts_with("data:image") {
        text.split(',').nth(1).unwrap_or("")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_bytes_pass_through() {
        let bytes = decode_payload(Some(ImagePayload::File(b"\x89PNG")), 100).unwrap();
        assert_eq!(bytes, b"\x89PNG");
    }

    #[test]
    fn strips_data_url_prefix() {
        let b64 = format!("data:image/png;base64,{}", STANDARD.encode(b"pixels"));
        let bytes = decode_payload(Some(ImagePayload::Base64(&b64)), 100).unwrap();
        assert_eq!(bytes, b"pixels");
    }

    #[test]
    fn tolerates_wrapped_base64() {
        let b64 = "cGl4\nZWxz\n";
        assert_eq!(decode_payload(Some(ImagePayload::Base64(b64)), 100).unwrap(), b"pixels");
    }

    #[test]
    fn bad_base64_field_is_an_error() {
        let err = decode_payload(Some(ImagePayload::Base64("!!not base64!!")), 100).unwrap_err();
        assert!(matches!(err, PayloadError::InvalidBase64(_)));
        assert_eq!(err.verdict().error.as_deref(), Some("Invalid image data"));
    }

    #[test]
    fn body_falls_back_to_raw_bytes() {
        let encoded = STANDARD.encode(b"pixels");
        assert_eq!(
            decode_payload(Some(ImagePayload::Body(encoded.as_bytes())), 100).unwrap(),
            b"pixels"
        );
        let raw = b"\xff\xd8\xff\xe0 jpeg";
        assert_eq!(decode_payload(Some(ImagePayload::Body(raw)), 100).unwrap(), raw);
    }

    #[test]
    fn missing_and_empty_payloads() {
        assert_eq!(decode_payload(None, 100), Err(PayloadError::Missing));
        assert_eq!(decode_payload(Some(ImagePayload::File(b"")), 100), Err(PayloadError::Missing));
        let v = PayloadError::Missing.verdict();
        assert_eq!(v.reason, "No image data provided");
        assert!(!v.is_academic);
    }

    #[test]
    fn enforces_size_limit() {
        let big = vec![0u8; DEFAULT_MAX_IMAGE_BYTES + 1];
        let err = decode_payload(Some(ImagePayload::File(&big)), DEFAULT_MAX_IMAGE_BYTES).unwrap_err();
        assert_eq!(
            err,
            PayloadError::TooLarge { size: DEFAULT_MAX_IMAGE_BYTES + 1, limit: DEFAULT_MAX_IMAGE_BYTES }
        );
        let v = err.verdict();
        assert_eq!(v.reason, "Image too large");
        assert_eq!(v.error.as_deref(), Some("Image too large. Maximum size is 10MB."));

        let exact = vec![1u8; 64];
        assert_eq!(decode_payload(Some(ImagePayload::File(&exact)), 64).unwrap().len(), 64);
    }
}
