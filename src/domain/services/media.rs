use crate::error::AppError;
use base64::{Engine as _, engine::general_purpose::STANDARD};

pub struct DecodedImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// `cover.png`, `cover.jpeg`, ... derived from the mime subtype.
    pub fn file_name(&self, stem: &str) -> String {
        let ext = self
            .mime
            .split('/')
            .nth(1)
            .map(|sub| sub.split('+').next().unwrap_or(sub))
            .filter(|sub| !sub.is_empty())
            .unwrap_or("bin");
        format!("{}.{}", stem, ext)
    }
}

/// Decodes `data:<mime>;base64,<payload>`.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, AppError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| AppError::Validation("Image must be a data URI".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::Validation("Malformed data URI".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::Validation("Only base64 data URIs are supported".into()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::Validation(format!("Invalid base64 image: {}", e)))?;

    Ok(DecodedImage {
        mime: if mime.is_empty() { "application/octet-stream".to_string() } else { mime.to_string() },
        bytes,
    })
}
