//! Local image to base64 payload.
//!
//! The source bytes are passed through untouched: no decoding, resizing or
//! re-compression. The format is sniffed only for the log line.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;

use crate::capture::to_local_path;
use crate::error::{Result, SkinScanError};

/// Read the image behind `uri` and encode it as standard base64.
///
/// # Errors
/// `EncodingFailed` when the URI does not point at a local file, or the
/// file cannot be read, or it is empty.
pub fn encode(uri: &str) -> Result<String> {
    let path = to_local_path(uri).ok_or_else(|| {
        SkinScanError::EncodingFailed(format!("Not a local image reference: {}", uri))
    })?;

    let bytes = std::fs::read(&path)
        .map_err(|e| SkinScanError::EncodingFailed(format!("Failed to read {:?}: {}", path, e)))?;

    if bytes.is_empty() {
        return Err(SkinScanError::EncodingFailed(format!(
            "Image file is empty: {:?}",
            path
        )));
    }

    let format = image::guess_format(&bytes)
        .map(|f| format!("{:?}", f))
        .unwrap_or_else(|_| "unrecognized".to_string());
    info!("Encoding {} bytes ({} format) from {:?}", bytes.len(), format, path);

    Ok(STANDARD.encode(&bytes))
}
