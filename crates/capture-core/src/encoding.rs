// File: crates/capture-core/src/encoding.rs
// Summary: Base64 data-URI encoding for captured files.

use std::path::Path;

use base64::Engine as _;

/// `data:<mime>;base64,<payload>` for `bytes`.
pub fn data_uri(bytes: &[u8], mime_type: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, b64)
}

/// Read `path` and encode it as a data URI.
pub fn data_uri_file(path: impl AsRef<Path>, mime_type: &str) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(data_uri(&bytes, mime_type))
}
