//! Base64 helpers with an optional path/url-safe alphabet.
//!
//! Encoding is always padded. Decoding accepts either alphabet: `-` and `_`
//! are mapped back to `+` and `/` before the standard decoder runs.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Rewrites the url-safe characters to the standard alphabet.
fn ensure_standard_alphabet(b64: &str) -> String {
    b64.replace('-', "+").replace('_', "/")
}

/// Encode bytes. With `url_safe`, `+` becomes `-` and `/` becomes `_`.
pub fn b64_encode_from_bytes(bytes: &[u8], url_safe: bool) -> String {
    if url_safe {
        URL_SAFE.encode(bytes)
    } else {
        STANDARD.encode(bytes)
    }
}

/// Decode a base64 string in either alphabet.
pub fn b64_decode_to_bytes(b64: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(ensure_standard_alphabet(b64))?)
}

/// Encode the UTF-8 bytes of `plain`.
pub fn b64_encode_from_str(plain: &str, url_safe: bool) -> String {
    b64_encode_from_bytes(plain.as_bytes(), url_safe)
}

/// Decode to bytes, then interpret them as UTF-8.
pub fn b64_decode_to_str(b64: &str) -> Result<String, DecodeError> {
    Ok(String::from_utf8(b64_decode_to_bytes(b64)?)?)
}
