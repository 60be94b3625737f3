//! String helpers: base64 codec and value hashing.

pub mod b64;
pub mod hasher;

pub use b64::{
    b64_decode_to_bytes, b64_decode_to_str, b64_encode_from_bytes, b64_encode_from_str,
    DecodeError,
};
pub use hasher::hash_object;
