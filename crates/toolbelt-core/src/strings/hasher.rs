//! Content hash of serializable values.

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 (lowercase hex) of the value's compact JSON encoding.
///
/// The value goes through `serde_json::Value` first, whose maps keep keys
/// sorted, so two equal maps hash the same regardless of insertion order.
pub fn hash_object<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let canonical = serde_json::to_value(value).context("serialize value for hashing")?;
    let bytes = serde_json::to_vec(&canonical).context("encode value for hashing")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
