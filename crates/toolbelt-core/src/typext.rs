//! Shared type aliases.

/// Dynamic JSON document.
pub type JsonValue = serde_json::Value;

/// Dynamic YAML document.
pub type YamlValue = serde_yaml::Value;

/// Result of `iotools::make_index`, in traversal order.
pub type FileIndex = Vec<crate::iotools::IndexEntry>;

/// Byte counts reported by the downloader.
pub type ByteCount = u64;
