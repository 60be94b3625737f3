//! Document format detection by file extension.

use anyhow::{bail, Result};
use std::path::Path;
use toolbelt_core::iotools;
use toolbelt_core::typext::{JsonValue, YamlValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    JsonXz,
    Jsonl,
    Yaml,
}

impl DocFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        if name.ends_with(".json.xz") {
            return Ok(DocFormat::JsonXz);
        }
        match path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(DocFormat::Json),
            Some("jsonl") | Some("ndjson") => Ok(DocFormat::Jsonl),
            Some("yaml") | Some("yml") => Ok(DocFormat::Yaml),
            _ => bail!(
                "{}: unknown format (expected .json, .json.xz, .jsonl or .yaml)",
                path.display()
            ),
        }
    }
}

/// Loads a document. JSONL files become a JSON array of their lines.
pub fn load_document(path: &Path) -> Result<JsonValue> {
    let value: JsonValue = match DocFormat::from_path(path)? {
        DocFormat::Json => iotools::load_json(path)?,
        DocFormat::JsonXz => iotools::load_json_xz(path)?,
        DocFormat::Jsonl => JsonValue::Array(iotools::load_jsonl(path)?),
        DocFormat::Yaml => {
            let yaml: YamlValue = iotools::load_yaml(path)?;
            serde_json::to_value(yaml)?
        }
    };
    Ok(value)
}

/// Writes a document. For JSONL, an array is written one element per line and
/// any other value as a single line.
pub fn save_document(value: &JsonValue, path: &Path, indent: Option<usize>) -> Result<()> {
    match DocFormat::from_path(path)? {
        DocFormat::Json => iotools::dump_json(value, path, indent)?,
        DocFormat::JsonXz => iotools::dump_json_xz(value, path, indent)?,
        DocFormat::Jsonl => match value {
            JsonValue::Array(items) => iotools::dump_jsonl(items, path)?,
            other => iotools::dump_jsonl(std::slice::from_ref(other), path)?,
        },
        DocFormat::Yaml => iotools::dump_yaml(value, path)?,
    }
    Ok(())
}
