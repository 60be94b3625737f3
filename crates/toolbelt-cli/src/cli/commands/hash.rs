//! `toolbelt hash` – content hash of a parsed document.

use anyhow::{Context, Result};
use std::path::Path;
use toolbelt_core::strings::hash_object;

use super::format::load_document;

pub fn run_hash(path: &Path) -> Result<()> {
    let value = load_document(path).with_context(|| format!("read {}", path.display()))?;
    println!("{}  {}", hash_object(&value)?, path.display());
    Ok(())
}
