//! `toolbelt convert` – rewrite a document in another format.

use anyhow::{Context, Result};
use std::path::Path;
use toolbelt_core::config::ToolbeltConfig;

use super::format::{load_document, save_document};

pub fn run_convert(cfg: &ToolbeltConfig, input: &Path, output: &Path) -> Result<()> {
    let value = load_document(input).with_context(|| format!("read {}", input.display()))?;
    save_document(&value, output, cfg.json_output_indent())
        .with_context(|| format!("write {}", output.display()))?;
    tracing::info!(from = %input.display(), to = %output.display(), "converted");
    Ok(())
}
