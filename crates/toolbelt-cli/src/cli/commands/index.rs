//! `toolbelt index` – list files with size and mtime.

use anyhow::{Context, Result};
use std::path::Path;
use toolbelt_core::iotools::{dumps_json, make_index, IndexOptions};

pub fn run_index(dir: &Path, recursive: bool, reverse: bool, json: bool) -> Result<()> {
    let opts = IndexOptions { recursive, reverse };
    let index = make_index(dir, &opts).with_context(|| format!("index {}", dir.display()))?;

    if json {
        println!("{}", dumps_json(&index, Some(2))?);
        return Ok(());
    }
    for entry in &index {
        println!(
            "{:>12} {:>17.3} {}",
            entry.props.size, entry.props.mtime, entry.path
        );
    }
    Ok(())
}
