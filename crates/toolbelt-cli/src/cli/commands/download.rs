//! `toolbelt download` – resumable single-stream download.

use anyhow::{Context, Result};
use std::path::Path;
use toolbelt_core::config::ToolbeltConfig;
use toolbelt_core::web::{download_file_with_stats, DownloadOptions};

pub fn run_download(
    cfg: &ToolbeltConfig,
    url: &str,
    path: &Path,
    chunk_size: Option<usize>,
    progress: bool,
    show_headers: bool,
) -> Result<()> {
    let mut opts = DownloadOptions::from_config(&cfg.download);
    if let Some(n) = chunk_size {
        opts.chunk_size = n;
    }
    opts.show_progress |= progress;
    opts.verbose = show_headers;

    let t = download_file_with_stats(path, url, &opts)
        .with_context(|| format!("download {} -> {}", url, path.display()))?;

    if t.already_complete {
        println!(
            "{} already complete ({} bytes)",
            path.display(),
            t.resume_offset
        );
    } else {
        println!(
            "{}: {} bytes written ({} total on disk)",
            path.display(),
            t.bytes_written,
            t.resume_offset + t.bytes_written
        );
    }
    Ok(())
}
