//! Resumable single-stream HTTP GET.
//!
//! Resumes from whatever is already on disk by sending `Range: bytes=<len>-`,
//! streams the body into the file in `chunk_size` writes and treats HTTP 416
//! (or an empty remainder) as "already complete".

use std::path::Path;
use std::time::Duration;

use curl::easy::Easy2;

use super::error::DownloadError;
use super::handler::DownloadHandler;
use super::policy::NetworkPolicy;
use super::progress::mib;
use super::resume::{open_for_download, range_from};
use crate::config::DownloadConfig;
use crate::typext::ByteCount;

/// Default write size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Remaining size assumed for progress display when the server sends no
/// `Content-Length`. Does not limit how much is read.
pub const FALLBACK_REMOTE_SIZE: u64 = 1024;

const HTTP_RANGE_NOT_SATISFIABLE: u32 = 416;

/// Options for one `download_file` call.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Size of each write to the target file. Must be positive.
    pub chunk_size: usize,
    /// Draw a progress line on stderr.
    pub show_progress: bool,
    /// Print response headers and a summary to stdout.
    pub verbose: bool,
    pub connect_timeout: Duration,
    pub max_redirections: u32,
    /// Consulted before the request is issued.
    pub network: NetworkPolicy,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            show_progress: false,
            verbose: false,
            connect_timeout: Duration::from_secs(30),
            max_redirections: 10,
            network: NetworkPolicy::allow(),
        }
    }
}

impl DownloadOptions {
    /// Options seeded from the `[download]` config section.
    pub fn from_config(cfg: &DownloadConfig) -> Self {
        Self {
            chunk_size: cfg.chunk_size,
            show_progress: cfg.show_progress,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            max_redirections: cfg.max_redirections,
            ..Self::default()
        }
    }
}

/// What one call did. `bytes_written` counts only bytes appended by this call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    /// Bytes already on disk before the request.
    pub resume_offset: u64,
    /// `Content-Length` of the final response, if sent.
    pub remote_size: Option<u64>,
    pub bytes_written: u64,
    /// Number of writes issued to the file.
    pub chunks_written: u64,
    /// True when the short-circuit path was taken (416 or empty remainder).
    pub already_complete: bool,
}

/// Downloads `url` into `target`, resuming a partial file. Returns the number
/// of bytes written during this call (0 if the file was already complete).
pub fn download_file(
    target: &Path,
    url: &str,
    opts: &DownloadOptions,
) -> Result<ByteCount, DownloadError> {
    download_file_with_stats(target, url, opts).map(|t| t.bytes_written)
}

/// Like `download_file` but returns the full `Transfer` record.
pub fn download_file_with_stats(
    target: &Path,
    url: &str,
    opts: &DownloadOptions,
) -> Result<Transfer, DownloadError> {
    if opts.chunk_size == 0 {
        return Err(DownloadError::InvalidChunkSize);
    }
    validate_url(url)?;
    opts.network.ensure_allowed(url)?;

    let (file, resume_offset) = open_for_download(target)?;
    tracing::debug!(
        path = %target.display(),
        url,
        resume_offset,
        chunk_size = opts.chunk_size,
        "starting download"
    );

    let handler = DownloadHandler::new(file, opts.chunk_size).with_progress(opts.show_progress);
    let mut easy = Easy2::new(handler);
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout)?;
    // Abort when throughput stays below 1 KiB/s for 60s.
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    easy.range(&range_from(resume_offset))?;

    if let Err(e) = easy.perform() {
        if e.is_write_error() {
            if let Some(io_err) = easy.get_mut().take_storage_error() {
                return Err(DownloadError::Storage(io_err));
            }
        }
        if let Err(io_err) = easy.get_mut().flush_received() {
            tracing::warn!("could not keep partial body after transfer failure: {}", io_err);
        }
        return Err(DownloadError::Transport(e));
    }

    let code = easy.response_code()?;
    let handler = easy.get_mut();
    if opts.verbose {
        for line in &handler.response_headers {
            println!("{}", line);
        }
    }

    let remote_size = handler.content_length;
    let mut transfer = Transfer {
        resume_offset,
        remote_size,
        bytes_written: 0,
        chunks_written: 0,
        already_complete: false,
    };

    if code == HTTP_RANGE_NOT_SATISFIABLE || (is_success(code) && remote_size == Some(0)) {
        tracing::info!(url, size = resume_offset, "already downloaded");
        if opts.verbose {
            println!("already downloaded.");
        }
        transfer.already_complete = true;
        return Ok(transfer);
    }
    if !is_success(code) {
        return Err(DownloadError::Http(code));
    }
    if resume_offset > 0 && code == 200 {
        tracing::warn!(
            url,
            resume_offset,
            "server ignored Range and sent the full body; appended as-is"
        );
    }

    handler.finish().map_err(DownloadError::Storage)?;
    transfer.bytes_written = handler.bytes_written;
    transfer.chunks_written = handler.chunks_written;

    tracing::info!(
        url,
        bytes = transfer.bytes_written,
        chunks = transfer.chunks_written,
        "download finished"
    );
    if opts.verbose {
        println!("Downloaded {:.3}MB from {}", mib(transfer.bytes_written), url);
    }
    Ok(transfer)
}

fn is_success(code: u32) -> bool {
    (200..300).contains(&code)
}

fn validate_url(raw: &str) -> Result<(), DownloadError> {
    let invalid = |reason: String| DownloadError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}
