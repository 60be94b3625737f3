//! Easy2 handler for the resumable download.
//! Tracks the final response status and Content-Length, discards bodies of
//! non-2xx responses, and appends accepted body bytes to the sink in
//! `chunk_size` writes.

use std::io::Write;
use std::str;

use super::download::FALLBACK_REMOTE_SIZE;
use super::progress::ConsoleProgress;

/// Handler state for one transfer. Implements curl's Handler for Easy2.
pub(crate) struct DownloadHandler<W: Write> {
    sink: W,
    chunk_size: usize,
    /// Pending body bytes; always shorter than `chunk_size` between writes.
    buf: Vec<u8>,
    /// Header lines of the current response (cleared on each status line, so
    /// redirects leave only the final response).
    pub(crate) response_headers: Vec<String>,
    pub(crate) status: Option<u32>,
    pub(crate) content_length: Option<u64>,
    pub(crate) bytes_written: u64,
    pub(crate) chunks_written: u64,
    storage_error: Option<std::io::Error>,
    show_progress: bool,
    progress: Option<ConsoleProgress>,
}

impl<W: Write> DownloadHandler<W> {
    pub(crate) fn new(sink: W, chunk_size: usize) -> Self {
        Self {
            sink,
            chunk_size,
            buf: Vec::new(),
            response_headers: Vec::new(),
            status: None,
            content_length: None,
            bytes_written: 0,
            chunks_written: 0,
            storage_error: None,
            show_progress: false,
            progress: None,
        }
    }

    pub(crate) fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Remaining size advertised by the final response, or the fallback guess.
    pub(crate) fn remote_size(&self) -> u64 {
        self.content_length.unwrap_or(FALLBACK_REMOTE_SIZE)
    }

    /// Body bytes of the final response are written only for 2xx statuses.
    fn accepts_body(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    pub(crate) fn take_storage_error(&mut self) -> Option<std::io::Error> {
        self.storage_error.take()
    }

    /// Grow the pending buffer geometrically but never past `chunk_size`.
    fn reserve_for(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed <= self.buf.capacity() {
            return;
        }
        let target = needed.max(self.buf.capacity() * 2).min(self.chunk_size);
        self.buf.reserve_exact(target - self.buf.len());
    }

    fn flush_chunk(&mut self) -> std::io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.sink.write_all(&self.buf)?;
        self.bytes_written += self.buf.len() as u64;
        self.chunks_written += 1;
        tracing::trace!(
            bytes = self.buf.len(),
            total = self.bytes_written,
            "chunk written"
        );
        self.buf.clear();
        if let Some(p) = self.progress.as_mut() {
            p.update(self.bytes_written);
        }
        Ok(())
    }

    /// Keeps whatever arrived before a transport failure so the next call
    /// resumes after it.
    pub(crate) fn flush_received(&mut self) -> std::io::Result<()> {
        if !self.accepts_body() {
            return Ok(());
        }
        self.flush_chunk()?;
        self.sink.flush()
    }

    /// Writes the trailing partial chunk and flushes the sink.
    pub(crate) fn finish(&mut self) -> std::io::Result<()> {
        self.flush_chunk()?;
        self.sink.flush()?;
        if let Some(p) = self.progress.as_mut() {
            p.finish(self.bytes_written);
        }
        Ok(())
    }
}

/// Parses `HTTP/1.1 206 Partial Content` into 206.
pub(crate) fn parse_status_line(line: &str) -> Option<u32> {
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}

impl<W: Write> curl::easy::Handler for DownloadHandler<W> {
    fn header(&mut self, data: &[u8]) -> bool {
        if let Ok(s) = str::from_utf8(data) {
            let line = s.trim_end();
            if let Some(code) = parse_status_line(line) {
                self.response_headers.clear();
                self.status = Some(code);
                self.content_length = None;
            } else if let Some((name, value)) = line.split_once(':') {
                if name.trim().eq_ignore_ascii_case("content-length") {
                    self.content_length = value.trim().parse::<u64>().ok();
                }
            }
            if !line.is_empty() {
                self.response_headers.push(line.to_string());
            }
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        if !self.accepts_body() {
            // 416 and error pages: swallow the body so the file stays untouched.
            return Ok(data.len());
        }
        if self.show_progress && self.progress.is_none() {
            self.progress = Some(ConsoleProgress::new(self.remote_size()));
        }
        let mut rest = data;
        while !rest.is_empty() {
            let take = (self.chunk_size - self.buf.len()).min(rest.len());
            self.reserve_for(take);
            self.buf.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
            if self.buf.len() == self.chunk_size {
                if let Err(e) = self.flush_chunk() {
                    tracing::warn!("download write failed: {}", e);
                    self.storage_error = Some(e);
                    return Ok(0); // abort transfer
                }
            }
        }
        Ok(data.len())
    }
}
