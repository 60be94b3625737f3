//! Minimal HTTP/1.1 server that supports Range GET for integration tests.
//!
//! Serves a single static body. `Range: bytes=N-` gets 206 with the suffix, an
//! offset at or past the end gets 416, no Range gets 200 with the full body.
//! Options can ignore Range entirely or cut the body short.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct RangeServerOptions {
    /// If false, omit `Content-Length` and end the body by closing the connection.
    pub send_content_length: bool,
    /// If set, every request is answered with this status and an HTML error body.
    pub fail_with: Option<u16>,
    /// If false, GET ignores Range and always returns 200 with the full body.
    pub support_ranges: bool,
    /// If set, the connection is closed after this many body bytes, although
    /// the headers advertise the whole response.
    pub close_after: Option<usize>,
}

impl Default for RangeServerOptions {
    fn default() -> Self {
        Self {
            send_content_length: true,
            fail_with: None,
            support_ranges: true,
            close_after: None,
        }
    }
}

/// Handle to a running server.
pub struct RangeServer {
    pub url: String,
    requests: Arc<AtomicUsize>,
    last_range: Arc<Mutex<Option<String>>>,
}

impl RangeServer {
    /// Number of requests served so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Raw `Range` header value of the most recent request.
    pub fn last_range(&self) -> Option<String> {
        self.last_range.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body`. The server runs
/// until the process exits.
pub fn start(body: Vec<u8>) -> RangeServer {
    start_with_options(body, RangeServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: RangeServerOptions) -> RangeServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let requests = Arc::new(AtomicUsize::new(0));
    let last_range = Arc::new(Mutex::new(None));
    {
        let requests = Arc::clone(&requests);
        let last_range = Arc::clone(&last_range);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let body = Arc::clone(&body);
                let requests = Arc::clone(&requests);
                let last_range = Arc::clone(&last_range);
                thread::spawn(move || handle(stream, &body, opts, &requests, &last_range));
            }
        });
    }
    RangeServer {
        url: format!("http://127.0.0.1:{}/file.bin", port),
        requests,
        last_range,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: RangeServerOptions,
    requests: &AtomicUsize,
    last_range: &Mutex<Option<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(10)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, range_raw) = parse_request(request);
    requests.fetch_add(1, Ordering::SeqCst);
    *last_range.lock().unwrap() = range_raw.clone();

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    if let Some(code) = opts.fail_with {
        let page = b"<html>error</html>";
        let response = format!(
            "HTTP/1.1 {} Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            code,
            page.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(page);
        return;
    }

    let total = body.len() as u64;
    let start = if opts.support_ranges {
        range_raw.as_deref().and_then(parse_range_start)
    } else {
        None
    };
    let (status, content_range, slice) = match start {
        Some(start) if start >= total && total > 0 => (
            "416 Range Not Satisfiable",
            format!("bytes */{}", total),
            &body[0..0],
        ),
        Some(start) => {
            let start = start.min(total) as usize;
            (
                "206 Partial Content",
                format!("bytes {}-{}/{}", start, total.saturating_sub(1), total),
                &body[start..],
            )
        }
        None => (
            "200 OK",
            format!("bytes 0-{}/{}", total.saturating_sub(1), total),
            body,
        ),
    };
    let length_header = if opts.send_content_length {
        format!("Content-Length: {}\r\n", slice.len())
    } else {
        String::new()
    };
    let range_headers = if opts.support_ranges {
        format!("Content-Range: {}\r\nAccept-Ranges: bytes\r\n", content_range)
    } else {
        String::new()
    };
    let response = format!(
        "HTTP/1.1 {}\r\n{}{}Connection: close\r\n\r\n",
        status, length_header, range_headers
    );
    let _ = stream.write_all(response.as_bytes());
    let sent = opts.close_after.map_or(slice.len(), |k| k.min(slice.len()));
    let _ = stream.write_all(&slice[..sent]);
    let _ = stream.flush();
    let _ = stream.shutdown(std::net::Shutdown::Write);
}

/// Returns (method, raw Range header value).
fn parse_request(request: &str) -> (&str, Option<String>) {
    let mut method = "";
    let mut range = None;
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if method.is_empty() {
            method = line.split_whitespace().next().unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("range") {
                range = Some(value.trim().to_string());
            }
        }
    }
    (method, range)
}

/// Start offset of `bytes=N-` (end bound, if any, is ignored).
fn parse_range_start(value: &str) -> Option<u64> {
    let spec = value.strip_prefix("bytes=")?;
    let (start, _) = spec.split_once('-')?;
    start.trim().parse().ok()
}
