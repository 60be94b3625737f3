//! Download error type.

use std::fmt;
use std::path::PathBuf;

use super::policy::NetworkBlocked;

/// Error returned by `download_file`. Wraps the underlying curl / io error
/// unchanged so callers can inspect it through `source()`.
#[derive(Debug)]
pub enum DownloadError {
    /// `chunk_size` was zero.
    InvalidChunkSize,
    /// URL did not parse or is not http/https.
    InvalidUrl { url: String, reason: String },
    /// The injected network policy refused the connection.
    Blocked(NetworkBlocked),
    /// Target file could not be opened (missing parent, permission denied).
    Open { path: PathBuf, source: std::io::Error },
    /// Curl reported a transport failure (DNS, connect, timeout, reset).
    Transport(curl::Error),
    /// Final response status was neither 2xx nor 416.
    Http(u32),
    /// Writing the body to the target file failed (disk full, etc.).
    Storage(std::io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::InvalidChunkSize => write!(f, "chunk size must be positive"),
            DownloadError::InvalidUrl { url, reason } => {
                write!(f, "invalid download URL {}: {}", url, reason)
            }
            DownloadError::Blocked(e) => write!(f, "{}", e),
            DownloadError::Open { path, source } => {
                write!(f, "failed to open {}: {}", path.display(), source)
            }
            DownloadError::Transport(e) => write!(f, "{}", e),
            DownloadError::Http(code) => write!(f, "HTTP {}", code),
            DownloadError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Blocked(e) => Some(e),
            DownloadError::Open { source, .. } => Some(source),
            DownloadError::Transport(e) => Some(e),
            DownloadError::Storage(e) => Some(e),
            DownloadError::InvalidChunkSize
            | DownloadError::InvalidUrl { .. }
            | DownloadError::Http(_) => None,
        }
    }
}

impl From<NetworkBlocked> for DownloadError {
    fn from(e: NetworkBlocked) -> Self {
        DownloadError::Blocked(e)
    }
}

impl From<curl::Error> for DownloadError {
    fn from(e: curl::Error) -> Self {
        DownloadError::Transport(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn http_error_display() {
        assert_eq!(DownloadError::Http(404).to_string(), "HTTP 404");
    }

    #[test]
    fn open_error_keeps_io_source() {
        let err = DownloadError::Open {
            path: PathBuf::from("/nope/file.bin"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nope/file.bin"));
        let source = err.source().expect("source");
        let io = source.downcast_ref::<std::io::Error>().expect("io error");
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn blocked_converts_from_policy_error() {
        let err: DownloadError = NetworkBlocked {
            target: "http://x/".into(),
        }
        .into();
        assert!(matches!(err, DownloadError::Blocked(_)));
        assert!(err.source().is_some());
    }
}
