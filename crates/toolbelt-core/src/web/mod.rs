//! HTTP helpers: resumable download and the injectable network policy.

mod download;
mod error;
mod handler;
pub mod policy;
mod progress;
mod resume;

pub use download::{
    download_file, download_file_with_stats, DownloadOptions, Transfer, DEFAULT_CHUNK_SIZE,
    FALLBACK_REMOTE_SIZE,
};
pub use error::DownloadError;
pub use policy::{NetworkBlocked, NetworkPolicy};
pub use progress::ProgressStats;
pub use resume::open_for_download;
