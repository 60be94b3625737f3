//! CLI command handlers. Each command is in its own file.

mod b64;
mod completions;
mod convert;
mod download;
mod format;
mod hash;
mod index;

pub use b64::run_b64;
pub use completions::run_completions;
pub use convert::run_convert;
pub use download::run_download;
pub use hash::run_hash;
pub use index::run_index;
