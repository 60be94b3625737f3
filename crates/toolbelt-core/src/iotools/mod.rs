//! File helpers: JSON / JSONL / YAML load-dump wrappers and the file indexer.

pub mod file_indexer;
pub mod json;
pub mod yaml;

use std::path::PathBuf;

pub use file_indexer::{
    make_index, natural_cmp, sort_file_paths_with_dirs_separated, FileProperties, IndexEntry,
    IndexOptions,
};
pub use json::{
    dump_json, dump_json_xz, dump_jsonl, dumps_json, dumps_jsonl, load_json, load_json_xz,
    load_jsonl, loads_json, loads_jsonl,
};
pub use yaml::{dump_yaml, dumps_yaml, load_yaml, loads_yaml};

/// Errors from the load/dump helpers. Parser errors are kept as the source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("jsonl line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn io_err(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}
