//! Index and sort file trees.
//!
//! `make_index` records size and modification time for every file below a
//! root, together with the `/`-joined path relative to that root.
//! `sort_file_paths_with_dirs_separated` orders paths so that files inside
//! subdirectories are grouped apart from files at the same level.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};

use crate::typext::FileIndex;

/// Log a progress line every this many files.
const LOG_EVERY: usize = 500;

/// Size in bytes and modification time (seconds since the epoch) of one file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FileProperties {
    pub size: u64,
    pub mtime: f64,
}

/// One indexed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Path relative to the index root, `/`-separated on every platform.
    pub path: String,
    #[serde(flatten)]
    pub props: FileProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Visit names in descending order.
    pub reverse: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            reverse: false,
        }
    }
}

/// Walks `root` and returns one entry per file.
///
/// Within each directory, subdirectories are visited first (when recursive),
/// then the directory's own files; both in name order, or reversed.
pub fn make_index(root: &Path, opts: &IndexOptions) -> io::Result<FileIndex> {
    let mut entries = Vec::new();
    index_dir(root, root, opts, &mut entries)?;
    tracing::debug!(root = %root.display(), files = entries.len(), "indexed files");
    Ok(entries)
}

fn index_dir(
    dir: &Path,
    base_root: &Path,
    opts: &IndexOptions,
    out: &mut Vec<IndexEntry>,
) -> io::Result<()> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        // Follows symlinks: a link to a directory is descended into.
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else {
            files.push(path);
        }
    }
    let order = |v: &mut Vec<PathBuf>| {
        v.sort();
        if opts.reverse {
            v.reverse();
        }
    };
    order(&mut dirs);
    order(&mut files);

    if opts.recursive {
        for d in &dirs {
            index_dir(d, base_root, opts, out)?;
        }
    }

    for f in files {
        let meta = fs::metadata(&f).or_else(|_| fs::symlink_metadata(&f))?;
        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        out.push(IndexEntry {
            path: relative_unix_path(&f, base_root),
            props: FileProperties {
                size: meta.len(),
                mtime,
            },
        });
        if out.len() % LOG_EVERY == 0 {
            tracing::debug!(files = out.len(), last = %f.display(), "indexing");
        }
    }
    Ok(())
}

fn relative_unix_path(path: &Path, base_root: &Path) -> String {
    let rel = path.strip_prefix(base_root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Sorts file paths, keeping files inside subdirectories apart from files in
/// the same parent.
///
/// Each path becomes a key of `(rank, component)` pairs: parent components get
/// rank 0 with `dirs_first` (2 otherwise), the file name rank 1. Keys compare
/// element-wise. `natsorted` compares components naturally (`img2` < `img10`).
pub fn sort_file_paths_with_dirs_separated<P: AsRef<Path>>(
    paths: &[P],
    natsorted: bool,
    dirs_first: bool,
) -> Vec<PathBuf> {
    let dir_rank = if dirs_first { 0u8 } else { 2u8 };
    let mut keyed: Vec<(Vec<(u8, String)>, PathBuf)> = paths
        .iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            let parts: Vec<String> = path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            let n = parts.len();
            let key = parts
                .into_iter()
                .enumerate()
                .map(|(i, part)| (if i + 1 == n { 1 } else { dir_rank }, part))
                .collect();
            (key, path)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, natsorted));
    keyed.into_iter().map(|(_, p)| p).collect()
}

fn compare_keys(a: &[(u8, String)], b: &[(u8, String)], natural: bool) -> Ordering {
    for ((ra, pa), (rb, pb)) in a.iter().zip(b.iter()) {
        let ord = ra.cmp(rb).then_with(|| {
            if natural {
                natural_cmp(pa, pb)
            } else {
                pa.cmp(pb)
            }
        });
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Compares strings treating runs of ASCII digits as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ra = Runs::new(a);
    let mut rb = Runs::new(b);
    loop {
        match (ra.next(), rb.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_digits(x), is_digits(y)) {
                    (true, true) => cmp_numeric(x, y),
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    (false, false) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digits(s: &str) -> bool {
    s.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

fn cmp_numeric(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}

/// Splits a string into alternating digit / non-digit runs.
struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Runs<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.rest.as_bytes().first()?;
        let digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(run)
    }
}
