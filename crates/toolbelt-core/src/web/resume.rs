//! Resume-offset computation: open the target for append if it already holds
//! a partial download, otherwise create it empty.

use std::fs::{File, OpenOptions};
use std::path::Path;

use super::error::DownloadError;

/// Opens `path` for writing the rest of a download.
///
/// Returns the handle and the number of bytes already on disk. An existing file
/// is opened in append mode and its length is the resume offset; a missing file
/// is created (truncating) with offset 0.
pub fn open_for_download(path: &Path) -> Result<(File, u64), DownloadError> {
    let open_err = |source| DownloadError::Open {
        path: path.to_path_buf(),
        source,
    };
    if path.is_file() {
        let offset = path.metadata().map_err(open_err)?.len();
        let file = OpenOptions::new().append(true).open(path).map_err(open_err)?;
        Ok((file, offset))
    } else {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(open_err)?;
        Ok((file, 0))
    }
}

/// Value for curl's range option: open-ended suffix starting at `offset`.
/// Sent on the wire as `Range: bytes=<offset>-`.
pub(crate) fn range_from(offset: u64) -> String {
    format!("{}-", offset)
}
