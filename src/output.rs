//! All-or-nothing writing of generated files.

use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::BitmapError;

/// Write `contents` to `path` so that `path` either keeps its old content or
/// ends up with all of `contents`, never a prefix.
///
/// Data goes to a temporary file in the destination directory which is
/// renamed over `path` after a flush and sync.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), BitmapError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
