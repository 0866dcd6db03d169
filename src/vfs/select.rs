//! Filesystem selector
//!
//! The single switch point between embedded and local behavior, plus the
//! whole-file convenience accessors. The `must_*` variants abort on any
//! error and exist for startup-time reads of assets known to be present;
//! request-driven paths must use the fallible forms.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::assets::AssetTable;

use super::{EmbeddedFs, FsError, LocalFs, VfsFile, VirtualFs};

/// Select the filesystem for the given mode.
pub fn filesystem(
    table: Arc<AssetTable>,
    use_local: bool,
    local_root: &Path,
) -> Arc<dyn VirtualFs> {
    if use_local {
        Arc::new(LocalFs::new(table, local_root))
    } else {
        Arc::new(EmbeddedFs::new(table))
    }
}

/// Select a filesystem scoped to a subtree: `prefix` is prepended to every
/// requested path before delegation.
pub fn scoped(
    table: Arc<AssetTable>,
    use_local: bool,
    local_root: &Path,
    prefix: impl Into<String>,
) -> Arc<dyn VirtualFs> {
    Arc::new(ScopedFs {
        inner: filesystem(table, use_local, local_root),
        prefix: prefix.into(),
    })
}

/// Prefix-scoping wrapper around another filesystem.
struct ScopedFs {
    inner: Arc<dyn VirtualFs>,
    prefix: String,
}

impl VirtualFs for ScopedFs {
    fn open(&self, path: &str) -> Result<Box<dyn VfsFile>, FsError> {
        self.inner.open(&format!("{}{path}", self.prefix))
    }
}

/// Open `path` and read it to the end.
pub fn read_bytes(fs: &dyn VirtualFs, path: &str) -> Result<Vec<u8>, FsError> {
    let mut file = fs.open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Open `path` and read it as a string; invalid UTF-8 is replaced.
pub fn read_string(fs: &dyn VirtualFs, path: &str) -> Result<String, FsError> {
    let bytes = read_bytes(fs, path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Like [`read_bytes`] but aborts the process on any error.
///
/// Startup-time only, for assets the caller guarantees exist.
pub fn must_read_bytes(fs: &dyn VirtualFs, path: &str) -> Vec<u8> {
    match read_bytes(fs, path) {
        Ok(bytes) => bytes,
        Err(e) => panic!("required asset {path}: {e}"),
    }
}

/// Like [`read_string`] but aborts the process on any error.
pub fn must_read_string(fs: &dyn VirtualFs, path: &str) -> String {
    match read_string(fs, path) {
        Ok(s) => s,
        Err(e) => panic!("required asset {path}: {e}"),
    }
}
