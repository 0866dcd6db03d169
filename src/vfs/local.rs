//! Local filesystem adapter
//!
//! Development mode: logical paths are still validated against the asset
//! table, but content comes from the real disk via each descriptor's
//! recorded local path. Files on disk that are not in the table are
//! deliberately unreachable, so local mode serves exactly the namespace an
//! embedded build would ship.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::UNIX_EPOCH;

use crate::assets::{canonicalize, AssetTable};

use super::{base_name, FsError, Metadata, VfsFile, VirtualFs};

/// Read-only filesystem that resolves table entries to on-disk files.
pub struct LocalFs {
    table: Arc<AssetTable>,
    root: PathBuf,
}

impl LocalFs {
    /// `root` is the directory the descriptors' local paths are relative to.
    pub fn new(table: Arc<AssetTable>, root: impl Into<PathBuf>) -> Self {
        Self {
            table,
            root: root.into(),
        }
    }
}

impl VirtualFs for LocalFs {
    fn open(&self, path: &str) -> Result<Box<dyn VfsFile>, FsError> {
        let canonical = canonicalize(path);
        let asset = self
            .table
            .lookup(&canonical)
            .ok_or_else(|| FsError::NotFound {
                path: canonical.clone(),
            })?;
        let disk_path = self.root.join(asset.local.trim_start_matches('/'));
        let file = File::open(disk_path)?;
        Ok(Box::new(LocalFile {
            name: base_name(&canonical),
            file,
        }))
    }
}

/// Handle over a real file; metadata comes from the disk, not the table.
#[derive(Debug)]
struct LocalFile {
    name: String,
    file: File,
}

impl Read for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for LocalFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl VfsFile for LocalFile {
    fn metadata(&self) -> Result<Metadata, FsError> {
        let meta = self.file.metadata()?;
        let modified = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .and_then(|d| i64::try_from(d.as_secs()).ok())
            .unwrap_or(0);
        Ok(Metadata {
            name: self.name.clone(),
            size: meta.len(),
            modified,
            is_dir: meta.is_dir(),
            mode: 0,
        })
    }
}
