//! Embedded filesystem adapter
//!
//! Serves the asset table from memory. Payloads are inflated on first open
//! and cached for the process lifetime (see `assets::Asset::contents`), so
//! after the first access every open is a lock-free read of shared bytes.

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::Arc;

use bytes::Bytes;

use crate::assets::{canonicalize, AssetTable};

use super::{base_name, FsError, Metadata, VfsFile, VirtualFs};

/// Read-only filesystem over the in-memory asset table.
pub struct EmbeddedFs {
    table: Arc<AssetTable>,
}

impl EmbeddedFs {
    pub fn new(table: Arc<AssetTable>) -> Self {
        Self { table }
    }
}

impl VirtualFs for EmbeddedFs {
    fn open(&self, path: &str) -> Result<Box<dyn VfsFile>, FsError> {
        let canonical = canonicalize(path);
        let asset = self
            .table
            .lookup(&canonical)
            .ok_or_else(|| FsError::NotFound {
                path: canonical.clone(),
            })?;
        let data = asset.contents()?;
        Ok(Box::new(EmbeddedFile {
            meta: Metadata {
                name: base_name(&canonical),
                size: asset.size,
                modified: asset.modified,
                is_dir: asset.is_dir,
                mode: 0,
            },
            cursor: Cursor::new(data),
        }))
    }
}

/// Handle over cached, immutable bytes. Close (drop) is a no-op.
#[derive(Debug)]
struct EmbeddedFile {
    meta: Metadata,
    cursor: Cursor<Bytes>,
}

impl Read for EmbeddedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for EmbeddedFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl VfsFile for EmbeddedFile {
    fn metadata(&self) -> Result<Metadata, FsError> {
        Ok(self.meta.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DecodeError;
    use std::thread;

    fn embedded() -> EmbeddedFs {
        EmbeddedFs::new(Arc::new(AssetTable::builtin()))
    }

    fn read_all(file: &mut dyn VfsFile) -> Vec<u8> {
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_open_known_file() {
        let fs = embedded();
        let mut file = fs.open("/static/test.js").unwrap();
        let meta = file.metadata().unwrap();
        assert_eq!(meta.name, "test.js");
        assert_eq!(meta.size, 16);
        assert_eq!(meta.modified, 1_464_366_989);
        assert_eq!(meta.mode, 0);
        assert!(!meta.is_dir);
        let content = read_all(file.as_mut());
        assert_eq!(content, b"alert(\"hello!\");");
        assert_eq!(content.len() as u64, meta.size);
    }

    #[test]
    fn test_full_read_matches_declared_size() {
        let fs = embedded();
        let table = AssetTable::builtin();
        for path in table.paths().filter(|p| !table.get(p).unwrap().is_dir) {
            let mut file = fs.open(path).unwrap();
            let meta = file.metadata().unwrap();
            assert_eq!(read_all(file.as_mut()).len() as u64, meta.size, "{path}");
        }
    }

    #[test]
    fn test_open_unknown_path() {
        let err = embedded().open("/static/missing.js").unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_open_canonicalizes() {
        let fs = embedded();
        let a = read_all(fs.open("/static/test.js").unwrap().as_mut());
        let b = read_all(fs.open("/static/../static/test.js").unwrap().as_mut());
        assert_eq!(a, b);
    }

    #[test]
    fn test_directory_entry() {
        let fs = embedded();
        let mut dir = fs.open("/static").unwrap();
        let meta = dir.metadata().unwrap();
        assert!(meta.is_dir);
        assert_eq!(meta.size, 0);
        assert!(read_all(dir.as_mut()).is_empty());
        assert!(dir.read_dir().unwrap().is_empty());
    }

    #[test]
    fn test_handle_is_debuggable() {
        // Handles are returned inside Results, so they must format for
        // error reporting.
        let file = embedded().open("/static/test.js").unwrap();
        assert!(format!("{file:?}").contains("EmbeddedFile"));
    }

    #[test]
    fn test_seek_and_partial_read() {
        let fs = embedded();
        let mut file = fs.open("/static/test.js").unwrap();
        file.seek(SeekFrom::Start(7)).unwrap();
        let mut buf = [0u8; 5];
        file.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"hello");
    }

    #[test]
    fn test_concurrent_first_open_inflates_once() {
        let table = Arc::new(AssetTable::builtin());
        let fs = Arc::new(EmbeddedFs::new(Arc::clone(&table)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let fs = Arc::clone(&fs);
                thread::spawn(move || {
                    let mut file = fs.open("/static/test.html").unwrap();
                    read_all(file.as_mut())
                })
            })
            .collect();

        let results: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results {
            assert_eq!(r, &results[0]);
            assert_eq!(r.len(), 817);
        }
        assert_eq!(table.get("/static/test.html").unwrap().inflate_runs(), 1);
    }

    #[test]
    fn test_corrupt_payload_fails_deterministically() {
        use crate::assets::Asset;
        let table = Arc::new(AssetTable::from_entries([(
            "/static/bad.js".to_string(),
            Asset::file("static/bad.js", 8, 0, "AAAAgarbage!"),
        )]));
        let fs = EmbeddedFs::new(Arc::clone(&table));

        let first = fs.open("/static/bad.js").unwrap_err();
        let second = fs.open("/static/bad.js").unwrap_err();
        let (FsError::Decode(a), FsError::Decode(b)) = (first, second) else {
            panic!("expected decode errors");
        };
        assert_eq!(a, b);
        assert!(matches!(a, DecodeError::Base64(_) | DecodeError::Gzip(_)));
        assert_eq!(table.get("/static/bad.js").unwrap().inflate_runs(), 1);
    }
}
