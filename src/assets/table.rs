//! Asset descriptor table
//!
//! The table is built once at startup and never mutated afterwards. Each
//! descriptor carries a base64-encoded gzip payload which is inflated lazily
//! on first access; the inflated bytes (or the decode error) are memoized for
//! the process lifetime.

use std::collections::HashMap;
use std::io::Read;
use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use flate2::read::GzDecoder;

/// Failure while decoding an embedded payload.
///
/// Cloneable so the memoized outcome can be handed to every caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(String),
    #[error("corrupt gzip stream: {0}")]
    Gzip(String),
}

/// One entry of the asset table: metadata, compressed payload, and the
/// lazily populated decompression cache.
#[derive(Debug)]
pub struct Asset {
    /// Fallback path on the real filesystem, used in local mode.
    pub local: String,
    /// Uncompressed size in bytes. Zero for directories.
    pub size: u64,
    /// Modification time, seconds since the Unix epoch.
    pub modified: i64,
    /// Directory placeholder flag. Directories carry no payload.
    pub is_dir: bool,
    compressed: String,
    cache: OnceLock<Result<Bytes, DecodeError>>,
    #[cfg(test)]
    inflate_runs: std::sync::atomic::AtomicUsize,
}

impl Asset {
    /// Create a file descriptor. `compressed` is base64 of a gzip stream;
    /// embedded ASCII whitespace (line breaks from generation) is tolerated.
    pub fn file(
        local: impl Into<String>,
        size: u64,
        modified: i64,
        compressed: impl Into<String>,
    ) -> Self {
        Self {
            local: local.into(),
            size,
            modified,
            is_dir: false,
            compressed: compressed.into(),
            cache: OnceLock::new(),
            #[cfg(test)]
            inflate_runs: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a directory placeholder. Zero size, no payload.
    pub fn dir(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            size: 0,
            modified: 0,
            is_dir: true,
            compressed: String::new(),
            cache: OnceLock::new(),
            #[cfg(test)]
            inflate_runs: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Decompressed contents of this asset.
    ///
    /// The first caller inflates the payload; concurrent first callers block
    /// on the same cell and share the outcome. A failed inflate is memoized
    /// and returned on every subsequent call, never retried.
    pub fn contents(&self) -> Result<Bytes, DecodeError> {
        self.cache.get_or_init(|| self.inflate()).clone()
    }

    fn inflate(&self) -> Result<Bytes, DecodeError> {
        #[cfg(test)]
        self.inflate_runs
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        // Declared-empty entries (directories, empty files) have no stream.
        if self.size == 0 {
            return Ok(Bytes::new());
        }

        let encoded: String = self
            .compressed
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let raw = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| DecodeError::Base64(e.to_string()))?;

        let mut decoder = GzDecoder::new(raw.as_slice());
        let mut buf = Vec::with_capacity(usize::try_from(self.size).unwrap_or(0));
        decoder
            .read_to_end(&mut buf)
            .map_err(|e| DecodeError::Gzip(e.to_string()))?;
        Ok(Bytes::from(buf))
    }

    /// Number of times the inflate routine actually ran for this descriptor.
    #[cfg(test)]
    pub fn inflate_runs(&self) -> usize {
        self.inflate_runs.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Immutable mapping from canonical logical path to descriptor.
#[derive(Debug)]
pub struct AssetTable {
    entries: HashMap<String, Asset>,
}

impl AssetTable {
    /// Build a table from `(path, descriptor)` pairs. Paths are canonicalized
    /// as they are inserted.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Asset)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(path, asset)| (canonicalize(&path), asset))
            .collect();
        Self { entries }
    }

    /// The bundle generated from the project's static directory.
    pub fn builtin() -> Self {
        Self::from_entries(super::data::entries())
    }

    /// Look up a path, canonicalizing it first.
    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.lookup(&canonicalize(path))
    }

    /// Look up an already-canonical path.
    pub fn lookup(&self, canonical: &str) -> Option<&Asset> {
        self.entries.get(canonical)
    }

    /// All canonical paths in the table, in arbitrary order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonicalize a logical path: collapse `.` and empty segments, resolve
/// `..` (stopping at the root), and anchor the result at `/`.
pub fn canonicalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    let mut out = String::with_capacity(path.len().max(1));
    out.push('/');
    out.push_str(&parts.join("/"));
    out
}
