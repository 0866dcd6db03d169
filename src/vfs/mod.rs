//! Virtual filesystem module
//!
//! A read-only filesystem capability served either from the embedded asset
//! table or from the real disk (development mode). The HTTP layer only ever
//! talks to the [`VirtualFs`] trait; which adapter sits behind it is decided
//! once at startup by [`select`].

pub mod embedded;
pub mod local;
pub mod select;

use std::fmt;
use std::io::{Read, Seek};

use crate::assets::DecodeError;

pub use embedded::EmbeddedFs;
pub use local::LocalFs;
pub use select::filesystem;

/// Error opening or reading through a virtual filesystem.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// Logical path absent from the asset table.
    #[error("no such asset: {path}")]
    NotFound { path: String },
    /// Embedded payload failed to decode.
    #[error("asset decode failed: {0}")]
    Decode(#[from] DecodeError),
    /// Disk failure in local mode, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FsError {
    /// True when the error should surface as a missing resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Self::Decode(_) => false,
        }
    }
}

/// File metadata as reported by `VfsFile::metadata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Final segment of the requested path, not the table key.
    pub name: String,
    /// Size of the (uncompressed) content in bytes.
    pub size: u64,
    /// Modification time, seconds since the Unix epoch.
    pub modified: i64,
    pub is_dir: bool,
    /// Permission bits; embedded assets report none.
    pub mode: u32,
}

/// An open read-only file handle.
///
/// Dropping the handle is the only close operation; for embedded files it
/// releases nothing beyond the handle itself.
pub trait VfsFile: Read + Seek + Send + fmt::Debug {
    fn metadata(&self) -> Result<Metadata, FsError>;

    /// Directory listing is unsupported; the empty result is definitive.
    fn read_dir(&mut self) -> Result<Vec<Metadata>, FsError> {
        Ok(Vec::new())
    }
}

/// A read-only filesystem keyed by logical asset paths.
pub trait VirtualFs: Send + Sync {
    fn open(&self, path: &str) -> Result<Box<dyn VfsFile>, FsError>;
}

/// Final segment of a canonical path; `/` maps to itself.
fn base_name(canonical: &str) -> String {
    match canonical.rsplit('/').next() {
        Some("") | None => "/".to_string(),
        Some(seg) => seg.to_string(),
    }
}
