//! Embedded asset table module
//!
//! Holds the immutable mapping from logical paths to asset descriptors,
//! including the generated builtin bundle compiled into the binary.

pub mod data;
mod table;

pub use table::{canonicalize, Asset, AssetTable, DecodeError};
