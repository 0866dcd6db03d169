//! Request handling module
//!
//! Dispatches incoming HTTP requests to the asset filesystem.

mod files;
mod router;

pub use router::handle_request;
