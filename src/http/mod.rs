//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the asset handler: response builders,
//! MIME detection, conditional-request checks, and Range parsing.

pub mod cond;
pub mod mime;
pub mod range;
pub mod response;

pub use range::parse_range_header;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_500_response, build_options_response,
};
