//! Conditional request module
//!
//! `ETag` generation and `If-None-Match` / `If-Modified-Since` checks for
//! 304 handling, plus HTTP-date formatting of asset modification times.

use chrono::{DateTime, TimeZone, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate a quoted `ETag` from content bytes using fast hashing.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// True if the client's `If-None-Match` header matches our `ETag`
/// (single value, comma-separated list, or `*`).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format an epoch-seconds timestamp as an HTTP date (IMF-fixdate).
pub fn http_date(epoch_secs: i64) -> String {
    let dt: DateTime<Utc> = Utc
        .timestamp_opt(epoch_secs, 0)
        .single()
        .unwrap_or_default();
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// True if the resource is unmodified per `If-Modified-Since`.
///
/// HTTP dates have one-second resolution, so the comparison truncates the
/// stored timestamp the same way.
pub fn check_not_modified_since(if_modified_since: Option<&str>, epoch_secs: i64) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Ok(client) = DateTime::parse_from_rfc2822(header) else {
        return false; // malformed date: ignore the precondition
    };
    epoch_secs <= client.timestamp()
}
