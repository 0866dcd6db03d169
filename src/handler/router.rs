//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route-prefix
//! matching, and dispatch to the asset file server.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::files;
use crate::http;
use crate::logger;

/// Request context encapsulating what the file server needs from a request.
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if let Some(resp) = check_http_method(&method) {
        return Ok(resp);
    }

    let ctx = RequestContext {
        path: &path,
        is_head: method == Method::HEAD,
        if_none_match: header_string(&req, "if-none-match"),
        if_modified_since: header_string(&req, "if-modified-since"),
        range_header: header_string(&req, "range"),
    };

    // Only the asset prefix is routable; everything else is missing.
    let response = if matches_prefix(&path, &state.config.assets.route_prefix) {
        files::serve(&ctx, state.fs.as_ref())
    } else {
        http::build_404_response()
    };

    if state.config.logging.access_log {
        logger::log_access(&method, &path, response.status().as_u16(), body_len(&response));
    }
    Ok(response)
}

/// True when `path` falls under the configured asset route prefix.
fn matches_prefix(path: &str, route_prefix: &str) -> bool {
    let prefix = route_prefix.trim_end_matches('/');
    path.starts_with(&format!("{prefix}/")) || path == prefix
}

/// Non-GET/HEAD methods are rejected; OPTIONS gets its allow list.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn body_len(response: &Response<Full<Bytes>>) -> usize {
    response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
