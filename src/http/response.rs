//! HTTP response building module
//!
//! Builders for the status responses the asset handler produces. Builder
//! failures cannot really happen with fixed headers, but fall back to an
//! empty response rather than panicking in the request path.

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;

use crate::logger;

/// Build 200/206-style success response for an asset.
///
/// `last_modified` and `etag` feed the conditional-request headers.
pub fn build_asset_response(
    body: Bytes,
    content_type: &'static str,
    etag: &str,
    last_modified: &str,
    content_length: usize,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag)
        .header("Last-Modified", last_modified)
        .header("Accept-Ranges", "bytes")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 206 Partial Content response for a single byte range.
pub fn build_partial_response(
    body: Bytes,
    content_type: &'static str,
    etag: &str,
    last_modified: &str,
    start: usize,
    end: usize,
    total_size: usize,
) -> Response<Full<Bytes>> {
    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", end - start + 1)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("ETag", etag)
        .header("Last-Modified", last_modified)
        .header("Accept-Ranges", "bytes")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("206", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    plain_text(404, "404 Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    plain_text(500, "500 Internal Server Error")
}

/// Build OPTIONS (204) response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn plain_text(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(message.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(message, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn log_build_error(which: &str, e: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {which} response: {e}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(build_404_response().status(), 404);
        assert_eq!(build_405_response().status(), 405);
        assert_eq!(build_416_response(10).status(), 416);
        assert_eq!(build_500_response().status(), 500);
        assert_eq!(build_304_response("\"x\"").status(), 304);
        assert_eq!(build_options_response().status(), 204);
    }

    #[test]
    fn test_asset_response_headers() {
        let resp = build_asset_response(
            Bytes::from_static(b"body"),
            "text/css",
            "\"etag\"",
            "Fri, 27 May 2016 16:36:29 GMT",
            4,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "text/css");
        assert_eq!(resp.headers()["Content-Length"], "4");
        assert_eq!(resp.headers()["ETag"], "\"etag\"");
        assert_eq!(
            resp.headers()["Last-Modified"],
            "Fri, 27 May 2016 16:36:29 GMT"
        );
    }

    #[test]
    fn test_partial_response_headers() {
        let resp = build_partial_response(
            Bytes::from_static(b"cd"),
            "text/plain",
            "\"e\"",
            "Fri, 27 May 2016 16:36:29 GMT",
            2,
            3,
            10,
        );
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 2-3/10");
        assert_eq!(resp.headers()["Content-Length"], "2");
        assert_eq!(
            resp.headers()["Last-Modified"],
            "Fri, 27 May 2016 16:36:29 GMT"
        );
    }
}
