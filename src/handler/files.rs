//! Asset file serving module
//!
//! Opens request paths through the virtual filesystem and builds the
//! response: MIME type from the extension, conditional-request handling via
//! `ETag` and `Last-Modified`, and single-range support.

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;

use crate::http::range::RangeParseResult;
use crate::http::{self, cond, mime, response};
use crate::logger;
use crate::vfs::{FsError, VirtualFs};

use super::router::RequestContext;

/// Serve one asset request from the filesystem.
pub fn serve(ctx: &RequestContext<'_>, fs: &dyn VirtualFs) -> Response<Full<Bytes>> {
    let (content, meta) = match open_and_read(fs, ctx.path) {
        Ok(pair) => pair,
        Err(e) if e.is_not_found() => return http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to serve '{}': {e}", ctx.path));
            return http::build_500_response();
        }
    };

    // Directory placeholders are not servable documents.
    if meta.is_dir {
        return http::build_404_response();
    }

    let content_type = mime::for_path(ctx.path);
    let etag = cond::generate_etag(&content);

    if cond::check_etag_match(ctx.if_none_match.as_deref(), &etag)
        || cond::check_not_modified_since(ctx.if_modified_since.as_deref(), meta.modified)
    {
        return http::build_304_response(&etag);
    }

    let total_size = content.len();
    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeParseResult::Valid(range) => {
            let start = range.start;
            let end = range.end_position(total_size);
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                content.slice(start..=end)
            };
            return response::build_partial_response(
                body,
                content_type,
                &etag,
                &cond::http_date(meta.modified),
                start,
                end,
                total_size,
            );
        }
        RangeParseResult::NotSatisfiable => return http::build_416_response(total_size),
        RangeParseResult::None => {}
    }

    let body = if ctx.is_head { Bytes::new() } else { content };
    response::build_asset_response(
        body,
        content_type,
        &etag,
        &cond::http_date(meta.modified),
        total_size,
    )
}

fn open_and_read(
    fs: &dyn VirtualFs,
    path: &str,
) -> Result<(Bytes, crate::vfs::Metadata), FsError> {
    use std::io::Read;
    let mut file = fs.open(path)?;
    let meta = file.metadata()?;
    let mut buf = Vec::with_capacity(usize::try_from(meta.size).unwrap_or(0));
    file.read_to_end(&mut buf)?;
    Ok((Bytes::from(buf), meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetTable;
    use crate::vfs::EmbeddedFs;
    use std::sync::Arc;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range_header: None,
        }
    }

    fn fs() -> EmbeddedFs {
        EmbeddedFs::new(Arc::new(AssetTable::builtin()))
    }

    #[test]
    fn test_serves_asset_with_headers() {
        let resp = serve(&ctx("/static/test.js"), &fs());
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/javascript");
        assert_eq!(resp.headers()["Content-Length"], "16");
        assert_eq!(
            resp.headers()["Last-Modified"],
            "Fri, 27 May 2016 16:36:29 GMT"
        );
    }

    #[test]
    fn test_missing_asset_is_404() {
        assert_eq!(serve(&ctx("/static/absent.js"), &fs()).status(), 404);
    }

    #[test]
    fn test_directory_is_404() {
        assert_eq!(serve(&ctx("/static"), &fs()).status(), 404);
    }

    #[test]
    fn test_if_none_match_gives_304() {
        let first = serve(&ctx("/static/test.css"), &fs());
        let etag = first.headers()["ETag"].to_str().unwrap().to_string();

        let conditional = RequestContext {
            if_none_match: Some(etag),
            ..ctx("/static/test.css")
        };
        assert_eq!(serve(&conditional, &fs()).status(), 304);
    }

    #[test]
    fn test_if_modified_since_gives_304() {
        let conditional = RequestContext {
            if_modified_since: Some("Sat, 28 May 2016 00:00:00 GMT".to_string()),
            ..ctx("/static/test.css")
        };
        assert_eq!(serve(&conditional, &fs()).status(), 304);
    }

    #[test]
    fn test_range_request() {
        let ranged = RequestContext {
            range_header: Some("bytes=0-4".to_string()),
            ..ctx("/static/test.js")
        };
        let resp = serve(&ranged, &fs());
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 0-4/16");
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert_eq!(
            resp.headers()["Last-Modified"],
            "Fri, 27 May 2016 16:36:29 GMT"
        );
    }

    #[test]
    fn test_unsatisfiable_range() {
        let ranged = RequestContext {
            range_header: Some("bytes=100-".to_string()),
            ..ctx("/static/test.js")
        };
        let resp = serve(&ranged, &fs());
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */16");
    }

    #[tokio::test]
    async fn test_head_has_empty_body() {
        use http_body_util::BodyExt;
        let head = RequestContext {
            is_head: true,
            ..ctx("/static/test.js")
        };
        let resp = serve(&head, &fs());
        assert_eq!(resp.status(), 200);
        // Content-Length still reports the full size
        assert_eq!(resp.headers()["Content-Length"], "16");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }
}
