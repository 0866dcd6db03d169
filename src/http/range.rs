//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range requests and
//! malformed headers are treated as "no range": the full body is served.

/// Parsed Range request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeRequest {
    /// Start byte position
    pub start: usize,
    /// End byte position, None means until end of file
    pub end: Option<usize>,
}

impl RangeRequest {
    /// Actual inclusive end position for a file of `file_size` bytes.
    #[inline]
    pub fn end_position(&self, file_size: usize) -> usize {
        self.end
            .map_or_else(|| file_size.saturating_sub(1), |e| e.min(file_size - 1))
    }
}

/// Range header parse result
#[derive(Debug)]
pub enum RangeParseResult {
    /// Valid range request
    Valid(RangeRequest),
    /// Start beyond end of file: respond 416
    NotSatisfiable,
    /// No Range header or not parseable: serve the full content
    None,
}

/// Parse an HTTP Range header against a known file size.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeParseResult {
    let Some(header) = range_header else {
        return RangeParseResult::None;
    };
    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeParseResult::None;
    };
    if spec.contains(',') {
        return RangeParseResult::None; // multi-range unsupported
    }
    let Some((start_s, end_s)) = spec.split_once('-') else {
        return RangeParseResult::None;
    };

    // Suffix form: last N bytes
    if start_s.is_empty() {
        let Ok(suffix) = end_s.parse::<usize>() else {
            return RangeParseResult::None;
        };
        if suffix == 0 || file_size == 0 {
            return RangeParseResult::NotSatisfiable;
        }
        return RangeParseResult::Valid(RangeRequest {
            start: file_size.saturating_sub(suffix),
            end: None,
        });
    }

    let Ok(start) = start_s.parse::<usize>() else {
        return RangeParseResult::None;
    };
    if start >= file_size {
        return RangeParseResult::NotSatisfiable;
    }
    let end = if end_s.is_empty() {
        None
    } else {
        match end_s.parse::<usize>() {
            Ok(e) if e >= start => Some(e),
            _ => return RangeParseResult::None,
        }
    };
    RangeParseResult::Valid(RangeRequest { start, end })
}
