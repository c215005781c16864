//! Per-domain API wrappers.
//!
//! Each sub-client borrows an `ApiClient` and maps one method to one backend
//! endpoint: it builds the path, query and body, sends the request through
//! the client and decodes the JSON data into a typed value. No validation,
//! retry or error handling happens here beyond what `ApiClient` does.

pub mod dashboard;
pub mod execution;
pub mod market;
pub mod news;
pub mod portfolio;

use std::borrow::Cow;

pub use dashboard::Dashboard;
pub use execution::Execution;
pub use market::Market;
pub use news::News;
pub use portfolio::Portfolio;

/// Percent-encode a caller-supplied id for use as one path segment.
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_escapes_separators() {
        assert_eq!(segment("DRN-001"), "DRN-001");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
