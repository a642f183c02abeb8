//! Query-string encoding.

#[cfg(test)]
#[path = "url_test.rs"]
mod url_test;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// RFC 3986 unreserved characters stay literal.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Percent-encode a query component.
pub fn percent_encode(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}
