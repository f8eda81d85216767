//! Request correlation IDs.
//!
//! Every request carries a [`RequestId`] in its extensions. An upstream
//! proxy's `x-request-id` is kept when it looks like an ID; anything else is
//! replaced with a fresh UUID v4 so arbitrary header text never reaches the
//! logs, Sentry tags, or the response.

use std::fmt;

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID accepted as-is.
pub const MAX_REQUEST_ID_LEN: usize = 64;

/// Correlation ID of the request being served.
///
/// Handlers take it as `Extension<RequestId>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// A fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept an upstream ID made of ASCII letters, digits, `-` and `_`, at
    /// most [`MAX_REQUEST_ID_LEN`] long.
    #[must_use]
    pub fn from_upstream(value: &str) -> Option<Self> {
        let well_formed = !value.is_empty()
            && value.len() <= MAX_REQUEST_ID_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        well_formed.then(|| Self(value.to_string()))
    }

    /// The upstream ID from `headers` if usable, else a fresh one.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(Self::from_upstream)
            .unwrap_or_else(Self::generate)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attach a [`RequestId`] to the request, the current span, the Sentry scope
/// and the response headers.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id.as_str());
    });
    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_upstream_id_is_kept() {
        let id = RequestId::from_headers(&headers("cf-8a1b_22"));
        assert_eq!(id.as_str(), "cf-8a1b_22");
    }

    #[test]
    fn test_malformed_upstream_ids_are_rejected() {
        let too_long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        for value in ["", "two words", "<script>", "id;drop", too_long.as_str()] {
            assert!(RequestId::from_upstream(value).is_none(), "{value:?}");
        }
        assert!(RequestId::from_upstream(&"a".repeat(MAX_REQUEST_ID_LEN)).is_some());
    }

    #[test]
    fn test_malformed_header_gets_fresh_uuid() {
        let id = RequestId::from_headers(&headers("not an id"));
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_missing_header_gets_fresh_uuid() {
        let first = RequestId::from_headers(&HeaderMap::new());
        let second = RequestId::from_headers(&HeaderMap::new());
        assert!(Uuid::parse_str(first.as_str()).is_ok());
        assert_ne!(first, second);
    }
}
