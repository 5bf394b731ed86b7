//! Response metadata handed to serializers.
//!
//! [`ResponseHead`] carries the status code and headers of a completed
//! transaction. Header lookups are case-insensitive.
//!
//! # Example
//!
//! ```
//! use pincer_response::ResponseHead;
//! use pincer_response::header::{CONTENT_TYPE, HeaderValue};
//!
//! let response = ResponseHead::new(200)
//!     .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
//!
//! assert_eq!(response.header("content-type"), Some("text/plain; charset=utf-8"));
//! assert_eq!(response.charset().as_deref(), Some("utf-8"));
//! ```

use http::HeaderMap;
use http::header::{AsHeaderName, CONTENT_TYPE, HeaderName, HeaderValue};

/// Status code and headers of an HTTP response.
#[derive(Debug, Clone, Default)]
pub struct ResponseHead {
    status: u16,
    headers: HeaderMap,
}

impl ResponseHead {
    /// Creates a response head with the given status and no headers.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
        }
    }

    /// Creates a response head with the given status and headers.
    #[must_use]
    pub const fn with_headers(status: u16, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Adds a header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Single header value by name, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: impl AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The `charset` parameter of the `Content-Type` header.
    ///
    /// Returns `None` when the header is missing, unparseable, or has no
    /// `charset` parameter.
    #[must_use]
    pub fn charset(&self) -> Option<String> {
        let mime: mime::Mime = self.header(CONTENT_TYPE)?.parse().ok()?;
        mime.get_param(mime::CHARSET)
            .map(|charset| charset.as_str().to_owned())
    }
}

impl From<&http::response::Parts> for ResponseHead {
    fn from(parts: &http::response::Parts) -> Self {
        Self::with_headers(parts.status.as_u16(), parts.headers.clone())
    }
}

impl<B> From<&http::Response<B>> for ResponseHead {
    fn from(response: &http::Response<B>) -> Self {
        Self::with_headers(response.status().as_u16(), response.headers().clone())
    }
}
