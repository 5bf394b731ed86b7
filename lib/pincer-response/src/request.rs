//! Request descriptor handed to serializers.
//!
//! [`RequestHead`] only feeds diagnostics: serializers log it, they never
//! branch on it.

use derive_more::Display;
use http::{Method, Uri};

/// Method and URI of the request that produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{method} {uri}")]
pub struct RequestHead {
    method: Method,
    uri: Uri,
}

impl RequestHead {
    /// Creates a new request descriptor.
    #[must_use]
    pub const fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl From<&http::request::Parts> for RequestHead {
    fn from(parts: &http::request::Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone())
    }
}

impl<B> From<&http::Request<B>> for RequestHead {
    fn from(request: &http::Request<B>) -> Self {
        Self::new(request.method().clone(), request.uri().clone())
    }
}
