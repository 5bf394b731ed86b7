//! Response serializers for the pincer HTTP client.
//!
//! This crate turns the outcome of an HTTP transaction (the request, the
//! response head, the body or downloaded file, and any transport error) into
//! a typed value:
//! - [`ResponseSerializer`] - Common trait for every serializer
//! - [`DataSerializer`] - Raw bytes
//! - [`StringSerializer`] - Text, with [`TextEncoding`] resolution
//! - [`JsonSerializer`] and [`PropertyListSerializer`] - Generic documents
//! - [`DecodableSerializer`] - Typed values through a [`DataDecoder`]
//! - [`EmptyBodyPolicy`] - Which empty responses are acceptable
//! - [`DataPreprocessor`] - Body transformation applied before decoding
//! - [`Error`] and [`Result`] - Error handling
//! - [`header`] - HTTP header names (re-exported from `http` crate)
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use pincer_response::prelude::*;
//!
//! #[derive(Debug, serde::Deserialize)]
//! struct Health {
//!     status: String,
//! }
//!
//! let response = ResponseHead::new(200);
//! let health = JsonDecodableSerializer::<Health>::new().serialize(
//!     None,
//!     Some(&response),
//!     Some(Bytes::from(r#"{"status": "ok"}"#)),
//!     None,
//! )?;
//! assert_eq!(health.status, "ok");
//! # Ok::<(), pincer_response::Error>(())
//! ```

mod decoder;
mod empty;
mod encoding;
mod error;
pub mod prelude;
mod preprocess;
mod request;
mod response;
mod serializer;

pub use decoder::{DataDecoder, JsonDecoder, PropertyListDecoder};
pub use empty::{
    DEFAULT_EMPTY_STATUS_CODES, Empty, EmptyBodyPolicy, EmptyBodyPolicyBuilder,
    is_empty_body_allowed,
};
pub use encoding::{TextEncoding, resolve_encoding};
pub use error::{BoxError, Error, ErrorKind, Result};
pub use preprocess::{DataPreprocessor, PassthroughPreprocessor, XssiPreprocessor};
pub use request::RequestHead;
pub use response::ResponseHead;
pub use serializer::{
    DataSerializer, DecodableSerializer, JsonDecodableSerializer, JsonSerializer,
    PropertyListDecodableSerializer, PropertyListSerializer, ResponseSerializer, StringSerializer,
};

// Re-export http header names and values
pub use http::header;
