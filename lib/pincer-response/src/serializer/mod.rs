//! Response serializers.
//!
//! Every serializer implements [`ResponseSerializer`] and follows the same
//! steps: pick the body (in memory, or read from a downloaded file), apply the
//! [`EmptyBodyPolicy`], preprocess, decode, and map failures onto [`Error`].
//!
//! | Serializer | Output | Missing body |
//! |---|---|---|
//! | [`DataSerializer`] | [`Bytes`] | [`Error::InputDataNil`] |
//! | [`StringSerializer`] | [`String`] | [`Error::InputDataNil`] |
//! | [`JsonSerializer`] | [`serde_json::Value`] | [`Error::InputDataNilOrZeroLength`] |
//! | [`PropertyListSerializer`] | `Option<plist::Value>` | [`Error::InputDataNilOrZeroLength`] |
//! | [`DecodableSerializer`] | `T` | [`Error::InputDataNilOrZeroLength`] |
//!
//! # Upstream errors
//!
//! A body that is present wins over an upstream error: the error is logged
//! and decoding proceeds. When no usable body came with the upstream error,
//! the call fails with [`Error::InputDataNil`] (or [`Error::InputFileNil`] for
//! downloads) carrying that error, even if the status would allow an empty
//! body.

mod data;
mod decodable;
mod json;
mod property_list;
mod string;

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, field::display, warn};

pub use self::data::DataSerializer;
pub use self::decodable::{
    DecodableSerializer, JsonDecodableSerializer, PropertyListDecodableSerializer,
};
pub use self::json::JsonSerializer;
pub use self::property_list::PropertyListSerializer;
pub use self::string::StringSerializer;
use crate::{
    BoxError, DataPreprocessor, EmptyBodyPolicy, Error, PassthroughPreprocessor, RequestHead,
    ResponseHead, Result,
};

/// Turns the outcome of an HTTP transaction into a typed value.
///
/// Implementations hold only immutable configuration, so a serializer can be
/// shared across threads and called any number of times.
pub trait ResponseSerializer {
    /// The decoded value.
    type Output;

    /// Serialize an in-memory body.
    ///
    /// `request` is only used for diagnostics. `error` is the failure reported
    /// by the transport, if any.
    fn serialize(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<Self::Output>;

    /// Serialize a body downloaded to `file`.
    ///
    /// Fails with [`Error::InputFileNil`] when there is no file and with
    /// [`Error::InputFileReadFailed`] when it cannot be read. Otherwise the
    /// file contents go through [`Self::serialize`].
    fn serialize_download(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        file: Option<&Path>,
        error: Option<BoxError>,
    ) -> Result<Self::Output> {
        let Some(path) = file else {
            if let Some(upstream) = &error {
                warn!(
                    request = request.map(display),
                    error = %upstream,
                    "no response file, reporting upstream error"
                );
            }
            return Err(Error::InputFileNil { upstream: error });
        };

        let data = read_file(path)?;
        self.serialize(request, response, Some(data), error)
    }
}

/// Read a downloaded body. The file handle is closed before returning.
fn read_file(path: &Path) -> Result<Bytes> {
    std::fs::read(path).map(Bytes::from).map_err(|source| {
        debug!(path = %path.display(), error = %source, "failed to read response file");
        Error::input_file_read_failed(path, source)
    })
}

/// What a serializer needs from the body to decode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyRequirement {
    /// Any body, including a zero-length one.
    Present,
    /// A body with at least one byte.
    NonEmpty,
}

impl BodyRequirement {
    fn accepts(self, data: &Bytes) -> bool {
        match self {
            Self::Present => true,
            Self::NonEmpty => !data.is_empty(),
        }
    }

    const fn missing(self) -> Error {
        match self {
            Self::Present => Error::input_data_nil(),
            Self::NonEmpty => Error::InputDataNilOrZeroLength,
        }
    }
}

/// The body a serializer should decode.
#[derive(Debug)]
pub(crate) enum Body {
    /// Bytes to decode, already preprocessed.
    Data(Bytes),
    /// An empty response accepted by the policy.
    Empty,
}

/// Configuration shared by every serializer kind.
#[derive(Debug, Clone)]
pub(crate) struct SerializerOptions {
    pub(crate) empty_body_policy: EmptyBodyPolicy,
    pub(crate) preprocessor: Arc<dyn DataPreprocessor>,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            empty_body_policy: EmptyBodyPolicy::default(),
            preprocessor: Arc::new(PassthroughPreprocessor),
        }
    }
}

impl SerializerOptions {
    /// Decide what to decode from the per-call inputs.
    pub(crate) fn acquire(
        &self,
        serializer: &'static str,
        requirement: BodyRequirement,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<Body> {
        let status = response.map(ResponseHead::status);

        if let Some(data) = data.filter(|data| requirement.accepts(data)) {
            if let Some(upstream) = &error {
                debug!(
                    serializer,
                    request = request.map(display),
                    status,
                    error = %upstream,
                    "response data present, ignoring upstream error"
                );
            }
            let data = if data.is_empty() {
                data
            } else {
                self.preprocessor.preprocess(data)
            };
            debug!(
                serializer,
                request = request.map(display),
                status,
                len = data.len(),
                "decoding response data"
            );
            return Ok(Body::Data(data));
        }

        if let Some(upstream) = error {
            warn!(
                serializer,
                request = request.map(display),
                status,
                error = %upstream,
                "no usable response data, reporting upstream error"
            );
            return Err(Error::InputDataNil {
                upstream: Some(upstream),
            });
        }

        if self.empty_body_policy.allows(status, 0) {
            debug!(
                serializer,
                request = request.map(display),
                status,
                "empty response allowed"
            );
            return Ok(Body::Empty);
        }

        debug!(
            serializer,
            request = request.map(display),
            status,
            "missing response data"
        );
        Err(requirement.missing())
    }
}

/// Log a decoding failure on its way out.
pub(crate) fn traced<T>(serializer: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        debug!(serializer, kind = %err.kind(), error = %err, "response serialization failed");
    }
    result
}

/// Builder methods shared by every serializer holding a `SerializerOptions`
/// in an `options` field.
macro_rules! serializer_options {
    ($($generics:ident),* ; $ty:ty) => {
        impl<$($generics),*> $ty {
            /// Replace the empty-body policy.
            #[must_use]
            pub fn with_empty_body_policy(mut self, policy: $crate::EmptyBodyPolicy) -> Self {
                self.options.empty_body_policy = policy;
                self
            }

            /// Set the preprocessor applied to non-empty bodies before decoding.
            #[must_use]
            pub fn with_preprocessor(
                mut self,
                preprocessor: impl $crate::DataPreprocessor,
            ) -> Self {
                self.options.preprocessor = ::std::sync::Arc::new(preprocessor);
                self
            }

            /// The empty-body policy in use.
            #[must_use]
            pub const fn empty_body_policy(&self) -> &$crate::EmptyBodyPolicy {
                &self.options.empty_body_policy
            }
        }
    };
}

pub(crate) use serializer_options;
