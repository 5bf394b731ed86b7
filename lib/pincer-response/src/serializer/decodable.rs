//! Typed serializer.

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::{Body, BodyRequirement, ResponseSerializer, SerializerOptions, traced};
use crate::decoder::decode_empty;
use crate::{
    BoxError, DataDecoder, JsonDecoder, PropertyListDecoder, RequestHead, ResponseHead, Result,
};

/// Decodes the response body into a `T` with a [`DataDecoder`].
///
/// When the empty-body policy accepts an empty response, the value is built
/// without the decoder: types that accept a null or an empty map (such as
/// `Option<_>`, `()` or [`Empty`](crate::Empty)) succeed, anything else fails
/// with [`Error::InvalidEmptyResponse`](crate::Error::InvalidEmptyResponse).
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use pincer_response::{JsonDecodableSerializer, ResponseSerializer};
///
/// #[derive(Debug, serde::Deserialize)]
/// struct User {
///     name: String,
/// }
///
/// let serializer = JsonDecodableSerializer::<User>::new();
/// let user = serializer.serialize(None, None, Some(Bytes::from(r#"{"name": "Ada"}"#)), None)?;
/// assert_eq!(user.name, "Ada");
/// # Ok::<(), pincer_response::Error>(())
/// ```
pub struct DecodableSerializer<T, D = JsonDecoder> {
    decoder: D,
    options: SerializerOptions,
    _marker: PhantomData<fn() -> T>,
}

/// Typed serializer for JSON bodies.
pub type JsonDecodableSerializer<T> = DecodableSerializer<T, JsonDecoder>;

/// Typed serializer for property list bodies.
pub type PropertyListDecodableSerializer<T> = DecodableSerializer<T, PropertyListDecoder>;

impl<T> DecodableSerializer<T> {
    /// Create a serializer using the JSON decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_decoder(JsonDecoder)
    }
}

impl<T, D> DecodableSerializer<T, D> {
    const NAME: &'static str = "decodable";

    /// Create a serializer using `decoder`.
    #[must_use]
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder,
            options: SerializerOptions::default(),
            _marker: PhantomData,
        }
    }

    /// The decoder in use.
    #[must_use]
    pub const fn decoder(&self) -> &D {
        &self.decoder
    }
}

super::serializer_options!(T, D; DecodableSerializer<T, D>);

impl<T, D: Default> Default for DecodableSerializer<T, D> {
    fn default() -> Self {
        Self::with_decoder(D::default())
    }
}

impl<T, D: Clone> Clone for DecodableSerializer<T, D> {
    fn clone(&self) -> Self {
        Self {
            decoder: self.decoder.clone(),
            options: self.options.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, D: fmt::Debug> fmt::Debug for DecodableSerializer<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodableSerializer")
            .field("type", &std::any::type_name::<T>())
            .field("decoder", &self.decoder)
            .field("options", &self.options)
            .finish()
    }
}

impl<T, D> ResponseSerializer for DecodableSerializer<T, D>
where
    T: DeserializeOwned,
    D: DataDecoder,
{
    type Output = T;

    fn serialize(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<T> {
        let result = match self.options.acquire(
            Self::NAME,
            BodyRequirement::NonEmpty,
            request,
            response,
            data,
            error,
        )? {
            Body::Data(data) => self.decoder.decode(&data),
            Body::Empty => decode_empty(),
        };
        traced(Self::NAME, result)
    }
}
