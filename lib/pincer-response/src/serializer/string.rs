//! Text serializer.

use bytes::Bytes;

use super::{Body, BodyRequirement, ResponseSerializer, SerializerOptions, traced};
use crate::{BoxError, Error, RequestHead, ResponseHead, Result, TextEncoding, resolve_encoding};

/// Decodes the response body as text.
///
/// The encoding is the one given to [`Self::with_encoding`], else the
/// `charset` of the response `Content-Type`, else UTF-8. Bytes that are not
/// valid under that encoding fail with
/// [`Error::StringSerializationFailed`], which records the encoding.
///
/// An empty response allowed by the policy decodes to an empty string.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use pincer_response::{ResponseSerializer, StringSerializer, TextEncoding};
///
/// let serializer = StringSerializer::new().with_encoding(TextEncoding::IsoLatin1);
/// let text = serializer.serialize(None, None, Some(Bytes::from_static(b"caf\xE9")), None)?;
/// assert_eq!(text, "café");
/// # Ok::<(), pincer_response::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringSerializer {
    encoding: Option<TextEncoding>,
    options: SerializerOptions,
}

impl StringSerializer {
    const NAME: &'static str = "string";

    /// Create a serializer that infers the encoding from the response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Always decode with `encoding`, ignoring the response `Content-Type`.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The explicit encoding, if any.
    #[must_use]
    pub const fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }
}

super::serializer_options!(; StringSerializer);

impl ResponseSerializer for StringSerializer {
    type Output = String;

    fn serialize(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<String> {
        let data = match self.options.acquire(
            Self::NAME,
            BodyRequirement::Present,
            request,
            response,
            data,
            error,
        )? {
            Body::Data(data) => data,
            Body::Empty => return Ok(String::new()),
        };

        let encoding = resolve_encoding(self.encoding, response);
        traced(
            Self::NAME,
            encoding
                .decode(&data)
                .ok_or(Error::StringSerializationFailed { encoding }),
        )
    }
}
