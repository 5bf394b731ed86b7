//! Raw byte serializer.

use bytes::Bytes;

use super::{Body, BodyRequirement, ResponseSerializer, SerializerOptions};
use crate::{BoxError, RequestHead, ResponseHead, Result};

/// Returns the response body as raw bytes.
///
/// A zero-length body is returned as is. A missing body is an empty
/// [`Bytes`] when the empty-body policy allows it, and
/// [`Error::InputDataNil`](crate::Error::InputDataNil) otherwise.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use pincer_response::{DataSerializer, ResponseHead, ResponseSerializer};
///
/// let serializer = DataSerializer::new();
///
/// let data = serializer.serialize(None, None, Some(Bytes::from("data")), None)?;
/// assert_eq!(data, Bytes::from("data"));
///
/// let no_content = ResponseHead::new(204);
/// let data = serializer.serialize(None, Some(&no_content), None, None)?;
/// assert!(data.is_empty());
/// # Ok::<(), pincer_response::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataSerializer {
    options: SerializerOptions,
}

impl DataSerializer {
    const NAME: &'static str = "data";

    /// Create a serializer with the default empty-body policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

super::serializer_options!(; DataSerializer);

impl ResponseSerializer for DataSerializer {
    type Output = Bytes;

    fn serialize(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<Bytes> {
        let body = self.options.acquire(
            Self::NAME,
            BodyRequirement::Present,
            request,
            response,
            data,
            error,
        )?;

        Ok(match body {
            Body::Data(data) => data,
            Body::Empty => Bytes::new(),
        })
    }
}
