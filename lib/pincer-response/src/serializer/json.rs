//! JSON serializer.

use bytes::Bytes;

use super::{Body, BodyRequirement, ResponseSerializer, SerializerOptions, traced};
use crate::{BoxError, Error, RequestHead, ResponseHead, Result};

/// Parses the response body into a generic [`serde_json::Value`].
///
/// A missing or zero-length body fails with
/// [`Error::InputDataNilOrZeroLength`] unless the empty-body policy allows it,
/// in which case the result is [`serde_json::Value::Null`].
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use pincer_response::{JsonSerializer, ResponseHead, ResponseSerializer};
///
/// let serializer = JsonSerializer::new();
///
/// let json = serializer.serialize(None, None, Some(Bytes::from(r#"{"json": true}"#)), None)?;
/// assert_eq!(json["json"], true);
///
/// let json = serializer.serialize(None, Some(&ResponseHead::new(204)), None, None)?;
/// assert!(json.is_null());
/// # Ok::<(), pincer_response::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonSerializer {
    options: SerializerOptions,
}

impl JsonSerializer {
    const NAME: &'static str = "json";

    /// Create a serializer with the default empty-body policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

super::serializer_options!(; JsonSerializer);

impl ResponseSerializer for JsonSerializer {
    type Output = serde_json::Value;

    fn serialize(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<serde_json::Value> {
        let data = match self.options.acquire(
            Self::NAME,
            BodyRequirement::NonEmpty,
            request,
            response,
            data,
            error,
        )? {
            Body::Data(data) => data,
            Body::Empty => return Ok(serde_json::Value::Null),
        };

        traced(
            Self::NAME,
            serde_json::from_slice(&data)
                .map_err(|source| Error::JsonSerializationFailed { source }),
        )
    }
}
