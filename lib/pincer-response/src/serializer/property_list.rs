//! Property list serializer.

use bytes::Bytes;

use super::{Body, BodyRequirement, ResponseSerializer, SerializerOptions, traced};
use crate::{BoxError, PropertyListDecoder, RequestHead, ResponseHead, Result};

/// Parses the response body into a generic [`plist::Value`].
///
/// XML and binary property lists are accepted. A missing or zero-length body
/// fails with [`Error::InputDataNilOrZeroLength`](crate::Error::InputDataNilOrZeroLength)
/// unless the empty-body policy allows it, in which case the result is `None`.
#[derive(Debug, Clone, Default)]
pub struct PropertyListSerializer {
    options: SerializerOptions,
}

impl PropertyListSerializer {
    const NAME: &'static str = "property_list";

    /// Create a serializer with the default empty-body policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

super::serializer_options!(; PropertyListSerializer);

impl ResponseSerializer for PropertyListSerializer {
    /// `None` is the null value produced for an allowed empty response.
    type Output = Option<plist::Value>;

    fn serialize(
        &self,
        request: Option<&RequestHead>,
        response: Option<&ResponseHead>,
        data: Option<Bytes>,
        error: Option<BoxError>,
    ) -> Result<Option<plist::Value>> {
        match self.options.acquire(
            Self::NAME,
            BodyRequirement::NonEmpty,
            request,
            response,
            data,
            error,
        )? {
            Body::Data(data) => traced(Self::NAME, PropertyListDecoder::parse(&data).map(Some)),
            Body::Empty => Ok(None),
        }
    }
}
