//! Error types for response serialization.

use std::path::{Path, PathBuf};

use derive_more::Display;

use crate::TextEncoding;

/// A type-erased error, used for upstream transport failures and decoder causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Error Kind
// ============================================================================

/// Fieldless classification of an [`Error`].
///
/// Use [`Error::kind`] to branch on the failure without destructuring the
/// variant payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// In-memory body required but absent.
    #[display("input data nil")]
    InputDataNil,
    /// Non-empty body required but absent or zero length.
    #[display("input data nil or zero length")]
    InputDataNilOrZeroLength,
    /// File reference required but absent.
    #[display("input file nil")]
    InputFileNil,
    /// File reference present but unreadable.
    #[display("input file read failed")]
    InputFileReadFailed,
    /// Bytes not valid under the resolved text encoding.
    #[display("string serialization failed")]
    StringSerializationFailed,
    /// JSON parse failure.
    #[display("JSON serialization failed")]
    JsonSerializationFailed,
    /// Property list parse failure.
    #[display("property list serialization failed")]
    PropertyListSerializationFailed,
    /// Parsed document does not match the target type.
    #[display("decoding failed")]
    DecodingFailed,
    /// Target type cannot be built from an empty response.
    #[display("invalid empty response")]
    InvalidEmptyResponse,
}

// ============================================================================
// Error Type
// ============================================================================

/// Failure of a response serializer.
///
/// Every variant maps to one [`ErrorKind`]. The lower-level cause, when there
/// is one, is available from [`Error::underlying_error`] and from
/// [`std::error::Error::source`].
#[derive(Debug, Display)]
pub enum Error {
    /// No response data was available.
    ///
    /// Also produced when an upstream error was supplied and no usable body
    /// came with it; that error is kept in `upstream`.
    #[display("response data was nil")]
    InputDataNil {
        /// The transport error reported alongside the missing body.
        upstream: Option<BoxError>,
    },

    /// A structured document was expected but the body was absent or empty.
    #[display("response data was nil or zero length")]
    InputDataNilOrZeroLength,

    /// No file was provided for a download.
    #[display("response file was nil")]
    InputFileNil {
        /// The transport error reported alongside the missing file.
        upstream: Option<BoxError>,
    },

    /// The downloaded file could not be read.
    #[display("failed to read response file '{}': {source}", path.display())]
    InputFileReadFailed {
        /// Location of the file.
        path: PathBuf,
        /// OS-level read error.
        source: std::io::Error,
    },

    /// The body is not valid under the resolved text encoding.
    #[display("response data could not be decoded as {encoding}")]
    StringSerializationFailed {
        /// The encoding that was attempted.
        encoding: TextEncoding,
    },

    /// The body is not a valid JSON document.
    #[display("JSON could not be parsed: {source}")]
    JsonSerializationFailed {
        /// Parser error.
        source: serde_json::Error,
    },

    /// The body is not a valid property list.
    #[display("property list could not be parsed: {source}")]
    PropertyListSerializationFailed {
        /// Parser error.
        source: plist::Error,
    },

    /// The document parsed but does not match the target type.
    #[display("response could not be decoded into `{type_name}`: {source}")]
    DecodingFailed {
        /// Name of the target type.
        type_name: &'static str,
        /// Path to the offending field (e.g. `user.address.city`), when known.
        path: Option<String>,
        /// Decoder error.
        source: BoxError,
    },

    /// The empty-body policy allowed an empty response, but the target type
    /// cannot be built from no data.
    #[display("empty response cannot be represented as `{type_name}`")]
    InvalidEmptyResponse {
        /// Name of the target type.
        type_name: &'static str,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an [`Error::InputDataNil`] without upstream error.
    #[must_use]
    pub const fn input_data_nil() -> Self {
        Self::InputDataNil { upstream: None }
    }

    /// Create an [`Error::InputFileNil`] without upstream error.
    #[must_use]
    pub const fn input_file_nil() -> Self {
        Self::InputFileNil { upstream: None }
    }

    /// Create an [`Error::InputFileReadFailed`].
    #[must_use]
    pub fn input_file_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputFileReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InputDataNil { .. } => ErrorKind::InputDataNil,
            Self::InputDataNilOrZeroLength => ErrorKind::InputDataNilOrZeroLength,
            Self::InputFileNil { .. } => ErrorKind::InputFileNil,
            Self::InputFileReadFailed { .. } => ErrorKind::InputFileReadFailed,
            Self::StringSerializationFailed { .. } => ErrorKind::StringSerializationFailed,
            Self::JsonSerializationFailed { .. } => ErrorKind::JsonSerializationFailed,
            Self::PropertyListSerializationFailed { .. } => {
                ErrorKind::PropertyListSerializationFailed
            }
            Self::DecodingFailed { .. } => ErrorKind::DecodingFailed,
            Self::InvalidEmptyResponse { .. } => ErrorKind::InvalidEmptyResponse,
        }
    }

    /// Returns `true` if this is an [`Error::InputDataNil`].
    #[must_use]
    pub const fn is_input_data_nil(&self) -> bool {
        matches!(self, Self::InputDataNil { .. })
    }

    /// Returns `true` if this is an [`Error::InputDataNilOrZeroLength`].
    #[must_use]
    pub const fn is_input_data_nil_or_zero_length(&self) -> bool {
        matches!(self, Self::InputDataNilOrZeroLength)
    }

    /// Returns `true` if this is an [`Error::InputFileNil`].
    #[must_use]
    pub const fn is_input_file_nil(&self) -> bool {
        matches!(self, Self::InputFileNil { .. })
    }

    /// Returns `true` if this is an [`Error::InputFileReadFailed`].
    #[must_use]
    pub const fn is_input_file_read_failed(&self) -> bool {
        matches!(self, Self::InputFileReadFailed { .. })
    }

    /// Returns `true` if this is an [`Error::StringSerializationFailed`].
    #[must_use]
    pub const fn is_string_serialization_failed(&self) -> bool {
        matches!(self, Self::StringSerializationFailed { .. })
    }

    /// Returns `true` if this is an [`Error::JsonSerializationFailed`].
    #[must_use]
    pub const fn is_json_serialization_failed(&self) -> bool {
        matches!(self, Self::JsonSerializationFailed { .. })
    }

    /// Returns `true` if this is an [`Error::PropertyListSerializationFailed`].
    #[must_use]
    pub const fn is_property_list_serialization_failed(&self) -> bool {
        matches!(self, Self::PropertyListSerializationFailed { .. })
    }

    /// Returns `true` if this is an [`Error::DecodingFailed`].
    #[must_use]
    pub const fn is_decoding_failed(&self) -> bool {
        matches!(self, Self::DecodingFailed { .. })
    }

    /// Returns `true` if this is an [`Error::InvalidEmptyResponse`].
    #[must_use]
    pub const fn is_invalid_empty_response(&self) -> bool {
        matches!(self, Self::InvalidEmptyResponse { .. })
    }

    /// The encoding attempted by a failed string serialization.
    #[must_use]
    pub const fn failed_string_encoding(&self) -> Option<TextEncoding> {
        match self {
            Self::StringSerializationFailed { encoding } => Some(*encoding),
            _ => None,
        }
    }

    /// The file that could not be read.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::InputFileReadFailed { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The path to the field that failed to decode, when the decoder tracks it.
    #[must_use]
    pub fn decoding_path(&self) -> Option<&str> {
        match self {
            Self::DecodingFailed { path, .. } => path.as_deref(),
            _ => None,
        }
    }

    /// The upstream error that was supplied with a missing body or file.
    #[must_use]
    pub fn upstream_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::InputDataNil { upstream } | Self::InputFileNil { upstream } => {
                upstream.as_deref()
            }
            _ => None,
        }
    }

    /// The lower-level error that caused this one, if any.
    #[must_use]
    pub fn underlying_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::InputDataNil { .. } | Self::InputFileNil { .. } => self.upstream_error(),
            Self::InputFileReadFailed { source, .. } => Some(source),
            Self::JsonSerializationFailed { source } => Some(source),
            Self::PropertyListSerializationFailed { source } => Some(source),
            Self::DecodingFailed { source, .. } => Some(source.as_ref()),
            Self::InputDataNilOrZeroLength
            | Self::StringSerializationFailed { .. }
            | Self::InvalidEmptyResponse { .. } => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.underlying_error()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
