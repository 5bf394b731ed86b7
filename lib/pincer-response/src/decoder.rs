//! Structured decoders used by [`DecodableSerializer`](crate::DecodableSerializer).
//!
//! A [`DataDecoder`] turns a non-empty body into a typed value. Parse failures
//! (the bytes are not a document of the decoder's format) and mapping
//! failures (the document does not fit the target type) are reported as
//! different [`Error`] variants.

use std::any::type_name;
use std::io::Cursor;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Decodes a structured document into a typed value.
pub trait DataDecoder: std::fmt::Debug + Send + Sync + 'static {
    /// Decode `data` into a `T`.
    ///
    /// # Errors
    ///
    /// Returns the format's parse-failure variant when `data` is not a valid
    /// document, and [`Error::DecodingFailed`] when it does not match `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;
}

/// JSON decoder with path-aware mapping errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl DataDecoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let value: serde_json::Value = serde_json::from_slice(data)
            .map_err(|source| Error::JsonSerializationFailed { source })?;
        serde_path_to_error::deserialize(value).map_err(|err| Error::DecodingFailed {
            type_name: type_name::<T>(),
            path: Some(err.path().to_string()),
            source: Box::new(err.into_inner()),
        })
    }
}

/// Property list decoder, accepting XML and binary property lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyListDecoder;

impl PropertyListDecoder {
    /// Parse `data` into a generic property list value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyListSerializationFailed`] if `data` is not a
    /// property list.
    pub fn parse(data: &[u8]) -> Result<plist::Value> {
        plist::Value::from_reader(Cursor::new(data))
            .map_err(|source| Error::PropertyListSerializationFailed { source })
    }
}

impl DataDecoder for PropertyListDecoder {
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let value = Self::parse(data)?;
        plist::from_value(&value).map_err(|source| Error::DecodingFailed {
            type_name: type_name::<T>(),
            path: None,
            source: Box::new(source),
        })
    }
}

/// Build a `T` from an absent body.
///
/// "No data" is first offered as a null/unit value, which covers `Option<T>`,
/// `()`, unit structs, and [`Empty`](crate::Empty). It is then offered as an
/// empty map, which covers structs whose fields are all optional or defaulted.
pub(crate) fn decode_empty<T: DeserializeOwned>() -> Result<T> {
    T::deserialize(serde_json::Value::Null)
        .or_else(|_| T::deserialize(serde_json::Value::Object(serde_json::Map::new())))
        .map_err(|_| Error::InvalidEmptyResponse {
            type_name: type_name::<T>(),
        })
}
