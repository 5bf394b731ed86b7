//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```
//! use pincer_response::prelude::*;
//! ```

pub use crate::{
    DataSerializer, DecodableSerializer, Empty, EmptyBodyPolicy, Error, JsonDecodableSerializer,
    JsonSerializer, PropertyListDecodableSerializer, PropertyListSerializer, RequestHead,
    ResponseHead, ResponseSerializer, Result, StringSerializer, TextEncoding,
};
