//! Body preprocessing applied before decoding.
//!
//! A [`DataPreprocessor`] rewrites a non-empty body before a serializer
//! decodes it. Bodies accepted as empty by the [`EmptyBodyPolicy`](crate::EmptyBodyPolicy)
//! are never preprocessed.

use bytes::Bytes;

/// Transforms response bytes before they are decoded.
pub trait DataPreprocessor: std::fmt::Debug + Send + Sync + 'static {
    /// Rewrite `data`.
    fn preprocess(&self, data: Bytes) -> Bytes;
}

/// Leaves the body untouched. This is the default preprocessor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPreprocessor;

impl DataPreprocessor for PassthroughPreprocessor {
    fn preprocess(&self, data: Bytes) -> Bytes {
        data
    }
}

/// Strips the `)]}',\n` prefix some JSON APIs prepend to defeat
/// cross-site script inclusion.
#[derive(Debug, Clone, Copy, Default)]
pub struct XssiPreprocessor;

impl XssiPreprocessor {
    /// The anti-XSSI prefix.
    pub const PREFIX: &'static [u8] = b")]}',\n";
}

impl DataPreprocessor for XssiPreprocessor {
    fn preprocess(&self, data: Bytes) -> Bytes {
        if data.starts_with(Self::PREFIX) {
            data.slice(Self::PREFIX.len()..)
        } else {
            data
        }
    }
}
