//! Text encodings and encoding resolution for the string serializer.
//!
//! The encoding used to decode a text body is chosen, in order, from:
//! 1. the encoding given to [`StringSerializer::with_encoding`](crate::StringSerializer::with_encoding),
//! 2. the `charset` parameter of the response `Content-Type` header,
//! 3. [`TextEncoding::default`] (UTF-8).

use std::borrow::Cow;

use derive_more::Display;
use encoding_rs::Encoding;
use tracing::{trace, warn};

use crate::ResponseHead;

/// A text encoding supported by the string serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum TextEncoding {
    /// UTF-8.
    #[default]
    #[display("UTF-8")]
    Utf8,
    /// UTF-16, byte order taken from the BOM (big-endian without one).
    #[display("UTF-16")]
    Utf16,
    /// UTF-16 little-endian.
    #[display("UTF-16LE")]
    Utf16Le,
    /// UTF-16 big-endian.
    #[display("UTF-16BE")]
    Utf16Be,
    /// UTF-32, byte order taken from the BOM (big-endian without one).
    #[display("UTF-32")]
    Utf32,
    /// UTF-32 little-endian.
    #[display("UTF-32LE")]
    Utf32Le,
    /// UTF-32 big-endian.
    #[display("UTF-32BE")]
    Utf32Be,
    /// 7-bit US-ASCII.
    #[display("US-ASCII")]
    Ascii,
    /// ISO-8859-1 (Latin-1).
    #[display("ISO-8859-1")]
    IsoLatin1,
}

impl TextEncoding {
    /// Look up an encoding by IANA charset name, ignoring ASCII case.
    ///
    /// ```
    /// use pincer_response::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::from_iana_name("utf-8"), Some(TextEncoding::Utf8));
    /// assert_eq!(TextEncoding::from_iana_name("Latin1"), Some(TextEncoding::IsoLatin1));
    /// assert_eq!(TextEncoding::from_iana_name("klingon"), None);
    /// ```
    #[must_use]
    pub fn from_iana_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        let encoding = match name.as_str() {
            "utf-8" | "utf8" | "unicode-1-1-utf-8" => Self::Utf8,
            "utf-16" | "utf16" => Self::Utf16,
            "utf-16le" => Self::Utf16Le,
            "utf-16be" => Self::Utf16Be,
            "utf-32" | "utf32" => Self::Utf32,
            "utf-32le" => Self::Utf32Le,
            "utf-32be" => Self::Utf32Be,
            "us-ascii" | "ascii" | "iso646-us" | "ansi_x3.4-1968" => Self::Ascii,
            "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "l1" => Self::IsoLatin1,
            _ => return None,
        };
        Some(encoding)
    }

    /// Decode `bytes` under this encoding.
    ///
    /// Returns `None` if the bytes are not valid in this encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => strict(encoding_rs::UTF_8, bytes),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.iter().copied().map(char::from).collect()),
            // Every byte maps to the code point of the same value.
            Self::IsoLatin1 => Some(bytes.iter().copied().map(char::from).collect()),
            Self::Utf16 => match Encoding::for_bom(bytes) {
                Some((encoding, bom)) if encoding != encoding_rs::UTF_8 => {
                    strict(encoding, bytes.get(bom..)?)
                }
                _ => strict(encoding_rs::UTF_16BE, bytes),
            },
            Self::Utf16Le => strict(encoding_rs::UTF_16LE, bytes),
            Self::Utf16Be => strict(encoding_rs::UTF_16BE, bytes),
            Self::Utf32 => match bytes {
                [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => decode_utf32(rest, u32::from_le_bytes),
                [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => decode_utf32(rest, u32::from_be_bytes),
                _ => decode_utf32(bytes, u32::from_be_bytes),
            },
            Self::Utf32Le => decode_utf32(bytes, u32::from_le_bytes),
            Self::Utf32Be => decode_utf32(bytes, u32::from_be_bytes),
        }
    }
}

/// Decode without BOM handling, failing on malformed input instead of
/// inserting replacement characters.
fn strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

// `encoding_rs` has no UTF-32 decoder.
fn decode_utf32(bytes: &[u8], unit: fn([u8; 4]) -> u32) -> Option<String> {
    let (chunks, remainder) = bytes.as_chunks::<4>();
    if !remainder.is_empty() {
        return None;
    }
    chunks
        .iter()
        .copied()
        .map(|chunk| char::from_u32(unit(chunk)))
        .collect()
}

/// Pick the encoding used to decode a text body.
///
/// An explicit encoding always wins. Otherwise the `charset` parameter of the
/// response `Content-Type` is used when it names a supported encoding, and
/// UTF-8 is the fallback.
#[must_use]
pub fn resolve_encoding(
    explicit: Option<TextEncoding>,
    response: Option<&ResponseHead>,
) -> TextEncoding {
    if let Some(encoding) = explicit {
        trace!(%encoding, "using explicit encoding");
        return encoding;
    }

    let Some(charset) = response.and_then(ResponseHead::charset) else {
        return TextEncoding::default();
    };

    if let Some(encoding) = TextEncoding::from_iana_name(&charset) {
        trace!(%encoding, %charset, "using encoding from Content-Type");
        encoding
    } else {
        warn!(%charset, "unsupported charset in Content-Type, falling back to UTF-8");
        TextEncoding::default()
    }
}
