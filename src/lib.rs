//! Validating conversion between UTF-8, UTF-16, UTF-32 and plain code points.
//!
//! Every decoder produces a fresh [`CodePointSequence`] whose elements are
//! Unicode scalar values, and every encoder refuses anything else. Calls are
//! pure and fail on the first ill-formed unit without returning partial
//! output.
//!
//! ```
//! use transcode::{decode_utf16, encode_utf8, Endianness};
//!
//! let codepoints = decode_utf16(&[0xD8, 0x3D, 0xDE, 0x00], Endianness::BigEndian).unwrap();
//! assert_eq!(codepoints, vec![0x1F600]);
//! assert_eq!(encode_utf8(&codepoints).unwrap(), "\u{1F600}".as_bytes());
//! ```

pub mod character;
mod error;
mod utf;

use std::fmt;
use std::str::FromStr;

pub use character::{is_non_character, is_surrogate};
pub use error::{EncodingError, EncodingResult, ParseEncodingError};
pub use utf::utf16sequence::{decode_utf16, encode_utf16};
pub use utf::utf32sequence::{decode_utf32, encode_utf32};
pub use utf::utf8sequence::{decode_utf8, encode_utf8};
pub use utf::Endianness;

/// A single Unicode code point.
pub type CodePoint = u32;
/// Decoded text, one element per code point.
pub type CodePointSequence = Vec<CodePoint>;

/// A serialized form together with its byte order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16(Endianness),
    Utf32(Endianness),
}

impl Encoding {
    /// Identifies an encoding from the byte order mark at the start of `bytes`.
    ///
    /// Returns `None` when there is no byte order mark. The UTF-32 marks are
    /// tried first since `FF FE 00 00` also starts with the UTF-16 mark.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        use Endianness::{BigEndian, LittleEndian};
        [
            Self::Utf32(LittleEndian),
            Self::Utf32(BigEndian),
            Self::Utf8,
            Self::Utf16(LittleEndian),
            Self::Utf16(BigEndian),
        ]
        .into_iter()
        .find(|encoding| bytes.starts_with(encoding.byte_order_mark()))
    }

    /// The serialized byte order mark, for callers that want to emit one.
    pub const fn byte_order_mark(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16(Endianness::BigEndian) => &[0xFE, 0xFF],
            Self::Utf16(Endianness::LittleEndian) => &[0xFF, 0xFE],
            Self::Utf32(Endianness::BigEndian) => &[0x00, 0x00, 0xFE, 0xFF],
            Self::Utf32(Endianness::LittleEndian) => &[0xFF, 0xFE, 0x00, 0x00],
        }
    }

    /// Width of one code unit in bytes.
    pub const fn unit_width(self) -> usize {
        match self {
            Self::Utf8 => 1,
            Self::Utf16(_) => 2,
            Self::Utf32(_) => 4,
        }
    }

    pub fn decode(self, bytes: &[u8]) -> EncodingResult<CodePointSequence> {
        match self {
            Self::Utf8 => decode_utf8(bytes),
            Self::Utf16(endianness) => decode_utf16(bytes, endianness),
            Self::Utf32(endianness) => decode_utf32(bytes, endianness),
        }
    }

    pub fn encode(self, codepoints: &[CodePoint]) -> EncodingResult<Vec<u8>> {
        match self {
            Self::Utf8 => encode_utf8(codepoints),
            Self::Utf16(endianness) => encode_utf16(codepoints, endianness),
            Self::Utf32(endianness) => encode_utf32(codepoints, endianness),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Utf8 => "utf-8",
            Self::Utf16(Endianness::BigEndian) => "utf-16be",
            Self::Utf16(Endianness::LittleEndian) => "utf-16le",
            Self::Utf32(Endianness::BigEndian) => "utf-32be",
            Self::Utf32(Endianness::LittleEndian) => "utf-32le",
        };
        f.write_str(label)
    }
}

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    /// Accepts `utf-8`, `utf-16[be|le]` and `utf-32[be|le]`, with or without
    /// the dash and in any case. Without a suffix the byte order is big-endian.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let normalized = label.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let encoding = match normalized.as_str() {
            "utf8" => Self::Utf8,
            "utf16" | "utf16be" => Self::Utf16(Endianness::BigEndian),
            "utf16le" => Self::Utf16(Endianness::LittleEndian),
            "utf32" | "utf32be" => Self::Utf32(Endianness::BigEndian),
            "utf32le" => Self::Utf32(Endianness::LittleEndian),
            _ => return Err(ParseEncodingError(label.to_owned())),
        };
        Ok(encoding)
    }
}

/// Decodes `bytes` as `from` and re-encodes the code points as `to`.
///
/// A leading byte order mark in the input is consumed and none is written.
pub fn transcode(bytes: &[u8], from: Encoding, to: Encoding) -> EncodingResult<Vec<u8>> {
    let codepoints = from.decode(bytes)?;
    to.encode(&codepoints)
}
