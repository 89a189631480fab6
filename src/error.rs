use thiserror::Error;

/// Result type for transcoding operations.
pub type EncodingResult<T> = Result<T, EncodingError>;

/// Reasons a decode or encode call rejected its input.
///
/// Every codec stops at the first offending unit; no partial output is
/// returned alongside an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Byte count is not a multiple of the code unit width.
    #[error("misaligned input: {length} bytes is not a multiple of the {unit_width}-byte code unit")]
    MisalignedInput {
        /// Length of the rejected input in bytes.
        length: usize,
        /// Width of one code unit in bytes.
        unit_width: usize,
    },

    /// UTF-8 byte pattern is illegal, truncated or overlong.
    #[error("malformed UTF-8 sequence at byte {offset}")]
    MalformedSequence {
        /// Byte offset of the leading byte of the sequence.
        offset: usize,
    },

    /// Unpaired high or low surrogate in UTF-16 input.
    #[error("invalid surrogate pair at byte {offset}")]
    InvalidSurrogatePair {
        /// Byte offset of the first unit of the pair.
        offset: usize,
    },

    /// Value outside `0..=0x10FFFF` or a surrogate where a scalar value is required.
    #[error("invalid code point {value:#06X} at position {position}")]
    InvalidCodePoint {
        /// The rejected value.
        value: u32,
        /// Byte offset of the unit when decoding, element index when encoding.
        position: usize,
    },
}

/// An encoding label that names none of the supported forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown encoding label {0:?}")]
pub struct ParseEncodingError(pub String);
