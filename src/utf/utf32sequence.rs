use crate::character::{is_scalar_value, BYTE_ORDER_MARK};
use crate::error::{EncodingError, EncodingResult};
use crate::utf::{decode_sequences, ensure_aligned, resolve_byte_order, Endianness, UtfSequence};
use crate::{CodePoint, CodePointSequence};

/// A UTF-32 unit is its own code point; the sequence only validates it.
pub(crate) struct Utf32Sequence(u32);

impl UtfSequence for Utf32Sequence {
    type Unit = u32;

    #[inline]
    fn build(unit: u32) -> Option<Self> {
        Some(Self(unit))
    }
    #[inline]
    fn is_complete(&self) -> bool {
        true
    }
    // `add_unit` and `malformed` satisfy the trait; `build` always completes.
    #[inline]
    fn add_unit(&mut self, _unit: u32) -> bool {
        false
    }
    #[inline]
    fn codepoint(&self) -> u32 {
        self.0
    }

    fn malformed(offset: usize, lead: u32) -> EncodingError {
        Self::invalid(offset, lead)
    }
    fn invalid(offset: usize, value: u32) -> EncodingError {
        EncodingError::InvalidCodePoint {
            value,
            position: offset,
        }
    }
}

/// Decodes UTF-32 into code points.
///
/// A leading `FF FE 00 00` or `00 00 FE FF` overrides `endianness`; the byte
/// order mark itself is consumed.
///
/// # Errors
///
/// - [`EncodingError::MisalignedInput`] when the length is not a multiple of 4.
/// - [`EncodingError::InvalidCodePoint`] for a unit above `U+10FFFF` or in the surrogate range.
pub fn decode_utf32(bytes: &[u8], endianness: Endianness) -> EncodingResult<CodePointSequence> {
    decode_units(bytes, endianness)
        .inspect_err(|error| tracing::debug!(%error, "rejected UTF-32 input"))
}

fn decode_units(bytes: &[u8], endianness: Endianness) -> EncodingResult<CodePointSequence> {
    ensure_aligned(bytes, 4)?;
    let endianness = resolve_byte_order(
        bytes,
        &BYTE_ORDER_MARK.to_le_bytes(),
        &BYTE_ORDER_MARK.to_be_bytes(),
        endianness,
    );
    let units = bytes
        .chunks_exact(4)
        .map(|quad| endianness.u32_from_bytes([quad[0], quad[1], quad[2], quad[3]]))
        .enumerate()
        .map(|(index, unit)| (index * 4, unit));
    decode_sequences::<Utf32Sequence, _>(units, bytes.len() / 4)
}

/// Encodes code points as UTF-32 in the given byte order. No byte order mark is written.
///
/// # Errors
///
/// [`EncodingError::InvalidCodePoint`] for surrogates and values above `U+10FFFF`.
pub fn encode_utf32(codepoints: &[CodePoint], endianness: Endianness) -> EncodingResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(codepoints.len() * 4);
    for (position, &value) in codepoints.iter().enumerate() {
        if !is_scalar_value(value) {
            let error = EncodingError::InvalidCodePoint { value, position };
            tracing::debug!(%error, "rejected code points for UTF-32");
            return Err(error);
        }
        bytes.extend_from_slice(&endianness.u32_to_bytes(value));
    }
    Ok(bytes)
}
