use crate::character::{
    is_high_surrogate, is_low_surrogate, is_scalar_value, BYTE_ORDER_MARK, SURROGATE_HIGH_START,
    SURROGATE_LOW_START,
};
use crate::error::{EncodingError, EncodingResult};
use crate::utf::{decode_sequences, ensure_aligned, resolve_byte_order, Endianness, UtfSequence};
use crate::{CodePoint, CodePointSequence};

const HALF_SHIFT: u32 = 10;
const HALF_BASE: u32 = 0x1_0000;
const HALF_MASK: u32 = 0x3FF;

#[derive(Clone, Copy)]
enum Utf16Type {
    Bmp(u16),
    Surrogate { data: [u16; 2], is_complete: bool },
}

pub(crate) struct Utf16Sequence(Utf16Type);

impl UtfSequence for Utf16Sequence {
    type Unit = u16;

    #[inline]
    fn build(unit: u16) -> Option<Self> {
        let value = u32::from(unit);
        if is_low_surrogate(value) {
            return None;
        }
        let data = if is_high_surrogate(value) {
            Utf16Type::Surrogate {
                data: [unit, 0],
                is_complete: false,
            }
        } else {
            Utf16Type::Bmp(unit)
        };
        Some(Self(data))
    }

    #[inline]
    fn is_complete(&self) -> bool {
        match self.0 {
            Utf16Type::Bmp(_) => true,
            Utf16Type::Surrogate { is_complete, .. } => is_complete,
        }
    }

    #[inline]
    fn add_unit(&mut self, unit: u16) -> bool {
        if let Utf16Type::Surrogate {
            ref mut data,
            ref mut is_complete,
        } = self.0
        {
            if !*is_complete && is_low_surrogate(u32::from(unit)) {
                data[1] = unit;
                *is_complete = true;
                return true;
            }
        }
        false
    }

    #[inline]
    fn codepoint(&self) -> u32 {
        match self.0 {
            Utf16Type::Bmp(unit) => u32::from(unit),
            Utf16Type::Surrogate { data, .. } => {
                let high = u32::from(data[0]);
                let low = u32::from(data[1]);
                ((high - SURROGATE_HIGH_START) << HALF_SHIFT) + low + (HALF_BASE - SURROGATE_LOW_START)
            }
        }
    }

    fn malformed(offset: usize, _lead: u16) -> EncodingError {
        EncodingError::InvalidSurrogatePair { offset }
    }
    fn invalid(offset: usize, value: u32) -> EncodingError {
        EncodingError::InvalidCodePoint {
            value,
            position: offset,
        }
    }
}

impl Utf16Sequence {
    /// Splits a scalar value into one unit or a surrogate pair.
    pub const fn from_codepoint(codepoint: u32) -> Option<Self> {
        if !is_scalar_value(codepoint) {
            return None;
        }
        if codepoint < HALF_BASE {
            return Some(Self(Utf16Type::Bmp(codepoint as u16)));
        }
        let offset = codepoint - HALF_BASE;
        let high = ((offset >> HALF_SHIFT) + SURROGATE_HIGH_START) as u16;
        let low = ((offset & HALF_MASK) + SURROGATE_LOW_START) as u16;
        Some(Self(Utf16Type::Surrogate {
            data: [high, low],
            is_complete: true,
        }))
    }
    pub fn units(&self) -> &[u16] {
        match self.0 {
            Utf16Type::Bmp(ref unit) => std::slice::from_ref(unit),
            Utf16Type::Surrogate { ref data, .. } => data,
        }
    }
}

/// Decodes UTF-16 into code points.
///
/// A leading `FF FE` or `FE FF` overrides `endianness`; the byte order mark
/// itself is consumed.
///
/// # Errors
///
/// - [`EncodingError::MisalignedInput`] for an odd byte count, before any unit is read.
/// - [`EncodingError::InvalidSurrogatePair`] for an unpaired high or low surrogate.
pub fn decode_utf16(bytes: &[u8], endianness: Endianness) -> EncodingResult<CodePointSequence> {
    decode_units(bytes, endianness)
        .inspect_err(|error| tracing::debug!(%error, "rejected UTF-16 input"))
}

fn decode_units(bytes: &[u8], endianness: Endianness) -> EncodingResult<CodePointSequence> {
    ensure_aligned(bytes, 2)?;
    let bom = BYTE_ORDER_MARK as u16;
    let endianness = resolve_byte_order(bytes, &bom.to_le_bytes(), &bom.to_be_bytes(), endianness);
    let units = bytes
        .chunks_exact(2)
        .map(|pair| endianness.u16_from_bytes([pair[0], pair[1]]))
        .enumerate()
        .map(|(index, unit)| (index * 2, unit));
    decode_sequences::<Utf16Sequence, _>(units, bytes.len() / 2)
}

/// Encodes code points as UTF-16 in the given byte order. No byte order mark is written.
///
/// # Errors
///
/// [`EncodingError::InvalidCodePoint`] for surrogates and values above `U+10FFFF`.
pub fn encode_utf16(codepoints: &[CodePoint], endianness: Endianness) -> EncodingResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(codepoints.len() * 2);
    for (position, &value) in codepoints.iter().enumerate() {
        let Some(sequence) = Utf16Sequence::from_codepoint(value) else {
            let error = EncodingError::InvalidCodePoint { value, position };
            tracing::debug!(%error, "rejected code points for UTF-16");
            return Err(error);
        };
        for &unit in sequence.units() {
            bytes.extend_from_slice(&endianness.u16_to_bytes(unit));
        }
    }
    Ok(bytes)
}
