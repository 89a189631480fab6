pub(crate) mod utf16sequence;
pub(crate) mod utf32sequence;
pub(crate) mod utf8sequence;

use crate::character::{is_scalar_value, BYTE_ORDER_MARK};
use crate::error::{EncodingError, EncodingResult};
use crate::CodePointSequence;

/// Byte order of the 16- and 32-bit forms.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Endianness {
    #[default]
    BigEndian,
    LittleEndian,
}

impl Endianness {
    #[inline]
    pub const fn u16_from_bytes(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::BigEndian => u16::from_be_bytes(bytes),
            Endianness::LittleEndian => u16::from_le_bytes(bytes),
        }
    }
    #[inline]
    pub const fn u16_to_bytes(self, unit: u16) -> [u8; 2] {
        match self {
            Endianness::BigEndian => unit.to_be_bytes(),
            Endianness::LittleEndian => unit.to_le_bytes(),
        }
    }
    #[inline]
    pub const fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            Endianness::BigEndian => u32::from_be_bytes(bytes),
            Endianness::LittleEndian => u32::from_le_bytes(bytes),
        }
    }
    #[inline]
    pub const fn u32_to_bytes(self, unit: u32) -> [u8; 4] {
        match self {
            Endianness::BigEndian => unit.to_be_bytes(),
            Endianness::LittleEndian => unit.to_le_bytes(),
        }
    }
}

/// One code point being assembled from its code units.
///
/// A sequence is started by [`UtfSequence::build`] from a leading unit, fed
/// trailing units until [`UtfSequence::is_complete`], then checked with
/// [`UtfSequence::is_valid`].
pub(crate) trait UtfSequence: Sized {
    type Unit: Copy;

    /// `None` when `unit` cannot start a sequence.
    fn build(unit: Self::Unit) -> Option<Self>;
    fn is_complete(&self) -> bool;
    /// `false` when `unit` cannot continue this sequence.
    fn add_unit(&mut self, unit: Self::Unit) -> bool;
    fn codepoint(&self) -> u32;
    fn is_valid(&self) -> bool {
        is_scalar_value(self.codepoint())
    }

    /// Error for a sequence starting at `offset` that is structurally broken.
    fn malformed(offset: usize, lead: Self::Unit) -> EncodingError;
    /// Error for a complete sequence starting at `offset` whose value is rejected.
    fn invalid(offset: usize, codepoint: u32) -> EncodingError;
}

/// Drives `S` over `(byte offset, unit)` pairs, dropping a leading BOM.
pub(crate) fn decode_sequences<S, I>(units: I, capacity: usize) -> EncodingResult<CodePointSequence>
where
    S: UtfSequence,
    I: IntoIterator<Item = (usize, S::Unit)>,
{
    let mut codepoints = Vec::with_capacity(capacity);
    let mut units = units.into_iter();
    while let Some((offset, lead)) = units.next() {
        let mut sequence = S::build(lead).ok_or_else(|| S::malformed(offset, lead))?;
        while !sequence.is_complete() {
            match units.next() {
                Some((_, unit)) if sequence.add_unit(unit) => {}
                _ => return Err(S::malformed(offset, lead)),
            }
        }
        let codepoint = sequence.codepoint();
        if !sequence.is_valid() {
            return Err(S::invalid(offset, codepoint));
        }
        if offset == 0 && codepoint == BYTE_ORDER_MARK {
            continue;
        }
        codepoints.push(codepoint);
    }
    Ok(codepoints)
}

pub(crate) const fn ensure_aligned(bytes: &[u8], unit_width: usize) -> EncodingResult<()> {
    if bytes.len() % unit_width != 0 {
        return Err(EncodingError::MisalignedInput {
            length: bytes.len(),
            unit_width,
        });
    }
    Ok(())
}

/// A serialized BOM at the head of `bytes` overrides `requested`.
///
/// Either byte order is recognized, so UTF-16 text starting with U+FFFE reads
/// back as a reversed BOM followed by byte-swapped units.
pub(crate) fn resolve_byte_order(
    bytes: &[u8],
    little_endian_bom: &[u8],
    big_endian_bom: &[u8],
    requested: Endianness,
) -> Endianness {
    let detected = if bytes.starts_with(little_endian_bom) {
        Endianness::LittleEndian
    } else if bytes.starts_with(big_endian_bom) {
        Endianness::BigEndian
    } else {
        return requested;
    };
    if detected != requested {
        tracing::trace!(?requested, ?detected, "byte order mark overrides requested byte order");
    }
    detected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_big_endian() {
        assert_eq!(Endianness::default(), Endianness::BigEndian);
    }

    #[test]
    fn unit_packing() {
        assert_eq!(Endianness::BigEndian.u16_to_bytes(0xFEFF), [0xFE, 0xFF]);
        assert_eq!(Endianness::LittleEndian.u16_to_bytes(0xFEFF), [0xFF, 0xFE]);
        assert_eq!(Endianness::LittleEndian.u16_from_bytes([0x41, 0x00]), 0x41);
        assert_eq!(
            Endianness::BigEndian.u32_to_bytes(0x1_F600),
            [0x00, 0x01, 0xF6, 0x00]
        );
        assert_eq!(
            Endianness::LittleEndian.u32_from_bytes([0x00, 0xF6, 0x01, 0x00]),
            0x1_F600
        );
    }

    #[test]
    fn alignment() {
        assert!(ensure_aligned(&[], 2).is_ok());
        assert!(ensure_aligned(&[0; 4], 4).is_ok());
        assert_eq!(
            ensure_aligned(&[0; 6], 4),
            Err(EncodingError::MisalignedInput {
                length: 6,
                unit_width: 4
            })
        );
    }

    #[test]
    fn bom_overrides_either_way() {
        let le = [0xFF, 0xFE];
        let be = [0xFE, 0xFF];
        assert_eq!(
            resolve_byte_order(&[0xFF, 0xFE, 0x41, 0x00], &le, &be, Endianness::BigEndian),
            Endianness::LittleEndian
        );
        assert_eq!(
            resolve_byte_order(&[0xFE, 0xFF, 0x00, 0x41], &le, &be, Endianness::LittleEndian),
            Endianness::BigEndian
        );
        assert_eq!(
            resolve_byte_order(&[0x00, 0x41], &le, &be, Endianness::LittleEndian),
            Endianness::LittleEndian
        );
        assert_eq!(
            resolve_byte_order(&[0xFF], &le, &be, Endianness::BigEndian),
            Endianness::BigEndian
        );
    }
}
