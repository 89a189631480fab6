use crate::character::is_scalar_value;
use crate::error::{EncodingError, EncodingResult};
use crate::utf::{decode_sequences, UtfSequence};
use crate::{CodePoint, CodePointSequence};

pub(crate) struct Utf8Sequence {
    full_length: u8,
    current_length: u8,
    bytes: [u8; 4],
}

impl UtfSequence for Utf8Sequence {
    type Unit = u8;

    #[inline]
    fn build(byte: u8) -> Option<Self> {
        let full_length = match byte.leading_ones() {
            0 => 1,
            n @ 2..=4 => n,
            _ => return None,
        } as u8;
        if Self::is_invalid(byte) {
            return None;
        }
        Some(Self {
            full_length,
            current_length: 1,
            bytes: [byte, 0, 0, 0],
        })
    }
    #[inline]
    fn is_complete(&self) -> bool {
        self.current_length == self.full_length
    }
    #[inline]
    fn add_unit(&mut self, byte: u8) -> bool {
        if self.is_complete() || byte & 0b1100_0000 != 0b1000_0000 {
            return false;
        }
        self.bytes[self.current_len()] = byte;
        self.current_length += 1;
        true
    }
    #[inline]
    fn codepoint(&self) -> u32 {
        let lead = u32::from(self.bytes[0]);
        let mut codepoint = match self.full_length {
            1 => lead,
            2 => lead & 0b0001_1111,
            3 => lead & 0b0000_1111,
            _ => lead & 0b0000_0111,
        };
        for &byte in &self.bytes[1..self.current_len()] {
            codepoint = (codepoint << 6) | u32::from(byte & 0b0011_1111);
        }
        codepoint
    }
    #[inline]
    fn is_valid(&self) -> bool {
        let codepoint = self.codepoint();
        if !is_scalar_value(codepoint) {
            return false;
        }
        // Shortest form only.
        match self.full_length {
            1 => codepoint <= 0x7F,
            2 => (0x80..=0x7FF).contains(&codepoint),
            3 => (0x800..=0xFFFF).contains(&codepoint),
            _ => (0x1_0000..=0x10_FFFF).contains(&codepoint),
        }
    }

    fn malformed(offset: usize, _lead: u8) -> EncodingError {
        EncodingError::MalformedSequence { offset }
    }
    fn invalid(offset: usize, _codepoint: u32) -> EncodingError {
        EncodingError::MalformedSequence { offset }
    }
}

impl Utf8Sequence {
    /// Packs a scalar value into its shortest form.
    pub const fn from_codepoint(codepoint: u32) -> Option<Self> {
        if !is_scalar_value(codepoint) {
            return None;
        }
        let (full_length, bytes) = if codepoint <= 0x7F {
            (1, [codepoint as u8, 0, 0, 0])
        } else if codepoint <= 0x7FF {
            (
                2,
                [
                    0b1100_0000 | (codepoint >> 6) as u8,
                    Self::continuation(codepoint),
                    0,
                    0,
                ],
            )
        } else if codepoint <= 0xFFFF {
            (
                3,
                [
                    0b1110_0000 | (codepoint >> 12) as u8,
                    Self::continuation(codepoint >> 6),
                    Self::continuation(codepoint),
                    0,
                ],
            )
        } else {
            (
                4,
                [
                    0b1111_0000 | (codepoint >> 18) as u8,
                    Self::continuation(codepoint >> 12),
                    Self::continuation(codepoint >> 6),
                    Self::continuation(codepoint),
                ],
            )
        };
        Some(Self {
            full_length,
            current_length: full_length,
            bytes,
        })
    }
    #[inline]
    const fn continuation(bits: u32) -> u8 {
        0b1000_0000 | (bits & 0b0011_1111) as u8
    }
    /// Lead bytes that can only start an overlong or out of range sequence.
    const fn is_invalid(byte: u8) -> bool {
        matches!(byte, 0xC0 | 0xC1 | 0xF5..)
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.current_len()]
    }
    pub const fn current_len(&self) -> usize {
        self.current_length as usize
    }
}

/// Decodes UTF-8 into code points, dropping a leading byte order mark.
///
/// # Errors
///
/// [`EncodingError::MalformedSequence`] at the first illegal lead byte,
/// bad or missing continuation byte, overlong form, encoded surrogate or
/// value above `U+10FFFF`.
pub fn decode_utf8(bytes: &[u8]) -> EncodingResult<CodePointSequence> {
    decode_sequences::<Utf8Sequence, _>(bytes.iter().copied().enumerate(), bytes.len())
        .inspect_err(|error| tracing::debug!(%error, "rejected UTF-8 input"))
}

/// Encodes code points as UTF-8. No byte order mark is written.
///
/// # Errors
///
/// [`EncodingError::InvalidCodePoint`] for surrogates and values above `U+10FFFF`.
pub fn encode_utf8(codepoints: &[CodePoint]) -> EncodingResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(codepoints.len());
    for (position, &value) in codepoints.iter().enumerate() {
        let Some(sequence) = Utf8Sequence::from_codepoint(value) else {
            let error = EncodingError::InvalidCodePoint { value, position };
            tracing::debug!(%error, "rejected code points for UTF-8");
            return Err(error);
        };
        bytes.extend_from_slice(sequence.as_bytes());
    }
    Ok(bytes)
}
