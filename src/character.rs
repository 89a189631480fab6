//! Code point classification.
//!
//! All predicates are plain range checks over `u32` so they can be applied to
//! raw, not yet validated, code unit values.

/// Largest Unicode code point.
pub const MAX_CODEPOINT: u32 = 0x10_FFFF;
/// Zero width no-break space, used as the byte order mark.
pub const BYTE_ORDER_MARK: u32 = 0xFEFF;
pub const REPLACEMENT_CHARACTER: u32 = 0xFFFD;
/// Never a character in any plane.
pub const NOT_A_CHARACTER: u32 = 0xFFFF;

pub(crate) const SURROGATE_HIGH_START: u32 = 0xD800;
pub(crate) const SURROGATE_LOW_START: u32 = 0xDC00;

/// `true` for `0xD800..=0xDFFF`.
#[inline]
pub const fn is_surrogate(codepoint: u32) -> bool {
    (codepoint & 0xFFFF_F800) == SURROGATE_HIGH_START
}

#[inline]
pub const fn is_high_surrogate(codepoint: u32) -> bool {
    matches!(codepoint, 0xD800..=0xDBFF)
}

#[inline]
pub const fn is_low_surrogate(codepoint: u32) -> bool {
    matches!(codepoint, 0xDC00..=0xDFFF)
}

/// `true` for `0xFDD0..=0xFDEF` and the last two code points of each of the 17 planes.
#[inline]
pub const fn is_non_character(codepoint: u32) -> bool {
    matches!(codepoint, 0xFDD0..=0xFDEF)
        || (codepoint <= MAX_CODEPOINT && (codepoint & 0xFFFE) == 0xFFFE)
}

/// A code point any encoder will accept: in range and not a surrogate.
#[inline]
pub const fn is_scalar_value(codepoint: u32) -> bool {
    codepoint <= MAX_CODEPOINT && !is_surrogate(codepoint)
}

pub const fn is_private_use(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0xE000..=0xF8FF | 0xF_0000..=0xF_FFFD | 0x10_0000..=0x10_FFFD
    )
}

pub const fn is_space(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x0009..=0x000D
            | 0x0020
            | 0x0085
            | 0x00A0
            | 0x1680
            | 0x180E
            | 0x2000..=0x200A
            | 0x2028
            | 0x2029
            | 0x202F
            | 0x205F
            | 0x3000
    )
}

/// C0 and C1 controls, DEL, and the invisible format controls.
pub const fn is_control(codepoint: u32) -> bool {
    matches!(
        codepoint,
        0x0000..=0x001F
            | 0x007F..=0x009F
            | 0x06DD
            | 0x070F
            | 0x180E
            | 0x200C
            | 0x200D
            | 0x2028
            | 0x2029
            | 0x2060..=0x2063
            | 0x206A..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFC
            | 0x1_D173..=0x1_D17A
    )
}
