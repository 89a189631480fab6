use proptest::prelude::*;
use transcode::{
    decode_utf16, decode_utf32, decode_utf8, encode_utf16, encode_utf32, encode_utf8, is_surrogate,
    CodePoint, Encoding, EncodingError, Endianness,
};

const MAX_CODEPOINT: u32 = 0x10_FFFF;

fn endianness() -> impl Strategy<Value = Endianness> {
    prop_oneof![Just(Endianness::BigEndian), Just(Endianness::LittleEndian)]
}

/// Valid text whose first code point is not a byte order mark.
fn text() -> impl Strategy<Value = Vec<CodePoint>> {
    prop::collection::vec(any::<char>().prop_map(u32::from), 0..64)
        .prop_filter("leading byte order mark is consumed on decode", |codepoints| {
            codepoints.first() != Some(&0xFEFF)
        })
}

/// Valid text that UTF-16 round-trips: a leading U+FFFE serializes as the
/// opposite-order byte order mark and is read back as one.
fn utf16_text() -> impl Strategy<Value = Vec<CodePoint>> {
    text().prop_filter("leading U+FFFE is taken as a reversed byte order mark", |codepoints| {
        codepoints.first() != Some(&0xFFFE)
    })
}

fn starts_with_mark(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE])
}

fn assert_well_formed(codepoints: &[CodePoint]) -> Result<(), TestCaseError> {
    for &codepoint in codepoints {
        prop_assert!(codepoint <= MAX_CODEPOINT);
        prop_assert!(!is_surrogate(codepoint));
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_utf8_roundtrip(codepoints in text()) {
        let bytes = encode_utf8(&codepoints).unwrap();
        let expected: String = codepoints.iter().filter_map(|&cp| char::from_u32(cp)).collect();
        prop_assert_eq!(&bytes, expected.as_bytes());
        prop_assert_eq!(decode_utf8(&bytes).unwrap(), codepoints);
    }

    #[test]
    fn prop_utf16_roundtrip(codepoints in utf16_text(), order in endianness()) {
        let bytes = encode_utf16(&codepoints, order).unwrap();
        prop_assert_eq!(bytes.len() % 2, 0);
        prop_assert_eq!(decode_utf16(&bytes, order).unwrap(), codepoints);
    }

    #[test]
    fn prop_utf32_roundtrip(codepoints in text(), order in endianness()) {
        let bytes = encode_utf32(&codepoints, order).unwrap();
        prop_assert_eq!(bytes.len(), codepoints.len() * 4);
        prop_assert_eq!(decode_utf32(&bytes, order).unwrap(), codepoints);
    }

    #[test]
    fn prop_transcode_preserves_text(
        codepoints in utf16_text(),
        from_order in endianness(),
        to_order in endianness(),
    ) {
        let from = Encoding::Utf16(from_order);
        let to = Encoding::Utf32(to_order);
        let input = from.encode(&codepoints).unwrap();
        let output = transcode::transcode(&input, from, to).unwrap();
        prop_assert_eq!(to.decode(&output).unwrap(), codepoints);
    }

    #[test]
    fn prop_utf8_accepts_what_std_accepts(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let decoded = decode_utf8(&bytes);
        match std::str::from_utf8(&bytes) {
            Ok(text) => {
                let mut expected: Vec<CodePoint> = text.chars().map(u32::from).collect();
                if expected.first() == Some(&0xFEFF) {
                    expected.remove(0);
                }
                prop_assert_eq!(decoded.unwrap(), expected);
            }
            Err(_) => {
                let is_malformed = matches!(decoded, Err(EncodingError::MalformedSequence { .. }));
                prop_assert!(is_malformed);
            }
        }
    }

    #[test]
    fn prop_utf16_accepts_what_std_accepts(
        units in prop::collection::vec(any::<u16>(), 0..32),
        order in endianness(),
    ) {
        let bytes: Vec<u8> = units
            .iter()
            .flat_map(|&unit| match order {
                Endianness::BigEndian => unit.to_be_bytes(),
                Endianness::LittleEndian => unit.to_le_bytes(),
            })
            .collect();
        prop_assume!(!starts_with_mark(&bytes));

        let decoded = decode_utf16(&bytes, order);
        let expected: Result<Vec<CodePoint>, _> = char::decode_utf16(units.iter().copied())
            .map(|c| c.map(u32::from))
            .collect();
        match expected {
            Ok(expected) => {
                prop_assert_eq!(decoded.unwrap(), expected);
            }
            Err(_) => {
                let is_unpaired = matches!(decoded, Err(EncodingError::InvalidSurrogatePair { .. }));
                prop_assert!(is_unpaired);
            }
        }
    }

    #[test]
    fn prop_decoders_never_yield_surrogates(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        order in endianness(),
    ) {
        if let Ok(codepoints) = decode_utf8(&bytes) {
            assert_well_formed(&codepoints)?;
        }
        if let Ok(codepoints) = decode_utf16(&bytes, order) {
            assert_well_formed(&codepoints)?;
        }
        if let Ok(codepoints) = decode_utf32(&bytes, order) {
            assert_well_formed(&codepoints)?;
        }
    }

    #[test]
    fn prop_misaligned_input_rejected(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        order in endianness(),
    ) {
        if bytes.len() % 2 != 0 {
            prop_assert_eq!(
                decode_utf16(&bytes, order),
                Err(EncodingError::MisalignedInput { length: bytes.len(), unit_width: 2 })
            );
        }
        if bytes.len() % 4 != 0 {
            prop_assert_eq!(
                decode_utf32(&bytes, order),
                Err(EncodingError::MisalignedInput { length: bytes.len(), unit_width: 4 })
            );
        }
    }

    #[test]
    fn prop_encoders_reject_non_scalars(
        prefix in text(),
        bad in prop_oneof![0xD800u32..=0xDFFF, 0x11_0000u32..=u32::MAX],
        order in endianness(),
    ) {
        let mut codepoints = prefix;
        codepoints.push(bad);
        let expected = Err(EncodingError::InvalidCodePoint {
            value: bad,
            position: codepoints.len() - 1,
        });
        prop_assert_eq!(encode_utf8(&codepoints), expected.clone());
        prop_assert_eq!(encode_utf16(&codepoints, order), expected.clone());
        prop_assert_eq!(encode_utf32(&codepoints, order), expected);
    }
}
