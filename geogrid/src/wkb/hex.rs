//! Hex text encoding of WKB byte strings.

use crate::error::{ConvertError, Result};

/// Decodes hex text, ignoring case, surrounding whitespace and a `0x` prefix.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ConvertError::MalformedWkb("empty input".to_string()));
    }

    ::hex::decode(digits).map_err(|e| ConvertError::MalformedWkb(format!("bad hex: {}", e)))
}

/// Encodes bytes as upper-case hex, the PostGIS convention.
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode_upper(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_mixed_case() {
        assert_eq!(decode("00ff").unwrap(), vec![0x00, 0xFF]);
        assert_eq!(decode("00FF").unwrap(), vec![0x00, 0xFF]);
        assert_eq!(decode("0x0aB1").unwrap(), vec![0x0A, 0xB1]);
        assert_eq!(decode(" 0X10 \n").unwrap(), vec![0x10]);
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(decode("").is_err());
        assert!(decode("0x").is_err());
        assert!(decode("ABC").is_err());
        assert!(decode("0G").is_err());
        assert!(decode("12 34").is_err());
        let err = decode("zz").unwrap_err();
        assert_eq!(err.kind(), "MalformedWkb");
        assert!(err.to_string().contains("bad hex"), "{err}");
        let err = decode("0x123").unwrap_err();
        assert_eq!(err.kind(), "MalformedWkb");
    }

    #[test]
    fn test_encode_upper_case() {
        assert_eq!(encode(&[0x01, 0xAB, 0xFF, 0x00]), "01ABFF00");
        assert_eq!(encode(&[]), "");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_hex_restores_bytes(bytes in prop::collection::vec(any::<u8>(), 1..64)) {
                prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes.clone());
                prop_assert_eq!(decode(&encode(&bytes).to_lowercase()).unwrap(), bytes);
            }
        }
    }
}
