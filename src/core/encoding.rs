//! Display encodings for tag identifiers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Re-encodes a hex byte string as standard (padded) base64.
///
/// Anything that is not an even-length run of hex digits yields `""`:
/// nonstandard tags report odd identifiers and the screen must keep rendering.
pub fn hex_to_base64(hex: &str) -> String {
    match hex::decode(hex) {
        Ok(bytes) => STANDARD.encode(bytes),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_values() {
        assert_eq!(hex_to_base64("04a2"), "BKI=");
        assert_eq!(hex_to_base64("04a224b2c85e80"), "BKIksshegA==");
        assert_eq!(hex_to_base64("ff"), "/w==");
    }

    #[test]
    fn test_uppercase_digits_accepted() {
        assert_eq!(hex_to_base64("04A2"), hex_to_base64("04a2"));
    }

    #[test]
    fn test_malformed_input_is_empty() {
        assert_eq!(hex_to_base64(""), "");
        assert_eq!(hex_to_base64("abc"), "");
        assert_eq!(hex_to_base64("zz"), "");
        assert_eq!(hex_to_base64("04:a2"), "");
        assert_eq!(hex_to_base64(" 04a2"), "");
    }

    proptest! {
        #[test]
        fn prop_decodes_back_to_source_bytes(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
            let hex = hex::encode(&bytes);
            let encoded = hex_to_base64(&hex);
            prop_assert_eq!(STANDARD.decode(&encoded).unwrap(), bytes);
            prop_assert_eq!(hex_to_base64(&hex), encoded);
        }

        #[test]
        fn prop_odd_length_never_encodes(s in "[0-9a-f]{0,31}") {
            prop_assume!(s.len() % 2 == 1);
            prop_assert_eq!(hex_to_base64(&s), "");
        }
    }
}
