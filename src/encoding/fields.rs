//! Scalar renderings shared by all wire encoders.

use alloy_primitives::{hex, B256, U256};

/// `0x`-prefixed lower-case hex of exactly the given bytes.
pub fn hex_bytes(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}

/// Decimal rendering of a `u64`.
pub fn uint64(value: u64) -> String {
    value.to_string()
}

/// Decimal rendering of a uint256 stored as 32 little-endian bytes.
pub fn uint256_le(bytes: &B256) -> String {
    U256::from_le_bytes(bytes.0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn le_with(set: &[(usize, u8)]) -> B256 {
        let mut bytes = B256::ZERO;
        for (i, b) in set {
            bytes.0[*i] = *b;
        }
        bytes
    }

    #[test]
    fn test_uint256_zero() {
        assert_eq!(uint256_le(&B256::ZERO), "0");
    }

    #[test]
    fn test_uint256_max() {
        assert_eq!(
            uint256_le(&B256::repeat_byte(0xff)),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_uint256_is_little_endian() {
        assert_eq!(uint256_le(&le_with(&[(0, 0x2a)])), "42");
        assert_eq!(uint256_le(&le_with(&[(31, 0x01)])), (U256::from(1u64) << 248usize).to_string());
    }

    #[test]
    fn test_uint256_spans_limbs() {
        // 2^64 + 1
        assert_eq!(uint256_le(&le_with(&[(0, 1), (8, 1)])), "18446744073709551617");
        // 2^128
        assert_eq!(uint256_le(&le_with(&[(16, 1)])), "340282366920938463463374607431768211456");
        // 2^192 + 2^64
        assert_eq!(
            uint256_le(&le_with(&[(8, 1), (24, 1)])),
            "6277101735386680763835789423207666416120802188537744064512"
        );
    }

    #[test]
    fn test_hex_keeps_width() {
        assert_eq!(hex_bytes([0u8; 4]), "0x00000000");
        assert_eq!(hex_bytes([0u8; 0]), "0x");
        assert_eq!(hex_bytes([0xABu8, 0x01]), "0xab01");
    }

    proptest! {
        #[test]
        fn proptest_hex_decodes_to_source(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
            let encoded = hex_bytes(&bytes);
            prop_assert!(encoded.starts_with("0x"));
            prop_assert_eq!(hex::decode(&encoded).unwrap(), bytes);
        }

        #[test]
        fn proptest_uint64_parses_back(value in any::<u64>()) {
            prop_assert_eq!(uint64(value).parse::<u64>().unwrap(), value);
        }

        #[test]
        fn proptest_uint256_parses_back(bytes in any::<[u8; 32]>()) {
            let rendered = uint256_le(&B256::from(bytes));
            prop_assert_eq!(rendered.parse::<U256>().unwrap(), U256::from_le_bytes(bytes));
            prop_assert!(rendered == "0" || !rendered.starts_with('0'));
        }
    }
}
