//! Block encoder: typed signed blocks to beacon-API wire documents.
//!
//! Encoding dispatches on the block's fork. The body fields that did not
//! change between forks are encoded once in [`common`]; each fork encoder adds
//! what is specific to it.
//!
//! ```text
//! SignedBeaconBlock ──encode()──► WireDocument ──to_json_bytes()──► POST body
//!        │                             │
//!        ├─ Bellatrix ─► bellatrix ────┘ (common body + execution payload)
//!        └─ Altair ────► UnsupportedFork
//! ```
//!
//! Encoding is pure: the same block always yields the same document.

pub mod bellatrix;
mod common;
pub mod fields;
pub mod json;

pub use bellatrix::encode_bellatrix;
pub use json::SignedBeaconBlockBellatrixJson;

use crate::{
    error::EncodeError,
    primitives::{ForkName, SignedBeaconBlock},
};
use serde::Serialize;

/// An encoded block, tagged with the fork it was encoded for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WireDocument {
    Bellatrix(SignedBeaconBlockBellatrixJson),
}

impl WireDocument {
    /// The fork announced in the consensus version header.
    pub const fn fork_name(&self) -> ForkName {
        match self {
            Self::Bellatrix(_) => ForkName::Bellatrix,
        }
    }

    /// Serialize to the exact bytes sent as the request body.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Encode a signed block into its wire document.
pub fn encode(block: &SignedBeaconBlock) -> Result<WireDocument, EncodeError> {
    match block {
        SignedBeaconBlock::Bellatrix(block) => Ok(WireDocument::Bellatrix(encode_bellatrix(block))),
        other => Err(EncodeError::UnsupportedFork(other.fork_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        body_builder, expected_bellatrix_document, expected_bellatrix_json, generate_altair_block,
        generate_signed_block,
    };
    use crate::primitives::BeaconBlockBellatrixBuilder;

    #[test]
    fn test_encode_bellatrix_document() {
        let document = encode(&generate_signed_block()).unwrap();
        assert_eq!(document.fork_name(), ForkName::Bellatrix);

        let value: serde_json::Value = serde_json::from_slice(&document.to_json_bytes().unwrap()).unwrap();
        assert_eq!(value, expected_bellatrix_document());
    }

    #[test]
    fn test_encode_is_deterministic() {
        let block = generate_signed_block();
        let a = encode(&block).unwrap().to_json_bytes().unwrap();
        let b = encode(&block).unwrap().to_json_bytes().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_field_order_follows_schema() {
        let bytes = encode(&generate_signed_block()).unwrap().to_json_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, expected_bellatrix_json());
    }

    #[test]
    fn test_canonical_text_matches_document() {
        let parsed: serde_json::Value = serde_json::from_str(&expected_bellatrix_json()).unwrap();
        assert_eq!(parsed, expected_bellatrix_document());
    }

    #[test]
    fn test_empty_lists_are_arrays() {
        let message = BeaconBlockBellatrixBuilder::new()
            .with_parent_root(vec![0; 32])
            .with_state_root(vec![0; 32])
            .with_body(
                body_builder()
                    .with_proposer_slashings(Vec::new())
                    .with_attester_slashings(Vec::new())
                    .with_attestations(Vec::new())
                    .with_deposits(Vec::new())
                    .with_voluntary_exits(Vec::new()),
            )
            .build()
            .unwrap();
        let block = SignedBeaconBlock::bellatrix(message, &[0u8; 96]).unwrap();

        let text = String::from_utf8(encode(&block).unwrap().to_json_bytes().unwrap()).unwrap();
        for field in ["proposer_slashings", "attester_slashings", "attestations", "deposits", "voluntary_exits", "transactions"] {
            assert!(text.contains(&format!(r#""{field}":[]"#)), "{field} not encoded as []");
        }
        assert!(!text.contains("null"));
    }

    #[test]
    fn test_altair_is_unsupported() {
        let block = SignedBeaconBlock::from(generate_altair_block());
        assert_eq!(encode(&block), Err(EncodeError::UnsupportedFork(ForkName::Altair)));
    }
}
