//! Interpretation of the beacon node's success response.
//!
//! ```text
//! Pending ──parse──► Parsed ──(block given)──► Verified ──► Returned
//!    │                  │                        │
//!    │                  │ (no block) ─► Unchecked┘
//!    └─► Parse error    └─► RootMismatch
//! ```

use crate::primitives::SignedBeaconBlock;
use alloy_primitives::B256;
use serde::Deserialize;
use tracing::{debug, warn};

/// Errors in an otherwise successful (2xx) response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The body is not JSON, lacks `data.root`, or the root is not 32 bytes of hex.
    #[error("invalid proposal response: {0}")]
    Parse(String),
    /// The beacon node reports a different root than the one computed locally.
    #[error("block root mismatch: local {local}, remote {remote}")]
    RootMismatch {
        /// Root computed from the submitted block.
        local: B256,
        /// Root returned by the beacon node.
        remote: B256,
    },
}

/// Whether the returned root was checked against the submitted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootVerification {
    /// The remote root equals the locally computed root.
    Verified,
    /// No block was available to compare against.
    Unchecked,
}

/// Outcome of a successful proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalResult {
    /// Root of the proposed block as reported by the beacon node.
    pub block_root: B256,
    pub verification: RootVerification,
}

impl ProposalResult {
    pub const fn is_verified(&self) -> bool {
        matches!(self.verification, RootVerification::Verified)
    }
}

#[derive(Debug, Deserialize)]
struct BlockRootResponse {
    data: BlockRootData,
}

#[derive(Debug, Deserialize)]
struct BlockRootData {
    root: B256,
}

/// Parses success bodies and checks the reported root.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub const fn new() -> Self {
        Self
    }

    /// Extract the block root from a success body without verifying it.
    ///
    /// Unknown fields next to `data.root` are ignored.
    pub fn parse_result(&self, body: &[u8]) -> Result<ProposalResult, ResponseError> {
        let response: BlockRootResponse =
            serde_json::from_slice(body).map_err(|e| ResponseError::Parse(e.to_string()))?;
        Ok(ProposalResult { block_root: response.data.root, verification: RootVerification::Unchecked })
    }

    /// Parse a success body and, when the submitted block is given, require the
    /// reported root to equal its locally computed root.
    pub fn validate(
        &self,
        body: &[u8],
        expected: Option<&SignedBeaconBlock>,
    ) -> Result<ProposalResult, ResponseError> {
        let mut result = self.parse_result(body)?;
        let Some(block) = expected else {
            debug!(target: "beacon_api::response", root = %result.block_root, "block root not verified");
            return Ok(result);
        };

        let local = block.block_root();
        if local != result.block_root {
            warn!(
                target: "beacon_api::response",
                slot = block.slot(),
                %local,
                remote = %result.block_root,
                "beacon node reported a different block root"
            );
            return Err(ResponseError::RootMismatch { local, remote: result.block_root });
        }

        result.verification = RootVerification::Verified;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{generate_signed_block, success_body};

    #[test]
    fn test_parse_root() {
        let root = B256::repeat_byte(0xab);
        let result = ResponseValidator::new().parse_result(&success_body(root)).unwrap();
        assert_eq!(result, ProposalResult { block_root: root, verification: RootVerification::Unchecked });
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let body = format!(
            r#"{{"version":"bellatrix","data":{{"root":"0x{}","extra":1}},"execution_optimistic":false}}"#,
            "11".repeat(32)
        );
        let result = ResponseValidator::new().parse_result(body.as_bytes()).unwrap();
        assert_eq!(result.block_root, B256::repeat_byte(0x11));
    }

    #[test]
    fn test_malformed_bodies() {
        let validator = ResponseValidator::new();
        let short_root = format!(r#"{{"data":{{"root":"0x{}"}}}}"#, "11".repeat(31));
        let cases: [&[u8]; 5] = [
            b"",
            b"not json",
            br#"{"data":{}}"#,
            br#"{"root":"0x00"}"#,
            short_root.as_bytes(),
        ];

        for body in cases {
            assert!(matches!(validator.parse_result(body), Err(ResponseError::Parse(_))));
        }
    }

    #[test]
    fn test_validate_matching_root() {
        let block = generate_signed_block();
        let result = ResponseValidator::new().validate(&success_body(block.block_root()), Some(&block)).unwrap();

        assert!(result.is_verified());
        assert_eq!(result.block_root, block.block_root());
    }

    #[test]
    fn test_validate_mismatched_root() {
        let block = generate_signed_block();
        let remote = B256::repeat_byte(0x01);

        let err = ResponseValidator::new().validate(&success_body(remote), Some(&block)).unwrap_err();
        assert_eq!(err, ResponseError::RootMismatch { local: block.block_root(), remote });
    }

    #[test]
    fn test_validate_without_block_is_unchecked() {
        let remote = B256::repeat_byte(0x01);
        let result = ResponseValidator::new().validate(&success_body(remote), None).unwrap();
        assert_eq!(result.verification, RootVerification::Unchecked);
    }
}
