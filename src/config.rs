//! Proposer configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default block submission endpoint.
pub const DEFAULT_BLOCKS_ENDPOINT: &str = "/eth/v1/beacon/blocks";

/// Default header announcing the block's fork.
pub const DEFAULT_CONSENSUS_VERSION_HEADER: &str = "Eth-Consensus-Version";

/// Default bound on a single submission (one mainnet slot).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

/// Block proposer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposerConfig {
    /// Path blocks are POSTed to.
    pub endpoint: String,

    /// Name of the header carrying the lower-case fork name.
    pub consensus_version_header: String,

    /// Compare the root reported by the beacon node with the locally computed one.
    pub verify_block_root: bool,

    /// Upper bound on one submission, applied on top of the context deadline.
    /// `None` leaves only the context deadline. Written as a human-readable
    /// duration such as `"12s"` or `"500ms"`.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

impl ProposerConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submission endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the consensus version header name.
    pub fn with_consensus_version_header(mut self, header: impl Into<String>) -> Self {
        self.consensus_version_header = header.into();
        self
    }

    /// Enable or disable block root verification.
    pub fn with_verify_block_root(mut self, verify: bool) -> Self {
        self.verify_block_root = verify;
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ProposerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_BLOCKS_ENDPOINT.to_string(),
            consensus_version_header: DEFAULT_CONSENSUS_VERSION_HEADER.to_string(),
            verify_block_root: true,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProposerConfig::default();

        assert_eq!(config.endpoint, "/eth/v1/beacon/blocks");
        assert_eq!(config.consensus_version_header, "Eth-Consensus-Version");
        assert!(config.verify_block_root);
        assert_eq!(config.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
    }

    #[test]
    fn test_config_builder() {
        let config = ProposerConfig::new()
            .with_endpoint("/eth/v2/beacon/blocks")
            .with_verify_block_root(false)
            .with_request_timeout(None);

        assert_eq!(config.endpoint, "/eth/v2/beacon/blocks");
        assert!(!config.verify_block_root);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ProposerConfig = serde_json::from_str(r#"{"verify_block_root":false}"#).unwrap();

        assert!(!config.verify_block_root);
        assert_eq!(config.endpoint, DEFAULT_BLOCKS_ENDPOINT);
        assert_eq!(config.request_timeout, Some(DEFAULT_REQUEST_TIMEOUT));
    }

    #[test]
    fn test_human_readable_timeout() {
        let config: ProposerConfig = serde_json::from_str(r#"{"request_timeout":"12s"}"#).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(12)));

        let config: ProposerConfig = serde_json::from_str(r#"{"request_timeout":"1500ms"}"#).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));

        let config: ProposerConfig = serde_json::from_str(r#"{"request_timeout":null}"#).unwrap();
        assert_eq!(config.request_timeout, None);

        let json = serde_json::to_value(ProposerConfig::default()).unwrap();
        assert_eq!(json["request_timeout"], "12s");

        assert!(serde_json::from_str::<ProposerConfig>(r#"{"request_timeout":"soon"}"#).is_err());
    }
}
