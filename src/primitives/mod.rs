//! Typed beacon block model.
//!
//! These are the in-memory records a signer hands over for proposal. They are
//! laid out exactly like the consensus containers so that the canonical block
//! root can be derived with [`tree_hash`].
//!
//! # Modules
//!
//! - [`beacon`]: records shared by every fork (slashings, attestations, deposits, ...)
//! - [`altair`]: Altair block and body
//! - [`bellatrix`]: Bellatrix block, body and execution payload
//! - [`block`]: the fork-tagged [`SignedBeaconBlock`]
//! - [`builder`]: staged construction from raw signer bytes
//!
//! # Block Structure (Bellatrix)
//!
//! ```text
//! SignedBeaconBlock::Bellatrix
//! ├── message: BeaconBlockBellatrix
//! │   ├── slot / proposer_index: u64
//! │   ├── parent_root / state_root: B256
//! │   └── body: BeaconBlockBodyBellatrix
//! │       ├── randao_reveal, eth1_data, graffiti
//! │       ├── proposer_slashings .. voluntary_exits (bounded lists)
//! │       ├── sync_aggregate
//! │       └── execution_payload: ExecutionPayload
//! │           └── transactions: list of opaque byte blobs
//! └── signature: BLSSignature
//! ```

pub mod altair;
pub mod beacon;
pub mod bellatrix;
pub mod block;
pub mod builder;

use alloy_primitives::FixedBytes;
use serde::{Deserialize, Serialize};
use ssz_types::typenum;

pub use altair::{BeaconBlockAltair, BeaconBlockBodyAltair, SignedBeaconBlockAltair};
pub use beacon::{
    Attestation, AttestationData, AttesterSlashing, BeaconBlockBodyOperations,
    BeaconBlockHeader, Checkpoint, Deposit, DepositData, Eth1Data, IndexedAttestation,
    ProposerSlashing, SignedBeaconBlockHeader, SignedVoluntaryExit, SyncAggregate,
    VoluntaryExit,
};
pub use bellatrix::{
    BeaconBlockBellatrix, BeaconBlockBodyBellatrix, ExecutionPayload, SignedBeaconBlockBellatrix,
};
pub use block::SignedBeaconBlock;
pub use builder::{
    BeaconBlockBellatrixBuilder, BeaconBlockBodyBellatrixBuilder, ExecutionPayloadBuilder,
};

/// BLS public key bytes.
pub type BLSPubkey = FixedBytes<48>;
/// BLS signature bytes.
pub type BLSSignature = FixedBytes<96>;
/// Execution layer logs bloom.
pub type LogsBloom = FixedBytes<256>;

// Mainnet preset bounds.
pub type MaxProposerSlashings = typenum::U16;
pub type MaxAttesterSlashings = typenum::U2;
pub type MaxAttestations = typenum::U128;
pub type MaxDeposits = typenum::U16;
pub type MaxVoluntaryExits = typenum::U16;
pub type MaxValidatorsPerCommittee = typenum::U2048;
pub type SyncCommitteeSize = typenum::U512;
/// `DEPOSIT_CONTRACT_TREE_DEPTH + 1`
pub type DepositProofLength = typenum::U33;
pub type MaxExtraDataBytes = typenum::U32;
pub type MaxTransactionsPerPayload = typenum::U1048576;
pub type MaxBytesPerTransaction = typenum::U1073741824;

/// A named protocol-version boundary after which block structure changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForkName {
    /// Adds the sync aggregate to the block body.
    Altair,
    /// Adds the execution payload to the block body.
    Bellatrix,
}

impl ForkName {
    /// The lower-case name beacon nodes expect in the consensus version header.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Altair => "altair",
            Self::Bellatrix => "bellatrix",
        }
    }
}

impl std::fmt::Display for ForkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fork_name_header_value() {
        assert_eq!(ForkName::Bellatrix.as_str(), "bellatrix");
        assert_eq!(ForkName::Altair.to_string(), "altair");
        assert_eq!(serde_json::to_string(&ForkName::Bellatrix).unwrap(), "\"bellatrix\"");
    }
}
