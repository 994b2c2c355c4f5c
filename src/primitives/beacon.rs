//! Beacon chain records shared by every fork.
//!
//! The operations carried in a block body (slashings, attestations, deposits
//! and exits) did not change between Altair and Bellatrix, so both block
//! bodies reuse the types in this module.
//!
//! ```text
//! BeaconBlockBody (all forks)
//! ├── randao_reveal: BLSSignature
//! ├── eth1_data: Eth1Data
//! ├── graffiti: B256
//! ├── proposer_slashings: [ProposerSlashing; <=16]
//! ├── attester_slashings: [AttesterSlashing; <=2]
//! ├── attestations: [Attestation; <=128]
//! ├── deposits: [Deposit; <=16]
//! ├── voluntary_exits: [SignedVoluntaryExit; <=16]
//! └── sync_aggregate: SyncAggregate
//! ```

use super::{
    builder::{bitlist, bitvector, bounded_list, fixed_vector},
    BLSPubkey, BLSSignature, DepositProofLength, MaxValidatorsPerCommittee, SyncCommitteeSize,
};
use crate::error::EncodeError;
use alloy_primitives::B256;
use ssz_types::{BitList, BitVector, FixedVector, VariableList};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// ETH1 data vote included in beacon blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct Eth1Data {
    /// Root of the deposit tree.
    pub deposit_root: B256,
    /// Number of deposits.
    pub deposit_count: u64,
    /// Block hash of the ETH1 block.
    pub block_hash: B256,
}

/// FFG checkpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct Checkpoint {
    pub epoch: u64,
    pub root: B256,
}

/// The vote an attestation signs over.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct AttestationData {
    pub slot: u64,
    /// Committee index.
    pub index: u64,
    /// LMD GHOST vote.
    pub beacon_block_root: B256,
    /// FFG vote.
    pub source: Checkpoint,
    pub target: Checkpoint,
}

/// An aggregated attestation.
#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct Attestation {
    pub aggregation_bits: BitList<MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: BLSSignature,
}

impl Attestation {
    /// Build an attestation from the SSZ form of its aggregation bits.
    ///
    /// The bytes must include the bit-list length sentinel.
    pub fn from_parts(
        aggregation_bits: &[u8],
        data: AttestationData,
        signature: BLSSignature,
    ) -> Result<Self, EncodeError> {
        Ok(Self { aggregation_bits: bitlist("aggregation_bits", aggregation_bits)?, data, signature })
    }
}

/// An attestation with the attesting validator indices spelled out.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct IndexedAttestation {
    pub attesting_indices: VariableList<u64, MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: BLSSignature,
}

impl IndexedAttestation {
    /// Build an indexed attestation, checking the committee size bound.
    pub fn from_parts(
        attesting_indices: Vec<u64>,
        data: AttestationData,
        signature: BLSSignature,
    ) -> Result<Self, EncodeError> {
        Ok(Self {
            attesting_indices: bounded_list("attesting_indices", attesting_indices)?,
            data,
            signature,
        })
    }
}

/// Two conflicting attestations from overlapping validator sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

/// Beacon block header.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct BeaconBlockHeader {
    /// Slot number (beacon chain's block height).
    pub slot: u64,
    /// Validator index of the proposer.
    pub proposer_index: u64,
    /// Root hash of the parent beacon block.
    pub parent_root: B256,
    /// Root hash of the beacon state after this block.
    pub state_root: B256,
    /// Root hash of the block body.
    pub body_root: B256,
}

impl BeaconBlockHeader {
    /// Canonical root of this header, which equals the root of the full block it summarizes.
    pub fn block_root(&self) -> B256 {
        self.tree_hash_root()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    pub signature: BLSSignature,
}

/// Two distinct headers signed by the same proposer for the same slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct ProposerSlashing {
    pub signed_header_1: SignedBeaconBlockHeader,
    pub signed_header_2: SignedBeaconBlockHeader,
}

/// Deposit contract log data.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct DepositData {
    pub pubkey: BLSPubkey,
    pub withdrawal_credentials: B256,
    /// Amount in gwei.
    pub amount: u64,
    pub signature: BLSSignature,
}

/// A deposit with its merkle branch against the deposit root.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct Deposit {
    pub proof: FixedVector<B256, DepositProofLength>,
    pub data: DepositData,
}

impl Deposit {
    /// Build a deposit, checking that the proof has exactly 33 branch nodes.
    pub fn from_parts(proof: Vec<B256>, data: DepositData) -> Result<Self, EncodeError> {
        Ok(Self { proof: fixed_vector("proof", proof)?, data })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct VoluntaryExit {
    /// Earliest epoch the exit can be processed.
    pub epoch: u64,
    pub validator_index: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct SignedVoluntaryExit {
    pub message: VoluntaryExit,
    pub signature: BLSSignature,
}

/// Sync committee participation and the aggregate signature.
#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct SyncAggregate {
    pub sync_committee_bits: BitVector<SyncCommitteeSize>,
    pub sync_committee_signature: BLSSignature,
}

impl SyncAggregate {
    /// Build a sync aggregate from the 64 raw bytes of the participation bit-vector.
    pub fn from_parts(
        sync_committee_bits: &[u8],
        sync_committee_signature: BLSSignature,
    ) -> Result<Self, EncodeError> {
        Ok(Self {
            sync_committee_bits: bitvector("sync_committee_bits", sync_committee_bits)?,
            sync_committee_signature,
        })
    }
}

/// Read access to the body fields that are identical across forks.
///
/// The shared part of the block encoder is written against this trait so each
/// fork body only has to encode what it adds.
pub trait BeaconBlockBodyOperations {
    fn randao_reveal(&self) -> &BLSSignature;
    fn eth1_data(&self) -> &Eth1Data;
    fn graffiti(&self) -> &B256;
    fn proposer_slashings(&self) -> &[ProposerSlashing];
    fn attester_slashings(&self) -> &[AttesterSlashing];
    fn attestations(&self) -> &[Attestation];
    fn deposits(&self) -> &[Deposit];
    fn voluntary_exits(&self) -> &[SignedVoluntaryExit];
    fn sync_aggregate(&self) -> &SyncAggregate;
}

/// Implements [`BeaconBlockBodyOperations`] for a body type with the standard field names.
macro_rules! impl_body_operations {
    ($body:ty) => {
        impl $crate::primitives::beacon::BeaconBlockBodyOperations for $body {
            fn randao_reveal(&self) -> &$crate::primitives::BLSSignature {
                &self.randao_reveal
            }
            fn eth1_data(&self) -> &$crate::primitives::Eth1Data {
                &self.eth1_data
            }
            fn graffiti(&self) -> &alloy_primitives::B256 {
                &self.graffiti
            }
            fn proposer_slashings(&self) -> &[$crate::primitives::ProposerSlashing] {
                &self.proposer_slashings
            }
            fn attester_slashings(&self) -> &[$crate::primitives::AttesterSlashing] {
                &self.attester_slashings
            }
            fn attestations(&self) -> &[$crate::primitives::Attestation] {
                &self.attestations
            }
            fn deposits(&self) -> &[$crate::primitives::Deposit] {
                &self.deposits
            }
            fn voluntary_exits(&self) -> &[$crate::primitives::SignedVoluntaryExit] {
                &self.voluntary_exits
            }
            fn sync_aggregate(&self) -> &$crate::primitives::SyncAggregate {
                &self.sync_aggregate
            }
        }
    };
}
pub(crate) use impl_body_operations;

#[cfg(test)]
mod tests {
    use super::*;
    use ssz::Encode;

    #[test]
    fn test_attestation_keeps_bitlist_sentinel() {
        let bits = [0x4a, 0x4a, 0x4a, 0x4a];
        let attestation =
            Attestation::from_parts(&bits, AttestationData::default(), BLSSignature::ZERO).unwrap();

        // 3 full bytes plus bits 0..6 of the last byte, bit 6 being the sentinel.
        assert_eq!(attestation.aggregation_bits.len(), 30);
        assert_eq!(attestation.aggregation_bits.as_ssz_bytes(), bits.to_vec());
    }

    #[test]
    fn test_attestation_rejects_missing_sentinel() {
        let result = Attestation::from_parts(&[0x01, 0x00], AttestationData::default(), BLSSignature::ZERO);
        assert!(matches!(result, Err(EncodeError::InvalidBitfield { ref field, .. }) if field == "aggregation_bits"));
    }

    #[test]
    fn test_deposit_proof_length() {
        let ok = Deposit::from_parts(vec![B256::repeat_byte(1); 33], DepositData::default());
        assert!(ok.is_ok());

        let short = Deposit::from_parts(vec![B256::repeat_byte(1); 32], DepositData::default());
        assert!(matches!(
            short,
            Err(EncodeError::InvalidLength { ref field, expected: 33, actual: 32 }) if field == "proof"
        ));
    }

    #[test]
    fn test_sync_aggregate_requires_full_bitvector() {
        assert!(SyncAggregate::from_parts(&[0xff; 64], BLSSignature::ZERO).is_ok());

        let result = SyncAggregate::from_parts(&[0xff; 63], BLSSignature::ZERO);
        assert!(matches!(result, Err(EncodeError::InvalidBitfield { .. })));
    }

    #[test]
    fn test_indexed_attestation_committee_bound() {
        let too_many = vec![7u64; 2049];
        let result = IndexedAttestation::from_parts(too_many, AttestationData::default(), BLSSignature::ZERO);
        assert!(matches!(result, Err(EncodeError::TooLong { max: 2048, actual: 2049, .. })));
    }

    #[test]
    fn test_header_root_is_tree_hash() {
        let header = BeaconBlockHeader { slot: 9, proposer_index: 3, ..Default::default() };
        assert_eq!(header.block_root(), header.tree_hash_root());
        assert_ne!(header.block_root(), BeaconBlockHeader::default().block_root());
    }
}
