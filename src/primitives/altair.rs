//! Altair beacon blocks.
//!
//! Altair blocks are modelled so that proposals from before the merge can be
//! recognised and rejected by fork, rather than misread as Bellatrix blocks.

use super::{
    beacon::impl_body_operations, AttesterSlashing, Attestation, BLSSignature, Deposit, Eth1Data,
    MaxAttestations, MaxAttesterSlashings, MaxDeposits, MaxProposerSlashings, MaxVoluntaryExits,
    ProposerSlashing, SignedVoluntaryExit, SyncAggregate,
};
use alloy_primitives::B256;
use ssz_types::VariableList;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct BeaconBlockBodyAltair {
    pub randao_reveal: BLSSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: B256,
    pub proposer_slashings: VariableList<ProposerSlashing, MaxProposerSlashings>,
    pub attester_slashings: VariableList<AttesterSlashing, MaxAttesterSlashings>,
    pub attestations: VariableList<Attestation, MaxAttestations>,
    pub deposits: VariableList<Deposit, MaxDeposits>,
    pub voluntary_exits: VariableList<SignedVoluntaryExit, MaxVoluntaryExits>,
    pub sync_aggregate: SyncAggregate,
}

impl_body_operations!(BeaconBlockBodyAltair);

#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct BeaconBlockAltair {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: B256,
    pub state_root: B256,
    pub body: BeaconBlockBodyAltair,
}

impl BeaconBlockAltair {
    /// Canonical root of the unsigned block.
    pub fn block_root(&self) -> B256 {
        self.tree_hash_root()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedBeaconBlockAltair {
    pub message: BeaconBlockAltair,
    pub signature: BLSSignature,
}
