//! Bellatrix (merge) beacon blocks.
//!
//! Bellatrix adds the execution payload, the execution layer block carried
//! inside the consensus block body.

use super::{
    beacon::impl_body_operations, AttesterSlashing, Attestation, BLSSignature, Deposit, Eth1Data,
    LogsBloom, MaxAttestations, MaxAttesterSlashings, MaxBytesPerTransaction, MaxDeposits,
    MaxExtraDataBytes, MaxProposerSlashings, MaxTransactionsPerPayload, MaxVoluntaryExits,
    ProposerSlashing, SignedVoluntaryExit, SyncAggregate,
};
use alloy_primitives::{Address, B256, U256};
use ssz_types::VariableList;
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

/// An opaque, RLP-encoded execution layer transaction.
pub type Transaction = VariableList<u8, MaxBytesPerTransaction>;

/// Execution layer block as embedded in a Bellatrix body.
#[derive(Clone, Debug, Default, PartialEq, Eq, TreeHash)]
pub struct ExecutionPayload {
    pub parent_hash: B256,
    pub fee_recipient: Address,
    pub state_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: LogsBloom,
    pub prev_randao: B256,
    pub block_number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    pub extra_data: VariableList<u8, MaxExtraDataBytes>,
    /// Base fee as a uint256 in little-endian byte order.
    ///
    /// Kept as raw bytes, which is also the SSZ packing of a uint256, so the
    /// tree hash of this field matches the consensus container.
    pub base_fee_per_gas: B256,
    pub block_hash: B256,
    pub transactions: VariableList<Transaction, MaxTransactionsPerPayload>,
}

impl ExecutionPayload {
    /// The base fee as an integer.
    pub fn base_fee_per_gas(&self) -> U256 {
        U256::from_le_bytes(self.base_fee_per_gas.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct BeaconBlockBodyBellatrix {
    pub randao_reveal: BLSSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: B256,
    pub proposer_slashings: VariableList<ProposerSlashing, MaxProposerSlashings>,
    pub attester_slashings: VariableList<AttesterSlashing, MaxAttesterSlashings>,
    pub attestations: VariableList<Attestation, MaxAttestations>,
    pub deposits: VariableList<Deposit, MaxDeposits>,
    pub voluntary_exits: VariableList<SignedVoluntaryExit, MaxVoluntaryExits>,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: ExecutionPayload,
}

impl_body_operations!(BeaconBlockBodyBellatrix);

#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct BeaconBlockBellatrix {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: B256,
    pub state_root: B256,
    pub body: BeaconBlockBodyBellatrix,
}

impl BeaconBlockBellatrix {
    /// Canonical root of the unsigned block.
    pub fn block_root(&self) -> B256 {
        self.tree_hash_root()
    }

    /// The header summarizing this block.
    pub fn header(&self) -> super::BeaconBlockHeader {
        super::BeaconBlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body_root: self.body.tree_hash_root(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedBeaconBlockBellatrix {
    pub message: BeaconBlockBellatrix,
    pub signature: BLSSignature,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::generate_bellatrix_block;

    #[test]
    fn test_header_root_matches_block_root() {
        let block = generate_bellatrix_block().message;
        assert_eq!(block.header().block_root(), block.block_root());
    }

    #[test]
    fn test_block_root_changes_with_payload() {
        let block = generate_bellatrix_block().message;
        let mut other = block.clone();
        other.body.execution_payload.gas_used += 1;

        assert_ne!(block.block_root(), other.block_root());
    }

    #[test]
    fn test_base_fee_is_little_endian() {
        let mut payload = ExecutionPayload::default();
        payload.base_fee_per_gas.0[0] = 0x01;
        payload.base_fee_per_gas.0[1] = 0x02;

        assert_eq!(payload.base_fee_per_gas(), U256::from(0x0201u64));
    }

    #[test]
    fn test_base_fee_root_matches_uint256() {
        let mut payload = ExecutionPayload::default();
        payload.base_fee_per_gas.0[0] = 0x2a;
        assert_eq!(payload.base_fee_per_gas.tree_hash_root(), payload.base_fee_per_gas().tree_hash_root());
    }
}
