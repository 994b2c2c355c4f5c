//! Beacon-API JSON shapes for signed block submission.
//!
//! Every scalar is a string: byte fields as `0x`-prefixed lower-case hex,
//! integers in decimal. Struct field order is the order the beacon API
//! documents, and is the order `serde_json` writes them in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eth1DataJson {
    pub deposit_root: String,
    pub deposit_count: String,
    pub block_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockHeaderJson {
    pub slot: String,
    pub proposer_index: String,
    pub parent_root: String,
    pub state_root: String,
    pub body_root: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBeaconBlockHeaderJson {
    pub message: BeaconBlockHeaderJson,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposerSlashingJson {
    pub signed_header_1: SignedBeaconBlockHeaderJson,
    pub signed_header_2: SignedBeaconBlockHeaderJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointJson {
    pub epoch: String,
    pub root: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationDataJson {
    pub slot: String,
    pub index: String,
    pub beacon_block_root: String,
    pub source: CheckpointJson,
    pub target: CheckpointJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedAttestationJson {
    pub attesting_indices: Vec<String>,
    pub data: AttestationDataJson,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttesterSlashingJson {
    pub attestation_1: IndexedAttestationJson,
    pub attestation_2: IndexedAttestationJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationJson {
    /// SSZ bytes of the bit-list, length sentinel included.
    pub aggregation_bits: String,
    pub data: AttestationDataJson,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositDataJson {
    pub pubkey: String,
    pub withdrawal_credentials: String,
    pub amount: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositJson {
    pub proof: Vec<String>,
    pub data: DepositDataJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoluntaryExitJson {
    pub epoch: String,
    pub validator_index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedVoluntaryExitJson {
    pub message: VoluntaryExitJson,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAggregateJson {
    pub sync_committee_bits: String,
    pub sync_committee_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPayloadJson {
    pub parent_hash: String,
    pub fee_recipient: String,
    pub state_root: String,
    pub receipts_root: String,
    pub logs_bloom: String,
    pub prev_randao: String,
    pub block_number: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub timestamp: String,
    pub extra_data: String,
    /// Decimal uint256.
    pub base_fee_per_gas: String,
    pub block_hash: String,
    pub transactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockBodyBellatrixJson {
    pub randao_reveal: String,
    pub eth1_data: Eth1DataJson,
    pub graffiti: String,
    pub proposer_slashings: Vec<ProposerSlashingJson>,
    pub attester_slashings: Vec<AttesterSlashingJson>,
    pub attestations: Vec<AttestationJson>,
    pub deposits: Vec<DepositJson>,
    pub voluntary_exits: Vec<SignedVoluntaryExitJson>,
    pub sync_aggregate: SyncAggregateJson,
    pub execution_payload: ExecutionPayloadJson,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockBellatrixJson {
    pub slot: String,
    pub proposer_index: String,
    pub parent_root: String,
    pub state_root: String,
    pub body: BeaconBlockBodyBellatrixJson,
}

/// Request body of `POST /eth/v1/beacon/blocks` for a Bellatrix block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBeaconBlockBellatrixJson {
    pub message: BeaconBlockBellatrixJson,
    pub signature: String,
}
