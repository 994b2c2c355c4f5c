//! Encoders for the body fields every fork shares.

use super::{
    fields::{hex_bytes, uint64},
    json::{
        AttestationDataJson, AttestationJson, AttesterSlashingJson, BeaconBlockHeaderJson,
        CheckpointJson, DepositDataJson, DepositJson, Eth1DataJson, IndexedAttestationJson,
        ProposerSlashingJson, SignedBeaconBlockHeaderJson, SignedVoluntaryExitJson,
        SyncAggregateJson, VoluntaryExitJson,
    },
};
use crate::primitives::{
    Attestation, AttestationData, AttesterSlashing, BeaconBlockBodyOperations, BeaconBlockHeader,
    Checkpoint, Deposit, DepositData, Eth1Data, IndexedAttestation, ProposerSlashing,
    SignedBeaconBlockHeader, SignedVoluntaryExit, SyncAggregate, VoluntaryExit,
};
use ssz::Encode;

/// The fork-stable part of an encoded block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommonBodyJson {
    pub randao_reveal: String,
    pub eth1_data: Eth1DataJson,
    pub graffiti: String,
    pub proposer_slashings: Vec<ProposerSlashingJson>,
    pub attester_slashings: Vec<AttesterSlashingJson>,
    pub attestations: Vec<AttestationJson>,
    pub deposits: Vec<DepositJson>,
    pub voluntary_exits: Vec<SignedVoluntaryExitJson>,
    pub sync_aggregate: SyncAggregateJson,
}

/// Encode the body fields shared by every fork, preserving list order.
pub(crate) fn encode_common_body<B: BeaconBlockBodyOperations + ?Sized>(body: &B) -> CommonBodyJson {
    CommonBodyJson {
        randao_reveal: hex_bytes(body.randao_reveal()),
        eth1_data: body.eth1_data().into(),
        graffiti: hex_bytes(body.graffiti()),
        proposer_slashings: body.proposer_slashings().iter().map(Into::into).collect(),
        attester_slashings: body.attester_slashings().iter().map(Into::into).collect(),
        attestations: body.attestations().iter().map(Into::into).collect(),
        deposits: body.deposits().iter().map(Into::into).collect(),
        voluntary_exits: body.voluntary_exits().iter().map(Into::into).collect(),
        sync_aggregate: body.sync_aggregate().into(),
    }
}

impl From<&Eth1Data> for Eth1DataJson {
    fn from(data: &Eth1Data) -> Self {
        Self {
            deposit_root: hex_bytes(data.deposit_root),
            deposit_count: uint64(data.deposit_count),
            block_hash: hex_bytes(data.block_hash),
        }
    }
}

impl From<&BeaconBlockHeader> for BeaconBlockHeaderJson {
    fn from(header: &BeaconBlockHeader) -> Self {
        Self {
            slot: uint64(header.slot),
            proposer_index: uint64(header.proposer_index),
            parent_root: hex_bytes(header.parent_root),
            state_root: hex_bytes(header.state_root),
            body_root: hex_bytes(header.body_root),
        }
    }
}

impl From<&SignedBeaconBlockHeader> for SignedBeaconBlockHeaderJson {
    fn from(header: &SignedBeaconBlockHeader) -> Self {
        Self { message: (&header.message).into(), signature: hex_bytes(header.signature) }
    }
}

impl From<&ProposerSlashing> for ProposerSlashingJson {
    fn from(slashing: &ProposerSlashing) -> Self {
        Self {
            signed_header_1: (&slashing.signed_header_1).into(),
            signed_header_2: (&slashing.signed_header_2).into(),
        }
    }
}

impl From<&Checkpoint> for CheckpointJson {
    fn from(checkpoint: &Checkpoint) -> Self {
        Self { epoch: uint64(checkpoint.epoch), root: hex_bytes(checkpoint.root) }
    }
}

impl From<&AttestationData> for AttestationDataJson {
    fn from(data: &AttestationData) -> Self {
        Self {
            slot: uint64(data.slot),
            index: uint64(data.index),
            beacon_block_root: hex_bytes(data.beacon_block_root),
            source: (&data.source).into(),
            target: (&data.target).into(),
        }
    }
}

impl From<&IndexedAttestation> for IndexedAttestationJson {
    fn from(attestation: &IndexedAttestation) -> Self {
        Self {
            attesting_indices: attestation.attesting_indices.iter().copied().map(uint64).collect(),
            data: (&attestation.data).into(),
            signature: hex_bytes(attestation.signature),
        }
    }
}

impl From<&AttesterSlashing> for AttesterSlashingJson {
    fn from(slashing: &AttesterSlashing) -> Self {
        Self {
            attestation_1: (&slashing.attestation_1).into(),
            attestation_2: (&slashing.attestation_2).into(),
        }
    }
}

impl From<&Attestation> for AttestationJson {
    fn from(attestation: &Attestation) -> Self {
        Self {
            aggregation_bits: hex_bytes(attestation.aggregation_bits.as_ssz_bytes()),
            data: (&attestation.data).into(),
            signature: hex_bytes(attestation.signature),
        }
    }
}

impl From<&DepositData> for DepositDataJson {
    fn from(data: &DepositData) -> Self {
        Self {
            pubkey: hex_bytes(data.pubkey),
            withdrawal_credentials: hex_bytes(data.withdrawal_credentials),
            amount: uint64(data.amount),
            signature: hex_bytes(data.signature),
        }
    }
}

impl From<&Deposit> for DepositJson {
    fn from(deposit: &Deposit) -> Self {
        Self { proof: deposit.proof.iter().map(hex_bytes).collect(), data: (&deposit.data).into() }
    }
}

impl From<&VoluntaryExit> for VoluntaryExitJson {
    fn from(exit: &VoluntaryExit) -> Self {
        Self { epoch: uint64(exit.epoch), validator_index: uint64(exit.validator_index) }
    }
}

impl From<&SignedVoluntaryExit> for SignedVoluntaryExitJson {
    fn from(exit: &SignedVoluntaryExit) -> Self {
        Self { message: (&exit.message).into(), signature: hex_bytes(exit.signature) }
    }
}

impl From<&SyncAggregate> for SyncAggregateJson {
    fn from(aggregate: &SyncAggregate) -> Self {
        Self {
            sync_committee_bits: hex_bytes(aggregate.sync_committee_bits.as_ssz_bytes()),
            sync_committee_signature: hex_bytes(aggregate.sync_committee_signature),
        }
    }
}
