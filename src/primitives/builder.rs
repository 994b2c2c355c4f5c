//! Staged construction of Bellatrix blocks from raw signer bytes.
//!
//! Signers hand over byte buffers, not typed values. The builders in this
//! module validate every buffer against its fixed width or bound, one nesting
//! level at a time, so a bad input is reported with the path of the record it
//! belongs to:
//!
//! ```text
//! BeaconBlockBellatrixBuilder          -> "parent_root", "state_root"
//! └── BeaconBlockBodyBellatrixBuilder  -> "body.randao_reveal", "body.attestations", ...
//!     └── ExecutionPayloadBuilder      -> "body.execution_payload.logs_bloom", ...
//!         └── transactions             -> "body.execution_payload.transactions[3]"
//! ```

use super::{
    Attestation, AttesterSlashing, BeaconBlockBellatrix, BeaconBlockBodyBellatrix, Deposit,
    Eth1Data, ExecutionPayload, ProposerSlashing, SignedVoluntaryExit, SyncAggregate,
};
use crate::error::EncodeError;
use alloy_primitives::{FixedBytes, U256};
use ssz::Decode;
use ssz_types::{typenum::Unsigned, BitList, BitVector, FixedVector, VariableList};

/// Copy `bytes` into a fixed-width value, rejecting any other length.
pub(crate) fn fixed<const N: usize>(field: &str, bytes: &[u8]) -> Result<FixedBytes<N>, EncodeError> {
    if bytes.len() != N {
        return Err(EncodeError::InvalidLength { field: field.to_string(), expected: N, actual: bytes.len() });
    }
    Ok(FixedBytes::from_slice(bytes))
}

pub(crate) fn bounded_list<T, N: Unsigned>(
    field: &str,
    items: Vec<T>,
) -> Result<VariableList<T, N>, EncodeError> {
    let actual = items.len();
    VariableList::new(items).map_err(|_| EncodeError::TooLong {
        field: field.to_string(),
        max: N::to_usize(),
        actual,
    })
}

pub(crate) fn fixed_vector<T, N: Unsigned>(
    field: &str,
    items: Vec<T>,
) -> Result<FixedVector<T, N>, EncodeError> {
    let actual = items.len();
    FixedVector::new(items).map_err(|_| EncodeError::InvalidLength {
        field: field.to_string(),
        expected: N::to_usize(),
        actual,
    })
}

/// Decode an SSZ bit-list (trailing sentinel bit included).
pub(crate) fn bitlist<N: Unsigned + Clone>(field: &str, bytes: &[u8]) -> Result<BitList<N>, EncodeError> {
    BitList::from_ssz_bytes(bytes).map_err(|e| EncodeError::InvalidBitfield {
        field: field.to_string(),
        reason: format!("{e:?}"),
    })
}

pub(crate) fn bitvector<N: Unsigned + Clone>(field: &str, bytes: &[u8]) -> Result<BitVector<N>, EncodeError> {
    BitVector::from_ssz_bytes(bytes).map_err(|e| EncodeError::InvalidBitfield {
        field: field.to_string(),
        reason: format!("{e:?}"),
    })
}

fn required(field: &str, value: Option<Vec<u8>>) -> Result<Vec<u8>, EncodeError> {
    value.ok_or_else(|| EncodeError::MissingField(field.to_string()))
}

/// Builder for [`ExecutionPayload`].
///
/// All hash-like fields must be set. Numeric fields, `extra_data` and
/// `transactions` default to zero/empty.
#[derive(Debug, Clone, Default)]
pub struct ExecutionPayloadBuilder {
    parent_hash: Option<Vec<u8>>,
    fee_recipient: Option<Vec<u8>>,
    state_root: Option<Vec<u8>>,
    receipts_root: Option<Vec<u8>>,
    logs_bloom: Option<Vec<u8>>,
    prev_randao: Option<Vec<u8>>,
    block_number: u64,
    gas_limit: u64,
    gas_used: u64,
    timestamp: u64,
    extra_data: Vec<u8>,
    base_fee_per_gas: Option<Vec<u8>>,
    block_hash: Option<Vec<u8>>,
    transactions: Vec<Vec<u8>>,
}

impl ExecutionPayloadBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent_hash(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.parent_hash = Some(bytes.into());
        self
    }

    pub fn with_fee_recipient(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.fee_recipient = Some(bytes.into());
        self
    }

    pub fn with_state_root(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.state_root = Some(bytes.into());
        self
    }

    pub fn with_receipts_root(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.receipts_root = Some(bytes.into());
        self
    }

    pub fn with_logs_bloom(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.logs_bloom = Some(bytes.into());
        self
    }

    pub fn with_prev_randao(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.prev_randao = Some(bytes.into());
        self
    }

    pub fn with_block_number(mut self, block_number: u64) -> Self {
        self.block_number = block_number;
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_gas_used(mut self, gas_used: u64) -> Self {
        self.gas_used = gas_used;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_extra_data(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.extra_data = bytes.into();
        self
    }

    /// Set the base fee from its 32-byte little-endian representation.
    pub fn with_base_fee_per_gas_le(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.base_fee_per_gas = Some(bytes.into());
        self
    }

    /// Set the base fee from an integer value.
    pub fn with_base_fee_per_gas(self, value: U256) -> Self {
        self.with_base_fee_per_gas_le(value.to_le_bytes::<32>().to_vec())
    }

    pub fn with_block_hash(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.block_hash = Some(bytes.into());
        self
    }

    /// Append one opaque transaction.
    pub fn with_transaction(mut self, tx: impl Into<Vec<u8>>) -> Self {
        self.transactions.push(tx.into());
        self
    }

    pub fn with_transactions(mut self, txs: Vec<Vec<u8>>) -> Self {
        self.transactions = txs;
        self
    }

    /// Validate all inputs and build the payload.
    pub fn build(self) -> Result<ExecutionPayload, EncodeError> {
        let transactions = self
            .transactions
            .into_iter()
            .enumerate()
            .map(|(i, tx)| bounded_list(&format!("transactions[{i}]"), tx))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ExecutionPayload {
            parent_hash: fixed("parent_hash", &required("parent_hash", self.parent_hash)?)?,
            fee_recipient: fixed::<20>("fee_recipient", &required("fee_recipient", self.fee_recipient)?)?
                .into(),
            state_root: fixed("state_root", &required("state_root", self.state_root)?)?,
            receipts_root: fixed("receipts_root", &required("receipts_root", self.receipts_root)?)?,
            logs_bloom: fixed("logs_bloom", &required("logs_bloom", self.logs_bloom)?)?,
            prev_randao: fixed("prev_randao", &required("prev_randao", self.prev_randao)?)?,
            block_number: self.block_number,
            gas_limit: self.gas_limit,
            gas_used: self.gas_used,
            timestamp: self.timestamp,
            extra_data: bounded_list("extra_data", self.extra_data)?,
            base_fee_per_gas: fixed(
                "base_fee_per_gas",
                &required("base_fee_per_gas", self.base_fee_per_gas)?,
            )?,
            block_hash: fixed("block_hash", &required("block_hash", self.block_hash)?)?,
            transactions: bounded_list("transactions", transactions)?,
        })
    }
}

/// Builder for [`BeaconBlockBodyBellatrix`].
#[derive(Debug, Clone, Default)]
pub struct BeaconBlockBodyBellatrixBuilder {
    randao_reveal: Option<Vec<u8>>,
    eth1_data: Eth1Data,
    graffiti: Option<Vec<u8>>,
    proposer_slashings: Vec<ProposerSlashing>,
    attester_slashings: Vec<AttesterSlashing>,
    attestations: Vec<Attestation>,
    deposits: Vec<Deposit>,
    voluntary_exits: Vec<SignedVoluntaryExit>,
    sync_aggregate: Option<(Vec<u8>, Vec<u8>)>,
    execution_payload: Option<ExecutionPayloadBuilder>,
}

impl BeaconBlockBodyBellatrixBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_randao_reveal(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.randao_reveal = Some(bytes.into());
        self
    }

    pub fn with_eth1_data(mut self, eth1_data: Eth1Data) -> Self {
        self.eth1_data = eth1_data;
        self
    }

    pub fn with_graffiti(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.graffiti = Some(bytes.into());
        self
    }

    pub fn with_proposer_slashings(mut self, slashings: Vec<ProposerSlashing>) -> Self {
        self.proposer_slashings = slashings;
        self
    }

    pub fn with_attester_slashings(mut self, slashings: Vec<AttesterSlashing>) -> Self {
        self.attester_slashings = slashings;
        self
    }

    pub fn with_attestations(mut self, attestations: Vec<Attestation>) -> Self {
        self.attestations = attestations;
        self
    }

    pub fn with_deposits(mut self, deposits: Vec<Deposit>) -> Self {
        self.deposits = deposits;
        self
    }

    pub fn with_voluntary_exits(mut self, exits: Vec<SignedVoluntaryExit>) -> Self {
        self.voluntary_exits = exits;
        self
    }

    /// Set the raw sync committee bits (64 bytes) and aggregate signature (96 bytes).
    pub fn with_sync_aggregate(mut self, bits: impl Into<Vec<u8>>, signature: impl Into<Vec<u8>>) -> Self {
        self.sync_aggregate = Some((bits.into(), signature.into()));
        self
    }

    pub fn with_execution_payload(mut self, payload: ExecutionPayloadBuilder) -> Self {
        self.execution_payload = Some(payload);
        self
    }

    /// Validate all inputs and build the body.
    pub fn build(self) -> Result<BeaconBlockBodyBellatrix, EncodeError> {
        let (bits, signature) =
            self.sync_aggregate.ok_or_else(|| EncodeError::MissingField("sync_aggregate".into()))?;
        let sync_aggregate = SyncAggregate::from_parts(
            &bits,
            fixed("sync_committee_signature", &signature).map_err(|e| e.within("sync_aggregate"))?,
        )
        .map_err(|e| e.within("sync_aggregate"))?;

        let execution_payload = self
            .execution_payload
            .ok_or_else(|| EncodeError::MissingField("execution_payload".into()))?
            .build()
            .map_err(|e| e.within("execution_payload"))?;

        Ok(BeaconBlockBodyBellatrix {
            randao_reveal: fixed("randao_reveal", &required("randao_reveal", self.randao_reveal)?)?,
            eth1_data: self.eth1_data,
            graffiti: fixed("graffiti", &required("graffiti", self.graffiti)?)?,
            proposer_slashings: bounded_list("proposer_slashings", self.proposer_slashings)?,
            attester_slashings: bounded_list("attester_slashings", self.attester_slashings)?,
            attestations: bounded_list("attestations", self.attestations)?,
            deposits: bounded_list("deposits", self.deposits)?,
            voluntary_exits: bounded_list("voluntary_exits", self.voluntary_exits)?,
            sync_aggregate,
            execution_payload,
        })
    }
}

/// Builder for [`BeaconBlockBellatrix`].
#[derive(Debug, Clone, Default)]
pub struct BeaconBlockBellatrixBuilder {
    slot: u64,
    proposer_index: u64,
    parent_root: Option<Vec<u8>>,
    state_root: Option<Vec<u8>>,
    body: Option<BeaconBlockBodyBellatrixBuilder>,
}

impl BeaconBlockBellatrixBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: u64) -> Self {
        self.slot = slot;
        self
    }

    pub fn with_proposer_index(mut self, proposer_index: u64) -> Self {
        self.proposer_index = proposer_index;
        self
    }

    pub fn with_parent_root(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.parent_root = Some(bytes.into());
        self
    }

    pub fn with_state_root(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.state_root = Some(bytes.into());
        self
    }

    pub fn with_body(mut self, body: BeaconBlockBodyBellatrixBuilder) -> Self {
        self.body = Some(body);
        self
    }

    /// Validate all inputs and build the unsigned block.
    pub fn build(self) -> Result<BeaconBlockBellatrix, EncodeError> {
        let body = self
            .body
            .ok_or_else(|| EncodeError::MissingField("body".into()))?
            .build()
            .map_err(|e| e.within("body"))?;

        Ok(BeaconBlockBellatrix {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: fixed("parent_root", &required("parent_root", self.parent_root)?)?,
            state_root: fixed("state_root", &required("state_root", self.state_root)?)?,
            body,
        })
    }
}
