//! Fixtures and a recording transport for proposal tests.
//!
//! Every byte field of the generated blocks is filled with a distinct repeated
//! byte so that a misplaced field shows up in a JSON diff.

use crate::{
    api::{ApiResponse, BeaconApiTransport, Headers, ProposalContext, TransportError, TransportFut},
    primitives::{
        Attestation, AttestationData, AttesterSlashing, BeaconBlockAltair, BeaconBlockBellatrixBuilder,
        BeaconBlockBodyAltair, BeaconBlockBodyBellatrixBuilder, BeaconBlockHeader, Checkpoint, Deposit,
        DepositData, Eth1Data, ExecutionPayloadBuilder, IndexedAttestation, ProposerSlashing,
        SignedBeaconBlock, SignedBeaconBlockAltair, SignedBeaconBlockBellatrix, SignedBeaconBlockHeader,
        SignedVoluntaryExit, SyncAggregate, VoluntaryExit,
    },
};
use alloy_primitives::{Bytes, FixedBytes, B256};
use parking_lot::Mutex;
use ssz_types::VariableList;
use std::collections::VecDeque;

/// Base fee used by the Bellatrix fixture, stored little-endian.
pub const FIXTURE_BASE_FEE: u64 = 1_000_000_007;

/// A `len` byte buffer where every byte is `value`.
pub fn fill_byte_slice(len: usize, value: u8) -> Vec<u8> {
    vec![value; len]
}

fn filled<const N: usize>(value: u8) -> FixedBytes<N> {
    FixedBytes::repeat_byte(value)
}

pub fn generate_header(seed: u8) -> SignedBeaconBlockHeader {
    SignedBeaconBlockHeader {
        message: BeaconBlockHeader {
            slot: seed as u64,
            proposer_index: seed as u64 + 1,
            parent_root: filled(seed + 2),
            state_root: filled(seed + 3),
            body_root: filled(seed + 4),
        },
        signature: filled(seed + 5),
    }
}

pub fn generate_proposer_slashing(seed: u8) -> ProposerSlashing {
    ProposerSlashing { signed_header_1: generate_header(seed), signed_header_2: generate_header(seed + 6) }
}

pub fn generate_attestation_data(seed: u8) -> AttestationData {
    AttestationData {
        slot: seed as u64,
        index: seed as u64 + 1,
        beacon_block_root: filled(seed + 2),
        source: Checkpoint { epoch: seed as u64 + 3, root: filled(seed + 4) },
        target: Checkpoint { epoch: seed as u64 + 5, root: filled(seed + 6) },
    }
}

pub fn generate_attester_slashing(seed: u8) -> AttesterSlashing {
    let indexed = |seed: u8| {
        IndexedAttestation::from_parts(
            vec![seed as u64, seed as u64 + 1],
            generate_attestation_data(seed + 2),
            filled(seed + 9),
        )
        .expect("two indices fit a committee")
    };
    AttesterSlashing { attestation_1: indexed(seed), attestation_2: indexed(seed + 10) }
}

/// An attestation whose aggregation bits are four `seed` bytes.
///
/// `seed` must be non-zero so the last byte carries a sentinel bit.
pub fn generate_attestation(seed: u8) -> Attestation {
    Attestation::from_parts(&fill_byte_slice(4, seed), generate_attestation_data(seed + 1), filled(seed + 8))
        .expect("non-zero last byte carries the sentinel")
}

pub fn generate_deposit(seed: u8) -> Deposit {
    Deposit::from_parts(
        vec![filled(seed); 33],
        DepositData {
            pubkey: filled(seed + 1),
            withdrawal_credentials: filled(seed + 2),
            amount: seed as u64 + 3,
            signature: filled(seed + 4),
        },
    )
    .expect("proof has 33 nodes")
}

pub fn generate_voluntary_exit(seed: u8) -> SignedVoluntaryExit {
    SignedVoluntaryExit {
        message: VoluntaryExit { epoch: seed as u64, validator_index: seed as u64 + 1 },
        signature: filled(seed + 2),
    }
}

/// Eth1 data of the block fixtures.
pub fn generate_eth1_data() -> Eth1Data {
    Eth1Data { deposit_root: filled(6), deposit_count: 7, block_hash: filled(8) }
}

/// The execution payload builder of the Bellatrix fixture, without transactions.
pub fn execution_payload_builder() -> ExecutionPayloadBuilder {
    let mut base_fee = [0u8; 32];
    base_fee[..8].copy_from_slice(&FIXTURE_BASE_FEE.to_le_bytes());

    ExecutionPayloadBuilder::new()
        .with_parent_hash(fill_byte_slice(32, 200))
        .with_fee_recipient(fill_byte_slice(20, 201))
        .with_state_root(fill_byte_slice(32, 202))
        .with_receipts_root(fill_byte_slice(32, 203))
        .with_logs_bloom(fill_byte_slice(256, 204))
        .with_prev_randao(fill_byte_slice(32, 205))
        .with_block_number(206)
        .with_gas_limit(207)
        .with_gas_used(208)
        .with_timestamp(209)
        .with_extra_data(fill_byte_slice(8, 210))
        .with_base_fee_per_gas_le(base_fee.to_vec())
        .with_block_hash(fill_byte_slice(32, 212))
}

/// The body builder of the Bellatrix fixture: two of every operation.
pub fn body_builder() -> BeaconBlockBodyBellatrixBuilder {
    BeaconBlockBodyBellatrixBuilder::new()
        .with_randao_reveal(fill_byte_slice(96, 5))
        .with_eth1_data(generate_eth1_data())
        .with_graffiti(fill_byte_slice(32, 9))
        .with_proposer_slashings(vec![generate_proposer_slashing(10), generate_proposer_slashing(30)])
        .with_attester_slashings(vec![generate_attester_slashing(50), generate_attester_slashing(80)])
        .with_attestations(vec![generate_attestation(110), generate_attestation(130)])
        .with_deposits(vec![generate_deposit(150), generate_deposit(160)])
        .with_voluntary_exits(vec![generate_voluntary_exit(170), generate_voluntary_exit(180)])
        .with_sync_aggregate(fill_byte_slice(64, 190), fill_byte_slice(96, 191))
        .with_execution_payload(execution_payload_builder())
}

/// A signed Bellatrix block at slot 1 from proposer 2 with no transactions.
pub fn generate_bellatrix_block() -> SignedBeaconBlockBellatrix {
    let message = BeaconBlockBellatrixBuilder::new()
        .with_slot(1)
        .with_proposer_index(2)
        .with_parent_root(fill_byte_slice(32, 3))
        .with_state_root(fill_byte_slice(32, 4))
        .with_body(body_builder())
        .build()
        .expect("fixture fields have valid widths");

    SignedBeaconBlockBellatrix { message, signature: filled(127) }
}

/// [`generate_bellatrix_block`] wrapped in the fork-tagged enum.
pub fn generate_signed_block() -> SignedBeaconBlock {
    generate_bellatrix_block().into()
}

/// A signed Altair block with the same header fields as the Bellatrix fixture.
pub fn generate_altair_block() -> SignedBeaconBlockAltair {
    SignedBeaconBlockAltair {
        message: BeaconBlockAltair {
            slot: 1,
            proposer_index: 2,
            parent_root: filled(3),
            state_root: filled(4),
            body: BeaconBlockBodyAltair {
                randao_reveal: filled(5),
                eth1_data: generate_eth1_data(),
                graffiti: filled(9),
                proposer_slashings: VariableList::empty(),
                attester_slashings: VariableList::empty(),
                attestations: VariableList::empty(),
                deposits: VariableList::empty(),
                voluntary_exits: VariableList::empty(),
                sync_aggregate: SyncAggregate::from_parts(&fill_byte_slice(64, 190), filled(191))
                    .expect("64 bytes fill the committee"),
            },
        },
        signature: filled(127),
    }
}

/// A beacon-API success body carrying `root`.
pub fn success_body(root: B256) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "data": { "root": root } })).expect("json value serializes")
}

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: Headers,
    pub body: Bytes,
}

/// What [`MockTransport`] does with the next request.
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(ApiResponse),
    Fail(TransportError),
    /// Never resolve.
    Hang,
}

/// A transport that records every request and answers from a queue of
/// programmed replies.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    replies: Mutex<VecDeque<MockReply>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.replies.lock().push_back(reply);
        self
    }

    /// Queue an HTTP response.
    pub fn with_response(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.with_reply(MockReply::Respond(ApiResponse::new(status, body.into())))
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }
}

impl BeaconApiTransport for MockTransport {
    fn post<'a>(
        &'a self,
        _ctx: &'a ProposalContext,
        path: &'a str,
        headers: &'a Headers,
        body: Bytes,
    ) -> TransportFut<'a> {
        self.requests.lock().push(RecordedRequest { path: path.to_string(), headers: headers.clone(), body });
        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| MockReply::Fail(TransportError::Other("no reply programmed".into())));

        Box::pin(async move {
            match reply {
                MockReply::Respond(response) => Ok(response),
                MockReply::Fail(err) => Err(err),
                MockReply::Hang => std::future::pending().await,
            }
        })
    }
}

/// `0x`-prefixed hex of `len` bytes of `value`.
pub fn hex_fill(len: usize, value: u8) -> String {
    format!("0x{}", format!("{value:02x}").repeat(len))
}

fn expected_header(seed: u8) -> serde_json::Value {
    serde_json::json!({
        "message": {
            "slot": seed.to_string(),
            "proposer_index": (seed + 1).to_string(),
            "parent_root": hex_fill(32, seed + 2),
            "state_root": hex_fill(32, seed + 3),
            "body_root": hex_fill(32, seed + 4),
        },
        "signature": hex_fill(96, seed + 5),
    })
}

fn expected_attestation_data(seed: u8) -> serde_json::Value {
    serde_json::json!({
        "slot": seed.to_string(),
        "index": (seed + 1).to_string(),
        "beacon_block_root": hex_fill(32, seed + 2),
        "source": { "epoch": (seed + 3).to_string(), "root": hex_fill(32, seed + 4) },
        "target": { "epoch": (seed + 5).to_string(), "root": hex_fill(32, seed + 6) },
    })
}

fn expected_indexed_attestation(seed: u8) -> serde_json::Value {
    serde_json::json!({
        "attesting_indices": [seed.to_string(), (seed + 1).to_string()],
        "data": expected_attestation_data(seed + 2),
        "signature": hex_fill(96, seed + 9),
    })
}

fn expected_deposit(seed: u8) -> serde_json::Value {
    serde_json::json!({
        "proof": vec![hex_fill(32, seed); 33],
        "data": {
            "pubkey": hex_fill(48, seed + 1),
            "withdrawal_credentials": hex_fill(32, seed + 2),
            "amount": (seed + 3).to_string(),
            "signature": hex_fill(96, seed + 4),
        },
    })
}

/// The beacon-API JSON document [`generate_bellatrix_block`] must encode to,
/// written out field by field.
pub fn expected_bellatrix_document() -> serde_json::Value {
    let proposer_slashing = |seed: u8| {
        serde_json::json!({
            "signed_header_1": expected_header(seed),
            "signed_header_2": expected_header(seed + 6),
        })
    };
    let attester_slashing = |seed: u8| {
        serde_json::json!({
            "attestation_1": expected_indexed_attestation(seed),
            "attestation_2": expected_indexed_attestation(seed + 10),
        })
    };
    let attestation = |seed: u8| {
        serde_json::json!({
            "aggregation_bits": hex_fill(4, seed),
            "data": expected_attestation_data(seed + 1),
            "signature": hex_fill(96, seed + 8),
        })
    };
    let voluntary_exit = |seed: u8| {
        serde_json::json!({
            "message": { "epoch": seed.to_string(), "validator_index": (seed + 1).to_string() },
            "signature": hex_fill(96, seed + 2),
        })
    };

    serde_json::json!({
        "message": {
            "slot": "1",
            "proposer_index": "2",
            "parent_root": hex_fill(32, 3),
            "state_root": hex_fill(32, 4),
            "body": {
                "randao_reveal": hex_fill(96, 5),
                "eth1_data": {
                    "deposit_root": hex_fill(32, 6),
                    "deposit_count": "7",
                    "block_hash": hex_fill(32, 8),
                },
                "graffiti": hex_fill(32, 9),
                "proposer_slashings": [proposer_slashing(10), proposer_slashing(30)],
                "attester_slashings": [attester_slashing(50), attester_slashing(80)],
                "attestations": [attestation(110), attestation(130)],
                "deposits": [expected_deposit(150), expected_deposit(160)],
                "voluntary_exits": [voluntary_exit(170), voluntary_exit(180)],
                "sync_aggregate": {
                    "sync_committee_bits": hex_fill(64, 190),
                    "sync_committee_signature": hex_fill(96, 191),
                },
                "execution_payload": {
                    "parent_hash": hex_fill(32, 200),
                    "fee_recipient": hex_fill(20, 201),
                    "state_root": hex_fill(32, 202),
                    "receipts_root": hex_fill(32, 203),
                    "logs_bloom": hex_fill(256, 204),
                    "prev_randao": hex_fill(32, 205),
                    "block_number": "206",
                    "gas_limit": "207",
                    "gas_used": "208",
                    "timestamp": "209",
                    "extra_data": hex_fill(8, 210),
                    "base_fee_per_gas": "1000000007",
                    "block_hash": hex_fill(32, 212),
                    "transactions": [],
                },
            },
        },
        "signature": hex_fill(96, 127),
    })
}

fn text(value: impl ToString) -> String {
    format!("\"{}\"", value.to_string())
}

fn object(fields: &[(&str, String)]) -> String {
    let body: Vec<String> = fields.iter().map(|(key, value)| format!("\"{key}\":{value}")).collect();
    format!("{{{}}}", body.join(","))
}

fn array(items: impl IntoIterator<Item = String>) -> String {
    format!("[{}]", items.into_iter().collect::<Vec<_>>().join(","))
}

fn canonical_header(seed: u8) -> String {
    object(&[
        (
            "message",
            object(&[
                ("slot", text(seed)),
                ("proposer_index", text(seed + 1)),
                ("parent_root", text(hex_fill(32, seed + 2))),
                ("state_root", text(hex_fill(32, seed + 3))),
                ("body_root", text(hex_fill(32, seed + 4))),
            ]),
        ),
        ("signature", text(hex_fill(96, seed + 5))),
    ])
}

fn canonical_attestation_data(seed: u8) -> String {
    object(&[
        ("slot", text(seed)),
        ("index", text(seed + 1)),
        ("beacon_block_root", text(hex_fill(32, seed + 2))),
        ("source", object(&[("epoch", text(seed + 3)), ("root", text(hex_fill(32, seed + 4)))])),
        ("target", object(&[("epoch", text(seed + 5)), ("root", text(hex_fill(32, seed + 6)))])),
    ])
}

fn canonical_indexed_attestation(seed: u8) -> String {
    object(&[
        ("attesting_indices", array([text(seed), text(seed + 1)])),
        ("data", canonical_attestation_data(seed + 2)),
        ("signature", text(hex_fill(96, seed + 9))),
    ])
}

fn canonical_deposit(seed: u8) -> String {
    object(&[
        ("proof", array(std::iter::repeat(text(hex_fill(32, seed))).take(33))),
        (
            "data",
            object(&[
                ("pubkey", text(hex_fill(48, seed + 1))),
                ("withdrawal_credentials", text(hex_fill(32, seed + 2))),
                ("amount", text(seed + 3)),
                ("signature", text(hex_fill(96, seed + 4))),
            ]),
        ),
    ])
}

/// The exact request body [`generate_bellatrix_block`] must serialize to,
/// with every key in beacon-API schema order and no whitespace.
pub fn expected_bellatrix_json() -> String {
    let proposer_slashing = |seed: u8| {
        object(&[("signed_header_1", canonical_header(seed)), ("signed_header_2", canonical_header(seed + 6))])
    };
    let attester_slashing = |seed: u8| {
        object(&[
            ("attestation_1", canonical_indexed_attestation(seed)),
            ("attestation_2", canonical_indexed_attestation(seed + 10)),
        ])
    };
    let attestation = |seed: u8| {
        object(&[
            ("aggregation_bits", text(hex_fill(4, seed))),
            ("data", canonical_attestation_data(seed + 1)),
            ("signature", text(hex_fill(96, seed + 8))),
        ])
    };
    let voluntary_exit = |seed: u8| {
        object(&[
            ("message", object(&[("epoch", text(seed)), ("validator_index", text(seed + 1))])),
            ("signature", text(hex_fill(96, seed + 2))),
        ])
    };

    let execution_payload = object(&[
        ("parent_hash", text(hex_fill(32, 200))),
        ("fee_recipient", text(hex_fill(20, 201))),
        ("state_root", text(hex_fill(32, 202))),
        ("receipts_root", text(hex_fill(32, 203))),
        ("logs_bloom", text(hex_fill(256, 204))),
        ("prev_randao", text(hex_fill(32, 205))),
        ("block_number", text(206)),
        ("gas_limit", text(207)),
        ("gas_used", text(208)),
        ("timestamp", text(209)),
        ("extra_data", text(hex_fill(8, 210))),
        ("base_fee_per_gas", text(FIXTURE_BASE_FEE)),
        ("block_hash", text(hex_fill(32, 212))),
        ("transactions", array([])),
    ]);

    let body = object(&[
        ("randao_reveal", text(hex_fill(96, 5))),
        (
            "eth1_data",
            object(&[
                ("deposit_root", text(hex_fill(32, 6))),
                ("deposit_count", text(7)),
                ("block_hash", text(hex_fill(32, 8))),
            ]),
        ),
        ("graffiti", text(hex_fill(32, 9))),
        ("proposer_slashings", array([proposer_slashing(10), proposer_slashing(30)])),
        ("attester_slashings", array([attester_slashing(50), attester_slashing(80)])),
        ("attestations", array([attestation(110), attestation(130)])),
        ("deposits", array([canonical_deposit(150), canonical_deposit(160)])),
        ("voluntary_exits", array([voluntary_exit(170), voluntary_exit(180)])),
        (
            "sync_aggregate",
            object(&[
                ("sync_committee_bits", text(hex_fill(64, 190))),
                ("sync_committee_signature", text(hex_fill(96, 191))),
            ]),
        ),
        ("execution_payload", execution_payload),
    ]);

    object(&[
        (
            "message",
            object(&[
                ("slot", text(1)),
                ("proposer_index", text(2)),
                ("parent_root", text(hex_fill(32, 3))),
                ("state_root", text(hex_fill(32, 4))),
                ("body", body),
            ]),
        ),
        ("signature", text(hex_fill(96, 127))),
    ])
}
