//! Bellatrix block encoder.

use super::{
    common::{encode_common_body, CommonBodyJson},
    fields::{hex_bytes, uint256_le, uint64},
    json::{
        BeaconBlockBellatrixJson, BeaconBlockBodyBellatrixJson, ExecutionPayloadJson,
        SignedBeaconBlockBellatrixJson,
    },
};
use crate::primitives::{ExecutionPayload, SignedBeaconBlockBellatrix};

impl From<&ExecutionPayload> for ExecutionPayloadJson {
    fn from(payload: &ExecutionPayload) -> Self {
        Self {
            parent_hash: hex_bytes(payload.parent_hash),
            fee_recipient: hex_bytes(payload.fee_recipient),
            state_root: hex_bytes(payload.state_root),
            receipts_root: hex_bytes(payload.receipts_root),
            logs_bloom: hex_bytes(payload.logs_bloom),
            prev_randao: hex_bytes(payload.prev_randao),
            block_number: uint64(payload.block_number),
            gas_limit: uint64(payload.gas_limit),
            gas_used: uint64(payload.gas_used),
            timestamp: uint64(payload.timestamp),
            extra_data: hex_bytes(&payload.extra_data[..]),
            base_fee_per_gas: uint256_le(&payload.base_fee_per_gas),
            block_hash: hex_bytes(payload.block_hash),
            transactions: payload.transactions.iter().map(|tx| hex_bytes(&tx[..])).collect(),
        }
    }
}

/// Encode a signed Bellatrix block into its beacon-API document.
pub fn encode_bellatrix(block: &SignedBeaconBlockBellatrix) -> SignedBeaconBlockBellatrixJson {
    let message = &block.message;
    let CommonBodyJson {
        randao_reveal,
        eth1_data,
        graffiti,
        proposer_slashings,
        attester_slashings,
        attestations,
        deposits,
        voluntary_exits,
        sync_aggregate,
    } = encode_common_body(&message.body);

    SignedBeaconBlockBellatrixJson {
        message: BeaconBlockBellatrixJson {
            slot: uint64(message.slot),
            proposer_index: uint64(message.proposer_index),
            parent_root: hex_bytes(message.parent_root),
            state_root: hex_bytes(message.state_root),
            body: BeaconBlockBodyBellatrixJson {
                randao_reveal,
                eth1_data,
                graffiti,
                proposer_slashings,
                attester_slashings,
                attestations,
                deposits,
                voluntary_exits,
                sync_aggregate,
                execution_payload: (&message.body.execution_payload).into(),
            },
        },
        signature: hex_bytes(block.signature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{execution_payload_builder, generate_bellatrix_block};
    use alloy_primitives::B256;

    #[test]
    fn test_payload_transactions_in_order() {
        let payload = execution_payload_builder()
            .with_transaction(vec![0x02, 0xf8])
            .with_transaction(Vec::new())
            .with_transaction(vec![0x00; 3])
            .build()
            .unwrap();

        let json = ExecutionPayloadJson::from(&payload);
        assert_eq!(json.transactions, vec!["0x02f8", "0x", "0x000000"]);
    }

    #[test]
    fn test_payload_base_fee_decimal() {
        let mut payload = execution_payload_builder().build().unwrap();
        assert_eq!(ExecutionPayloadJson::from(&payload).base_fee_per_gas, "1000000007");

        payload.base_fee_per_gas = B256::ZERO;
        assert_eq!(ExecutionPayloadJson::from(&payload).base_fee_per_gas, "0");

        payload.base_fee_per_gas = B256::repeat_byte(0xff);
        assert_eq!(
            ExecutionPayloadJson::from(&payload).base_fee_per_gas,
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
    }

    #[test]
    fn test_empty_extra_data() {
        let payload = execution_payload_builder().with_extra_data(Vec::new()).build().unwrap();
        assert_eq!(ExecutionPayloadJson::from(&payload).extra_data, "0x");
    }

    #[test]
    fn test_signature_is_outermost() {
        let block = generate_bellatrix_block();
        let json = encode_bellatrix(&block);
        assert_eq!(json.signature, format!("0x{}", "7f".repeat(96)));
        assert_eq!(json.message.slot, "1");
        assert_eq!(json.message.proposer_index, "2");
    }
}
