//! Fork-tagged signed beacon block.

use super::{
    builder::fixed, BLSSignature, BeaconBlockBellatrix, ForkName, SignedBeaconBlockAltair,
    SignedBeaconBlockBellatrix,
};
use crate::error::EncodeError;
use alloy_primitives::B256;

/// A signed beacon block of exactly one fork.
///
/// Consumers dispatch on the variant; there is no default fork.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignedBeaconBlock {
    Altair(SignedBeaconBlockAltair),
    Bellatrix(SignedBeaconBlockBellatrix),
}

impl SignedBeaconBlock {
    /// Sign a Bellatrix block with raw signature bytes from the signer.
    pub fn bellatrix(message: BeaconBlockBellatrix, signature: &[u8]) -> Result<Self, EncodeError> {
        Ok(Self::Bellatrix(SignedBeaconBlockBellatrix { message, signature: fixed("signature", signature)? }))
    }

    /// The fork this block belongs to.
    pub const fn fork_name(&self) -> ForkName {
        match self {
            Self::Altair(_) => ForkName::Altair,
            Self::Bellatrix(_) => ForkName::Bellatrix,
        }
    }

    /// Canonical root (hash tree root) of the unsigned block.
    pub fn block_root(&self) -> B256 {
        match self {
            Self::Altair(block) => block.message.block_root(),
            Self::Bellatrix(block) => block.message.block_root(),
        }
    }

    /// Get the slot number.
    pub const fn slot(&self) -> u64 {
        match self {
            Self::Altair(block) => block.message.slot,
            Self::Bellatrix(block) => block.message.slot,
        }
    }

    /// Get the proposer index.
    pub const fn proposer_index(&self) -> u64 {
        match self {
            Self::Altair(block) => block.message.proposer_index,
            Self::Bellatrix(block) => block.message.proposer_index,
        }
    }

    /// Get the proposer signature.
    pub const fn signature(&self) -> &BLSSignature {
        match self {
            Self::Altair(block) => &block.signature,
            Self::Bellatrix(block) => &block.signature,
        }
    }
}

impl From<SignedBeaconBlockBellatrix> for SignedBeaconBlock {
    fn from(block: SignedBeaconBlockBellatrix) -> Self {
        Self::Bellatrix(block)
    }
}

impl From<SignedBeaconBlockAltair> for SignedBeaconBlock {
    fn from(block: SignedBeaconBlockAltair) -> Self {
        Self::Altair(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fill_byte_slice, generate_altair_block, generate_bellatrix_block};

    #[test]
    fn test_fork_dispatch() {
        let bellatrix = SignedBeaconBlock::from(generate_bellatrix_block());
        let altair = SignedBeaconBlock::from(generate_altair_block());

        assert_eq!(bellatrix.fork_name(), ForkName::Bellatrix);
        assert_eq!(altair.fork_name(), ForkName::Altair);
        assert_eq!(bellatrix.slot(), 1);
        assert_eq!(bellatrix.proposer_index(), 2);
    }

    #[test]
    fn test_block_root_ignores_signature() {
        let block = generate_bellatrix_block();
        let mut resigned = block.clone();
        resigned.signature = BLSSignature::repeat_byte(0x01);

        let a = SignedBeaconBlock::from(block.clone());
        let b = SignedBeaconBlock::from(resigned);
        assert_eq!(a.block_root(), b.block_root());
        assert_eq!(a.block_root(), block.message.block_root());
    }

    #[test]
    fn test_sign_with_raw_bytes() {
        let message = generate_bellatrix_block().message;

        let signed = SignedBeaconBlock::bellatrix(message.clone(), &fill_byte_slice(96, 127)).unwrap();
        assert_eq!(signed.signature().as_slice(), fill_byte_slice(96, 127).as_slice());

        let err = SignedBeaconBlock::bellatrix(message, &[0u8; 95]).unwrap_err();
        assert_eq!(err, EncodeError::InvalidLength { field: "signature".into(), expected: 96, actual: 95 });
    }
}
