//! Block proposal: encode, submit, verify.

use crate::{
    api::{BeaconApiTransport, ProposalContext, ProposalResult, SubmissionClient},
    config::ProposerConfig,
    encoding::encode,
    error::ProposerResult,
    primitives::SignedBeaconBlock,
};
use std::sync::Arc;
use tracing::debug;

/// Proposes signed blocks to a beacon node.
///
/// # Usage
///
/// ```ignore
/// let proposer = BlockProposer::new(Arc::new(http_transport), ProposerConfig::default());
/// let ctx = ProposalContext::new().with_timeout(Duration::from_secs(4));
/// let result = proposer.propose(&ctx, &signed_block).await?;
/// ```
#[derive(Debug)]
pub struct BlockProposer<T> {
    client: SubmissionClient<T>,
}

impl<T> Clone for BlockProposer<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone() }
    }
}

impl<T: BeaconApiTransport> BlockProposer<T> {
    /// Create a new proposer.
    pub fn new(transport: Arc<T>, config: ProposerConfig) -> Self {
        Self { client: SubmissionClient::new(transport, config) }
    }

    pub fn client(&self) -> &SubmissionClient<T> {
        &self.client
    }

    /// Encode `block`, submit it, and check the returned root when
    /// `verify_block_root` is enabled.
    pub async fn propose(
        &self,
        ctx: &ProposalContext,
        block: &SignedBeaconBlock,
    ) -> ProposerResult<ProposalResult> {
        let document = encode(block)?;
        debug!(
            target: "beacon_api::propose",
            fork = %block.fork_name(),
            slot = block.slot(),
            proposer_index = block.proposer_index(),
            "encoded block"
        );

        let expected = self.client.config().verify_block_root.then_some(block);
        self.client.submit(ctx, &document, expected).await
    }
}
