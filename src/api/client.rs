//! Submission client for `POST /eth/v1/beacon/blocks`.

use super::{
    response::{ProposalResult, ResponseValidator},
    transport::{ApiResponse, BeaconApiTransport, Headers, TransportError},
    ProposalContext,
};
use crate::{
    config::ProposerConfig,
    encoding::WireDocument,
    error::{ProposerError, ProposerResult},
    primitives::SignedBeaconBlock,
};
use alloy_primitives::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Standard beacon-API error body.
#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

/// Extract `message` from a beacon-API error body, if it has that shape.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorMessage>(body).ok().map(|e| e.message)
}

/// Sends encoded blocks to a beacon node and interprets the reply.
///
/// Each call to [`submit`](Self::submit) issues exactly one request. Nothing
/// is retried; failed submissions are returned to the caller.
#[derive(Debug)]
pub struct SubmissionClient<T> {
    transport: Arc<T>,
    config: ProposerConfig,
    validator: ResponseValidator,
}

impl<T> Clone for SubmissionClient<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport), config: self.config.clone(), validator: self.validator }
    }
}

impl<T: BeaconApiTransport> SubmissionClient<T> {
    /// Create a new client.
    pub fn new(transport: Arc<T>, config: ProposerConfig) -> Self {
        Self { transport, config, validator: ResponseValidator::new() }
    }

    pub fn config(&self) -> &ProposerConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Submit `document` and validate the response.
    ///
    /// When `expected` is given, the root reported by the beacon node must
    /// equal the root of that block.
    pub async fn submit(
        &self,
        ctx: &ProposalContext,
        document: &WireDocument,
        expected: Option<&SignedBeaconBlock>,
    ) -> ProposerResult<ProposalResult> {
        if ctx.is_cancelled() {
            return Err(TransportError::Cancelled.into());
        }

        let fork = document.fork_name();
        let body = document.to_json_bytes().map_err(|e| ProposerError::Serialize(e.to_string()))?;
        let headers =
            Headers::from([(self.config.consensus_version_header.clone(), fork.as_str().to_string())]);

        debug!(
            target: "beacon_api::propose",
            %fork,
            endpoint = %self.config.endpoint,
            bytes = body.len(),
            "submitting block"
        );

        let response = self.send(ctx, &headers, Bytes::from(body)).await.inspect_err(|err| {
            debug!(target: "beacon_api::propose", %fork, %err, "block submission aborted");
        })?;

        if !response.is_success() {
            let message = error_message(&response.body);
            let body = String::from_utf8_lossy(&response.body).into_owned();
            warn!(
                target: "beacon_api::propose",
                %fork,
                status = response.status,
                message = message.as_deref().unwrap_or_default(),
                "beacon node rejected block"
            );
            return Err(ProposerError::Submission { status: response.status, body, message });
        }

        let result = self.validator.validate(&response.body, expected)?;
        info!(
            target: "beacon_api::propose",
            %fork,
            root = %result.block_root,
            verified = result.is_verified(),
            "block accepted by beacon node"
        );
        Ok(result)
    }

    /// Issue the POST, racing it against cancellation and the deadline.
    async fn send(
        &self,
        ctx: &ProposalContext,
        headers: &Headers,
        body: Bytes,
    ) -> Result<ApiResponse, TransportError> {
        let deadline = ctx.effective_deadline(self.config.request_timeout);
        let request = self.transport.post(ctx, &self.config.endpoint, headers, body);
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = ctx.cancellation().cancelled() => Err(TransportError::Cancelled),
            _ = expired => Err(TransportError::TimedOut),
            response = request => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoding::encode,
        test_utils::{expected_bellatrix_json, generate_signed_block, success_body, MockReply, MockTransport},
    };
    use std::time::Duration;

    fn client(transport: MockTransport) -> SubmissionClient<MockTransport> {
        SubmissionClient::new(Arc::new(transport), ProposerConfig::default())
    }

    #[tokio::test]
    async fn test_submit_single_post() {
        let block = generate_signed_block();
        let document = encode(&block).unwrap();
        let client = client(MockTransport::new().with_response(200, success_body(block.block_root())));

        let result = client.submit(&ProposalContext::new(), &document, None).await.unwrap();
        assert_eq!(result.block_root, block.block_root());

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/eth/v1/beacon/blocks");
        assert_eq!(
            requests[0].headers,
            Headers::from([("Eth-Consensus-Version".to_string(), "bellatrix".to_string())])
        );
        assert_eq!(requests[0].body.to_vec(), expected_bellatrix_json().into_bytes());
    }

    #[tokio::test]
    async fn test_custom_endpoint_and_header() {
        let block = generate_signed_block();
        let config = ProposerConfig::new()
            .with_endpoint("/eth/v2/beacon/blocks")
            .with_consensus_version_header("X-Fork");
        let client = SubmissionClient::new(
            Arc::new(MockTransport::new().with_response(200, success_body(block.block_root()))),
            config,
        );

        client.submit(&ProposalContext::new(), &encode(&block).unwrap(), None).await.unwrap();

        let request = &client.transport().requests()[0];
        assert_eq!(request.path, "/eth/v2/beacon/blocks");
        assert_eq!(request.headers.get("X-Fork").map(String::as_str), Some("bellatrix"));
    }

    #[tokio::test]
    async fn test_rejection_carries_api_message() {
        let body = r#"{"code":400,"message":"Invalid block: state root mismatch"}"#;
        let client = client(MockTransport::new().with_response(400, body));
        let document = encode(&generate_signed_block()).unwrap();

        let err = client.submit(&ProposalContext::new(), &document, None).await.unwrap_err();
        match err {
            ProposerError::Submission { status, body: text, message } => {
                assert_eq!(status, 400);
                assert_eq!(text, body);
                assert_eq!(message.as_deref(), Some("Invalid block: state root mismatch"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_rejection_with_plain_body() {
        let client = client(MockTransport::new().with_response(503, "node is syncing"));
        let document = encode(&generate_signed_block()).unwrap();

        let err = client.submit(&ProposalContext::new(), &document, None).await.unwrap_err();
        assert!(matches!(
            err,
            ProposerError::Submission { status: 503, ref body, message: None } if body == "node is syncing"
        ));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let failure = TransportError::Connection("connection refused".into());
        let client = client(MockTransport::new().with_reply(MockReply::Fail(failure.clone())));
        let document = encode(&generate_signed_block()).unwrap();

        let err = client.submit(&ProposalContext::new(), &document, None).await.unwrap_err();
        assert!(matches!(err, ProposerError::Transport(ref e) if *e == failure));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_cancelled_context_sends_nothing() {
        let client = client(MockTransport::new());
        let ctx = ProposalContext::new();
        ctx.cancel();

        let err = client.submit(&ctx, &encode(&generate_signed_block()).unwrap(), None).await.unwrap_err();
        assert!(matches!(err, ProposerError::Transport(TransportError::Cancelled)));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_waiting() {
        let client = client(MockTransport::new().with_reply(MockReply::Hang));
        let document = encode(&generate_signed_block()).unwrap();
        let ctx = ProposalContext::new();

        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            canceller.cancel();
        });

        let err = client.submit(&ctx, &document, None).await.unwrap_err();
        assert!(matches!(err, ProposerError::Transport(TransportError::Cancelled)));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_context_deadline() {
        let client = client(MockTransport::new().with_reply(MockReply::Hang));
        let document = encode(&generate_signed_block()).unwrap();
        let ctx = ProposalContext::new().with_timeout(Duration::from_secs(1));

        let err = client.submit(&ctx, &document, None).await.unwrap_err();
        assert!(matches!(err, ProposerError::Transport(TransportError::TimedOut)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_timeout() {
        let transport = MockTransport::new().with_reply(MockReply::Hang);
        let config = ProposerConfig::new().with_request_timeout(Some(Duration::from_secs(2)));
        let client = SubmissionClient::new(Arc::new(transport), config);
        let document = encode(&generate_signed_block()).unwrap();

        let started = tokio::time::Instant::now();
        let err = client.submit(&ProposalContext::new(), &document, None).await.unwrap_err();

        assert!(matches!(err, ProposerError::Transport(TransportError::TimedOut)));
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_error_message_shape() {
        assert_eq!(error_message(br#"{"code":500,"message":"boom"}"#).as_deref(), Some("boom"));
        assert_eq!(error_message(br#"{"message":"no code"}"#).as_deref(), Some("no code"));
        assert_eq!(error_message(b"<html>bad gateway</html>"), None);
    }
}
