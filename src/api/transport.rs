//! HTTP transport seam towards the beacon node.
//!
//! The proposer never talks HTTP itself. It hands a path, headers and a body
//! to a [`BeaconApiTransport`] and gets back a status and body, so the client
//! can be driven by any HTTP stack or by a mock.

use super::ProposalContext;
use alloy_primitives::Bytes;
use std::{collections::BTreeMap, future::Future, pin::Pin};

/// Request headers, ordered by name.
pub type Headers = BTreeMap<String, String>;

/// Status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }

    /// Whether the status is in the 2xx range.
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failures that prevented an HTTP response from being received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The proposal context was cancelled.
    #[error("request cancelled")]
    Cancelled,
    /// The deadline or request timeout elapsed.
    #[error("request timed out")]
    TimedOut,
    /// The beacon node could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("{0}")]
    Other(String),
}

/// The future returned by [`BeaconApiTransport::post`].
pub type TransportFut<'a> = Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + 'a>>;

/// Something that can POST to the beacon node API.
pub trait BeaconApiTransport: Send + Sync {
    /// Send a POST request to `path`.
    ///
    /// The returned future may be dropped before completion when the proposal
    /// is cancelled or times out.
    fn post<'a>(
        &'a self,
        ctx: &'a ProposalContext,
        path: &'a str,
        headers: &'a Headers,
        body: Bytes,
    ) -> TransportFut<'a>;
}

impl<T: BeaconApiTransport + ?Sized> BeaconApiTransport for std::sync::Arc<T> {
    fn post<'a>(
        &'a self,
        ctx: &'a ProposalContext,
        path: &'a str,
        headers: &'a Headers,
        body: Bytes,
    ) -> TransportFut<'a> {
        (**self).post(ctx, path, headers, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, Bytes::new()).is_success());
        assert!(ApiResponse::new(202, Bytes::new()).is_success());
        assert!(!ApiResponse::new(199, Bytes::new()).is_success());
        assert!(!ApiResponse::new(300, Bytes::new()).is_success());
        assert!(!ApiResponse::new(400, Bytes::new()).is_success());
    }
}
