//! Per-proposal cancellation and deadline.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation signal and optional deadline carried by one proposal.
///
/// Cloning shares the cancellation token, so any clone can abort the request.
#[derive(Debug, Clone, Default)]
pub struct ProposalContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl ProposalContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an existing cancellation token, e.g. a child of a service-wide token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Set an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort the proposal.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The earlier of the context deadline and `now + timeout`.
    pub fn effective_deadline(&self, timeout: Option<Duration>) -> Option<Instant> {
        let from_timeout = timeout.map(|t| Instant::now() + t);
        match (self.deadline, from_timeout) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
