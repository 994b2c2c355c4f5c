//! Beacon node API access for block proposal.
//!
//! ```text
//! ┌────────────────────┐   POST /eth/v1/beacon/blocks    ┌──────────────┐
//! │  SubmissionClient  │ ──────────────────────────────► │ BeaconApi-   │
//! │                    │   Eth-Consensus-Version: <fork> │ Transport    │
//! │                    │ ◄────────────────────────────── │ (HTTP, mock) │
//! └─────────┬──────────┘        ApiResponse              └──────────────┘
//!           │ 2xx body
//!           ▼
//! ┌────────────────────┐
//! │ ResponseValidator  │ ──► ProposalResult { block_root, verification }
//! └────────────────────┘
//! ```

pub mod client;
pub mod context;
pub mod response;
pub mod transport;

pub use client::SubmissionClient;
pub use context::ProposalContext;
pub use response::{ProposalResult, ResponseError, ResponseValidator, RootVerification};
pub use transport::{ApiResponse, BeaconApiTransport, Headers, TransportError, TransportFut};
