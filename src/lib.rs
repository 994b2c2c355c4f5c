//! N42 Block Proposer
//!
//! Turns a signed beacon block into the JSON document the standard beacon
//! node API expects, submits it, and checks the block root the node reports.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          BlockProposer                              │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  SignedBeaconBlock ──► encoding::encode ──► WireDocument            │
//! │   (primitives)          │                     │                     │
//! │                         ├─ common (shared)    │                     │
//! │                         └─ bellatrix          ▼                     │
//! │                                      ┌──────────────────┐           │
//! │                                      │ SubmissionClient │──► POST   │
//! │                                      └────────┬─────────┘           │
//! │                                               │ 2xx                 │
//! │                                               ▼                     │
//! │  ProposalResult ◄──────────────────── ResponseValidator             │
//! │                                        (root == tree_hash_root)     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: typed Altair/Bellatrix block model and staged builders
//! - [`encoding`]: fork-dispatched block encoder and wire shapes
//! - [`api`]: transport seam, submission client and response validator
//! - [`proposer`]: end-to-end proposal
//! - [`config`]: proposer settings
//! - [`error`]: error taxonomy

#![warn(unused_crate_dependencies)]

pub mod api;
pub mod config;
pub mod encoding;
pub mod error;
pub mod primitives;
pub mod proposer;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::{
    ApiResponse, BeaconApiTransport, ProposalContext, ProposalResult, ResponseError,
    ResponseValidator, RootVerification, SubmissionClient, TransportError,
};
pub use config::ProposerConfig;
pub use encoding::{encode, WireDocument};
pub use error::{EncodeError, ProposerError, ProposerResult};
pub use primitives::{ForkName, SignedBeaconBlock};
pub use proposer::BlockProposer;
