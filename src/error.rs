//! Error types for block encoding and proposal.

use crate::{
    api::{ResponseError, TransportError},
    primitives::ForkName,
};
use thiserror::Error;

/// Errors raised while turning block data into its wire form.
///
/// `UnsupportedFork` comes from the encoder; the remaining variants are raised
/// by the staged builders when raw signer bytes do not fit the typed model.
/// `field` is a dotted path to the offending value, e.g.
/// `body.execution_payload.logs_bloom`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// No encoder exists for the block's fork.
    #[error("no block encoder for fork {0}")]
    UnsupportedFork(ForkName),

    /// A fixed-width field has the wrong number of bytes or elements.
    #[error("invalid length for {field}: expected {expected}, got {actual}")]
    InvalidLength { field: String, expected: usize, actual: usize },

    /// A bounded field exceeds its maximum.
    #[error("{field} too long: max {max}, got {actual}")]
    TooLong { field: String, max: usize, actual: usize },

    /// Bitfield bytes are not a valid SSZ bit-list/bit-vector.
    #[error("invalid bitfield {field}: {reason}")]
    InvalidBitfield { field: String, reason: String },

    /// A mandatory field was never set on a builder.
    #[error("missing field {0}")]
    MissingField(String),
}

impl EncodeError {
    /// Prefix the field path with the name of the enclosing record.
    pub fn within(self, parent: &str) -> Self {
        let nest = |field: String| format!("{parent}.{field}");
        match self {
            Self::UnsupportedFork(fork) => Self::UnsupportedFork(fork),
            Self::InvalidLength { field, expected, actual } => {
                Self::InvalidLength { field: nest(field), expected, actual }
            }
            Self::TooLong { field, max, actual } => Self::TooLong { field: nest(field), max, actual },
            Self::InvalidBitfield { field, reason } => {
                Self::InvalidBitfield { field: nest(field), reason }
            }
            Self::MissingField(field) => Self::MissingField(nest(field)),
        }
    }

    /// The dotted field path, if the error concerns a field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFork(_) => None,
            Self::InvalidLength { field, .. } |
            Self::TooLong { field, .. } |
            Self::InvalidBitfield { field, .. } |
            Self::MissingField(field) => Some(field),
        }
    }
}

/// Errors returned by a block proposal.
#[derive(Debug, Error)]
pub enum ProposerError {
    /// The block could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The wire document could not be serialized.
    #[error("failed to serialize wire document: {0}")]
    Serialize(String),

    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The beacon node answered with a non-success status.
    #[error("beacon node rejected block with status {status}: {body}")]
    Submission {
        /// HTTP status code.
        status: u16,
        /// Raw response body, lossily decoded.
        body: String,
        /// The `message` of a standard beacon-API error body, when present.
        message: Option<String>,
    },

    /// The success response could not be accepted.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl ProposerError {
    /// Whether the caller may retry the same proposal.
    ///
    /// Only transport failures are retryable; everything else fails the same
    /// way for the same input.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type for proposal operations.
pub type ProposerResult<T> = Result<T, ProposerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_nests_field_path() {
        let err = EncodeError::InvalidLength { field: "logs_bloom".into(), expected: 256, actual: 255 }
            .within("execution_payload")
            .within("body");
        assert_eq!(err.field(), Some("body.execution_payload.logs_bloom"));
        assert_eq!(
            err.to_string(),
            "invalid length for body.execution_payload.logs_bloom: expected 256, got 255"
        );
    }

    #[test]
    fn test_within_keeps_unsupported_fork() {
        let err = EncodeError::UnsupportedFork(ForkName::Altair).within("body");
        assert_eq!(err, EncodeError::UnsupportedFork(ForkName::Altair));
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(ProposerError::Transport(TransportError::TimedOut).is_transport());
        assert!(!ProposerError::Encode(EncodeError::UnsupportedFork(ForkName::Altair)).is_transport());
    }
}
