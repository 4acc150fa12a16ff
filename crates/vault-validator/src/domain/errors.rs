//! # Validation Errors
//!
//! Every rejection the gateway can return. All of them are verdicts on the
//! caller's input, never faults of the gateway.

use std::fmt;
use thiserror::Error;
use vault_types::SecretIdentifier;

/// Limit rendered into a batch-size rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchLimit {
    /// The limit the request was checked against
    Known(usize),
    /// The limiter rejected the batch but could not report its limit
    Unknown,
}

impl fmt::Display for BatchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchLimit::Known(limit) => write!(f, "{}", limit),
            BatchLimit::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

/// Coarse classification of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A required string or identifier field is empty
    EmptyField,
    /// Batch length violates the applicable limit
    BatchSizeExceeded,
    /// Zero-length batch where at least one item is required
    EmptyBatch,
    /// Missing item or identifier at an index
    MalformedItem,
    /// Hex decoding of a ciphertext failed
    DecodeFailure,
    /// Ciphertext did not authenticate under the public key
    AuthenticationFailure,
    /// Same identifier appears twice in one batch
    DuplicateIdentifier,
}

/// Request rejection.
///
/// Messages carry the index, the identifier and any underlying decoder or
/// verifier text so callers can fix the request without re-deriving state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request ID must not be empty")]
    EmptyRequestId,

    #[error("request ID, owner or namespace must not be empty")]
    EmptyListScope,

    #[error("secret ID must have key, namespace and owner set at index {index}: {id}")]
    IncompleteSecretId { index: usize, id: SecretIdentifier },

    #[error("secret ID must have key set at index {index}: {id}")]
    MissingSecretKey { index: usize, id: SecretIdentifier },

    #[error("secret must have encrypted value set at index {index}: {id}")]
    MissingEncryptedValue { index: usize, id: SecretIdentifier },

    #[error("request batch size exceeds maximum of {limit}")]
    BatchSizeExceeded { limit: BatchLimit },

    #[error("request batch must contain at least 1 item")]
    EmptyBatch,

    #[error("no GetSecret request specified in request")]
    NoSecretRequests,

    #[error("encrypted secret must not be nil at index {index}")]
    NilEncryptedSecret { index: usize },

    #[error("secret ID must not be nil at index {index}")]
    NilSecretId { index: usize },

    #[error("failed to decode encrypted value at index {index}: {reason}")]
    DecodeFailure { index: usize, reason: String },

    #[error("failed to verify encrypted value at index {index}: {reason}")]
    AuthenticationFailure { index: usize, reason: String },

    #[error("duplicate secret ID found at index {index}: {id}")]
    DuplicateIdentifier { index: usize, id: SecretIdentifier },
}

impl ValidationError {
    /// Classify this rejection.
    pub fn kind(&self) -> ValidationErrorKind {
        use ValidationError::*;
        match self {
            EmptyRequestId
            | EmptyListScope
            | IncompleteSecretId { .. }
            | MissingSecretKey { .. }
            | MissingEncryptedValue { .. } => ValidationErrorKind::EmptyField,
            BatchSizeExceeded { .. } => ValidationErrorKind::BatchSizeExceeded,
            EmptyBatch | NoSecretRequests => ValidationErrorKind::EmptyBatch,
            NilEncryptedSecret { .. } | NilSecretId { .. } => ValidationErrorKind::MalformedItem,
            DecodeFailure { .. } => ValidationErrorKind::DecodeFailure,
            AuthenticationFailure { .. } => ValidationErrorKind::AuthenticationFailure,
            DuplicateIdentifier { .. } => ValidationErrorKind::DuplicateIdentifier,
        }
    }

    /// Batch index the rejection refers to, if any.
    pub fn index(&self) -> Option<usize> {
        use ValidationError::*;
        match self {
            IncompleteSecretId { index, .. }
            | MissingSecretKey { index, .. }
            | MissingEncryptedValue { index, .. }
            | NilEncryptedSecret { index }
            | NilSecretId { index }
            | DecodeFailure { index, .. }
            | AuthenticationFailure { index, .. }
            | DuplicateIdentifier { index, .. } => Some(*index),
            EmptyRequestId
            | EmptyListScope
            | BatchSizeExceeded { .. }
            | EmptyBatch
            | NoSecretRequests => None,
        }
    }
}
