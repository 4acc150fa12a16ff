//! Crypto error types.

use thiserror::Error;

/// Errors raised while decoding or authenticating threshold ciphertexts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Input could not be parsed at all
    #[error("Malformed {what}: {reason}")]
    Malformed {
        /// What was being decoded
        what: &'static str,
        /// Parser error text
        reason: String,
    },

    /// A group element did not decode to a point on the curve
    #[error("Invalid point {field}: {reason}")]
    InvalidPoint {
        /// Name of the offending field
        field: &'static str,
        /// Decoder error text
        reason: String,
    },

    /// A scalar was not a canonical field element
    #[error("Invalid scalar {field}")]
    InvalidScalar {
        /// Name of the offending field
        field: &'static str,
    },

    /// A fixed-size field had the wrong length
    #[error("Invalid {field} length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Name of the offending field
        field: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Ciphertext and key belong to different groups
    #[error("Group mismatch: expected {expected}, got {actual}")]
    GroupMismatch {
        /// Group of the public key
        expected: String,
        /// Group named by the ciphertext
        actual: String,
    },

    /// The ciphertext's consistency proof does not hold under the key
    #[error("Ciphertext proof verification failed")]
    InvalidProof,

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),
}
