//! # Core Vault Entities
//!
//! Secret identifiers and the five request kinds admitted by the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed maximum for identifier-only batches (get and delete).
///
/// Those batches must be strictly smaller than this value.
pub const MAX_BATCH_SIZE: usize = 10;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Composite address of a secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SecretIdentifier {
    /// Owner of the secret (typically a workflow owner address).
    pub owner: String,
    /// Namespace within the owner.
    pub namespace: String,
    /// Key within the namespace.
    pub key: String,
}

impl SecretIdentifier {
    /// Create a new identifier.
    pub fn new(
        owner: impl Into<String>,
        namespace: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// True when owner, namespace and key are all non-empty.
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.namespace.is_empty() && !self.key.is_empty()
    }
}

impl fmt::Display for SecretIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "owner:{:?} namespace:{:?} key:{:?}",
            self.owner, self.namespace, self.key
        )
    }
}

// =============================================================================
// WRITE REQUESTS
// =============================================================================

/// One write item: an identifier plus its hex-encoded ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncryptedSecret {
    /// Identifier of the secret being written.
    pub id: Option<SecretIdentifier>,
    /// Hex encoding of the marshalled threshold ciphertext.
    pub encrypted_value: String,
}

impl EncryptedSecret {
    /// Create a write item for `id`.
    pub fn new(id: SecretIdentifier, encrypted_value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            encrypted_value: encrypted_value.into(),
        }
    }
}

/// Batch request creating new secrets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreateSecretsRequest {
    /// Caller-supplied opaque request id.
    pub request_id: String,
    /// Items to create; order is preserved for downstream processing.
    pub encrypted_secrets: Vec<Option<EncryptedSecret>>,
}

/// Batch request overwriting existing secrets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateSecretsRequest {
    /// Caller-supplied opaque request id.
    pub request_id: String,
    /// Items to update; order is preserved for downstream processing.
    pub encrypted_secrets: Vec<Option<EncryptedSecret>>,
}

// =============================================================================
// READ / LIST / DELETE REQUESTS
// =============================================================================

/// One entry of a get request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SecretRequest {
    /// Secret to read. Only `key` is required; owner and namespace may be
    /// implied by the caller's authenticated scope.
    pub id: Option<SecretIdentifier>,
    /// Public keys the decryption shares should be re-encrypted to.
    #[serde(default)]
    pub encryption_keys: Vec<String>,
}

impl SecretRequest {
    /// Create a get entry for `id` with no re-encryption keys.
    pub fn new(id: SecretIdentifier) -> Self {
        Self {
            id: Some(id),
            encryption_keys: Vec::new(),
        }
    }
}

/// Batch read request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GetSecretsRequest {
    /// Secrets to read.
    pub requests: Vec<SecretRequest>,
}

/// Listing of identifiers within one owner's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListSecretIdentifiersRequest {
    /// Caller-supplied opaque request id.
    pub request_id: String,
    /// Owner whose identifiers are listed.
    pub owner: String,
    /// Namespace to list.
    pub namespace: String,
}

/// Batch delete request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteSecretsRequest {
    /// Caller-supplied opaque request id.
    pub request_id: String,
    /// Secrets to delete.
    pub ids: Vec<Option<SecretIdentifier>>,
}
