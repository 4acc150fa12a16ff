//! # Validation Rules
//!
//! Per-field and per-item checks shared by the request validators. Each rule
//! returns the first violation it finds; callers run them in a fixed order.

use super::errors::{BatchLimit, ValidationError};
use std::collections::HashSet;
use vault_crypto::{Ciphertext, ThresholdPublicKey};
use vault_types::{
    key_for, EncryptedSecret, IdentityKey, ListSecretIdentifiersRequest, SecretIdentifier,
    SecretRequest, MAX_BATCH_SIZE,
};

/// Reject an empty request id.
pub fn check_request_id(request_id: &str) -> Result<(), ValidationError> {
    if request_id.is_empty() {
        return Err(ValidationError::EmptyRequestId);
    }
    Ok(())
}

/// Reject identifier-only batches at or above [`MAX_BATCH_SIZE`].
pub fn check_fixed_batch_size(len: usize) -> Result<(), ValidationError> {
    if len >= MAX_BATCH_SIZE {
        return Err(ValidationError::BatchSizeExceeded {
            limit: BatchLimit::Known(MAX_BATCH_SIZE),
        });
    }
    Ok(())
}

/// Structural and cryptographic checks for one write item.
///
/// Returns the item's identifier so the caller can run duplicate detection
/// after the ciphertext has been checked.
pub fn check_write_item<'a>(
    index: usize,
    item: Option<&'a EncryptedSecret>,
    public_key: Option<&ThresholdPublicKey>,
) -> Result<&'a SecretIdentifier, ValidationError> {
    let item = item.ok_or(ValidationError::NilEncryptedSecret { index })?;
    let id = item
        .id
        .as_ref()
        .ok_or(ValidationError::NilSecretId { index })?;

    if !id.is_complete() {
        return Err(ValidationError::IncompleteSecretId {
            index,
            id: id.clone(),
        });
    }

    if item.encrypted_value.is_empty() {
        return Err(ValidationError::MissingEncryptedValue {
            index,
            id: id.clone(),
        });
    }

    authenticate_ciphertext(index, &item.encrypted_value, public_key)?;
    Ok(id)
}

/// Hex-decode `encrypted_value` and, when the vault key is known, check that
/// it is a ciphertext bound to that key.
///
/// Without a key only the hex layer is checked.
pub fn authenticate_ciphertext(
    index: usize,
    encrypted_value: &str,
    public_key: Option<&ThresholdPublicKey>,
) -> Result<(), ValidationError> {
    let bytes = hex::decode(encrypted_value).map_err(|e| ValidationError::DecodeFailure {
        index,
        reason: e.to_string(),
    })?;

    if let Some(public_key) = public_key {
        Ciphertext::unmarshal_verify(&bytes, public_key).map_err(|e| {
            ValidationError::AuthenticationFailure {
                index,
                reason: e.to_string(),
            }
        })?;
    }

    Ok(())
}

/// One entry of a get request. Only `key` is mandatory.
pub fn check_get_entry(index: usize, entry: &SecretRequest) -> Result<(), ValidationError> {
    let id = entry
        .id
        .as_ref()
        .ok_or(ValidationError::NilSecretId { index })?;

    if id.key.is_empty() {
        return Err(ValidationError::MissingSecretKey {
            index,
            id: id.clone(),
        });
    }
    Ok(())
}

/// One identifier of a delete request. All three fields are mandatory.
pub fn check_delete_id(
    index: usize,
    id: Option<&SecretIdentifier>,
) -> Result<&SecretIdentifier, ValidationError> {
    let id = id.ok_or(ValidationError::NilSecretId { index })?;
    if !id.is_complete() {
        return Err(ValidationError::IncompleteSecretId {
            index,
            id: id.clone(),
        });
    }
    Ok(id)
}

/// A list request must name request id, owner and namespace.
pub fn check_list_scope(request: &ListSecretIdentifiersRequest) -> Result<(), ValidationError> {
    if request.request_id.is_empty() || request.owner.is_empty() || request.namespace.is_empty()
    {
        return Err(ValidationError::EmptyListScope);
    }
    Ok(())
}

/// Tracks identity keys already seen in the current batch.
#[derive(Debug, Default)]
pub struct DuplicateTracker {
    seen: HashSet<IdentityKey>,
}

impl DuplicateTracker {
    /// Tracker sized for a batch of `len` items.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(len),
        }
    }

    /// Record `id`, rejecting it if an equal identifier came earlier.
    pub fn record(&mut self, index: usize, id: &SecretIdentifier) -> Result<(), ValidationError> {
        if !self.seen.insert(key_for(id)) {
            return Err(ValidationError::DuplicateIdentifier {
                index,
                id: id.clone(),
            });
        }
        Ok(())
    }
}
