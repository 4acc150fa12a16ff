//! # Identity Keying
//!
//! Canonical comparison key for [`SecretIdentifier`], used as a set key when
//! scanning a batch for duplicates. Carries no cryptographic meaning.
//!
//! Each field is written as `<byte length>:<bytes>`, so the encoding stays
//! injective no matter which delimiters appear inside owner, namespace or key.

use crate::entities::SecretIdentifier;

/// Canonical, collision-free key for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Borrow the encoded key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Compute the canonical key for `id`.
pub fn key_for(id: &SecretIdentifier) -> IdentityKey {
    let mut encoded =
        String::with_capacity(id.owner.len() + id.namespace.len() + id.key.len() + 12);
    for field in [&id.owner, &id.namespace, &id.key] {
        encoded.push_str(&field.len().to_string());
        encoded.push(':');
        encoded.push_str(field);
    }
    IdentityKey(encoded)
}
