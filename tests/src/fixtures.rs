//! Shared fixtures: dealer keys, authentic ciphertexts and request builders.

use uuid::Uuid;
use vault_crypto::encrypt;
use vault_crypto::test_helpers::DealerKey;
use vault_types::{
    CreateSecretsRequest, DeleteSecretsRequest, EncryptedSecret, GetSecretsRequest,
    SecretIdentifier, SecretRequest, UpdateSecretsRequest,
};

/// Owner used across flows.
pub const OWNER: &str = "0x7a3f00000000000000000000000000000000c0de";
/// Namespace used across flows.
pub const NAMESPACE: &str = "main";

/// Identifier under the shared owner and namespace.
pub fn secret_id(key: &str) -> SecretIdentifier {
    SecretIdentifier::new(OWNER, NAMESPACE, key)
}

/// Fresh opaque request id.
pub fn request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Hex-encoded ciphertext of `plaintext` under `dealer`'s key.
///
/// # Panics
///
/// Panics if encryption or marshalling fails.
pub fn encrypted_value(dealer: &DealerKey, plaintext: &[u8]) -> String {
    let ciphertext = encrypt(&dealer.public_key, plaintext).expect("encryption succeeds");
    hex::encode(ciphertext.marshal().expect("ciphertext marshals"))
}

/// Write items for `keys`, each encrypted to `dealer`.
pub fn authentic_items(dealer: &DealerKey, keys: &[&str]) -> Vec<Option<EncryptedSecret>> {
    keys.iter()
        .map(|key| {
            Some(EncryptedSecret::new(
                secret_id(key),
                encrypted_value(dealer, key.as_bytes()),
            ))
        })
        .collect()
}

pub fn create_request(items: Vec<Option<EncryptedSecret>>) -> CreateSecretsRequest {
    CreateSecretsRequest {
        request_id: request_id(),
        encrypted_secrets: items,
    }
}

pub fn update_request(items: Vec<Option<EncryptedSecret>>) -> UpdateSecretsRequest {
    UpdateSecretsRequest {
        request_id: request_id(),
        encrypted_secrets: items,
    }
}

pub fn get_request(keys: &[&str]) -> GetSecretsRequest {
    GetSecretsRequest {
        requests: keys
            .iter()
            .map(|key| SecretRequest::new(secret_id(key)))
            .collect(),
    }
}

pub fn delete_request(keys: &[&str]) -> DeleteSecretsRequest {
    DeleteSecretsRequest {
        request_id: request_id(),
        ids: keys.iter().map(|key| Some(secret_id(key))).collect(),
    }
}
