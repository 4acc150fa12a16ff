//! # Inbound Ports (Driving Ports / API)
//!
//! The validation API exposed to the vault's service layer.

use crate::domain::errors::ValidationError;
use crate::ports::outbound::LimitContext;
use vault_crypto::ThresholdPublicKey;
use vault_types::{
    CreateSecretsRequest, DeleteSecretsRequest, GetSecretsRequest, ListSecretIdentifiersRequest,
    UpdateSecretsRequest,
};

/// Request admission checks, one per request kind.
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no
/// per-request state: the same inputs always produce the same verdict.
pub trait SecretsRequestValidation: Send + Sync {
    /// Validate a create batch.
    ///
    /// `ctx` is forwarded untouched to the batch-size limiter. `public_key`
    /// is `None` while the caller has not yet cached the vault key; in that
    /// case ciphertexts are checked for hex encoding only.
    fn validate_create_secrets_request(
        &self,
        ctx: &LimitContext,
        public_key: Option<&ThresholdPublicKey>,
        request: &CreateSecretsRequest,
    ) -> Result<(), ValidationError>;

    /// Validate an update batch. Same rules as create.
    fn validate_update_secrets_request(
        &self,
        ctx: &LimitContext,
        public_key: Option<&ThresholdPublicKey>,
        request: &UpdateSecretsRequest,
    ) -> Result<(), ValidationError>;

    /// Validate a get batch.
    fn validate_get_secrets_request(&self, request: &GetSecretsRequest)
        -> Result<(), ValidationError>;

    /// Validate a list request.
    fn validate_list_secret_identifiers_request(
        &self,
        request: &ListSecretIdentifiersRequest,
    ) -> Result<(), ValidationError>;

    /// Validate a delete batch.
    fn validate_delete_secrets_request(
        &self,
        request: &DeleteSecretsRequest,
    ) -> Result<(), ValidationError>;
}
