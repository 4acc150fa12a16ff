//! # Request Validation Service
//!
//! Application service layer that implements the `SecretsRequestValidation`
//! trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SecretsRequestValidation`)
//! - Uses the outbound port (`BoundLimiter`) for the dynamic write bound
//! - Delegates per-item rules and ciphertext authentication to the domain layer
//!
//! The service holds nothing but the limiter. Each call is a pure function of
//! its inputs plus at most two synchronous limiter queries.

use crate::adapters::limiter::ScopedBoundLimiter;
use crate::config::ValidatorConfig;
use crate::domain::errors::{BatchLimit, ValidationError};
use crate::domain::rules::{
    check_delete_id, check_fixed_batch_size, check_get_entry, check_list_scope,
    check_request_id, check_write_item, DuplicateTracker,
};
use crate::ports::inbound::SecretsRequestValidation;
use crate::ports::outbound::{BoundLimiter, LimitContext};
use tracing::{debug, instrument, trace};
use vault_crypto::ThresholdPublicKey;
use vault_types::{
    CreateSecretsRequest, DeleteSecretsRequest, EncryptedSecret, GetSecretsRequest,
    ListSecretIdentifiersRequest, UpdateSecretsRequest,
};

/// Request Validator.
///
/// Generic over the limiter bounding create/update batch length. Safe to
/// share across threads whenever the limiter is.
pub struct RequestValidator<L: BoundLimiter> {
    max_request_batch_size_limiter: L,
}

impl<L: BoundLimiter> RequestValidator<L> {
    /// Create a new validator.
    ///
    /// # Arguments
    /// * `max_request_batch_size_limiter` - Bound on create/update batch length
    pub fn new(max_request_batch_size_limiter: L) -> Self {
        Self {
            max_request_batch_size_limiter,
        }
    }

    /// The injected limiter.
    pub fn limiter(&self) -> &L {
        &self.max_request_batch_size_limiter
    }

    /// Shared rules for create and update batches.
    fn validate_write_request(
        &self,
        ctx: &LimitContext,
        public_key: Option<&ThresholdPublicKey>,
        request_id: &str,
        encrypted_secrets: &[Option<EncryptedSecret>],
    ) -> Result<(), ValidationError> {
        check_request_id(request_id)?;

        if let Err(e) = self
            .max_request_batch_size_limiter
            .check(ctx, encrypted_secrets.len())
        {
            debug!(error = %e, "Batch rejected by limiter");
            return Err(ValidationError::BatchSizeExceeded {
                limit: self.reported_limit(ctx),
            });
        }

        if encrypted_secrets.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        if public_key.is_none() {
            debug!("Vault public key not cached; checking ciphertext encoding only");
        }

        let mut seen = DuplicateTracker::with_capacity(encrypted_secrets.len());
        for (index, item) in encrypted_secrets.iter().enumerate() {
            let id = check_write_item(index, item.as_ref(), public_key)?;
            seen.record(index, id)?;
        }

        Ok(())
    }

    /// Limit to render in a batch-size rejection.
    ///
    /// A limiter that cannot report its bound degrades the message only.
    fn reported_limit(&self, ctx: &LimitContext) -> BatchLimit {
        match self.max_request_batch_size_limiter.limit(ctx) {
            Ok(limit) => BatchLimit::Known(limit),
            Err(e) => {
                debug!(error = %e, "Limiter could not report its bound");
                BatchLimit::Unknown
            }
        }
    }
}

impl RequestValidator<ScopedBoundLimiter> {
    /// Build a validator whose write bound comes from `config`.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(ScopedBoundLimiter::from_config(config))
    }
}

fn log_verdict(result: &Result<(), ValidationError>) {
    match result {
        Ok(()) => trace!("Request admitted"),
        Err(e) => debug!(kind = ?e.kind(), index = ?e.index(), reason = %e, "Request rejected"),
    }
}

/// Get batches are bounded by the fixed maximum, never by the limiter.
fn validate_get_entries(request: &GetSecretsRequest) -> Result<(), ValidationError> {
    if request.requests.is_empty() {
        return Err(ValidationError::NoSecretRequests);
    }
    check_fixed_batch_size(request.requests.len())?;

    for (index, entry) in request.requests.iter().enumerate() {
        check_get_entry(index, entry)?;
    }
    Ok(())
}

fn validate_delete_ids(request: &DeleteSecretsRequest) -> Result<(), ValidationError> {
    check_request_id(&request.request_id)?;
    check_fixed_batch_size(request.ids.len())?;

    let mut seen = DuplicateTracker::with_capacity(request.ids.len());
    for (index, id) in request.ids.iter().enumerate() {
        let id = check_delete_id(index, id.as_ref())?;
        seen.record(index, id)?;
    }
    Ok(())
}

impl<L: BoundLimiter> SecretsRequestValidation for RequestValidator<L> {
    #[instrument(
        level = "debug",
        name = "validate_create_secrets",
        skip_all,
        fields(request_id = %request.request_id, items = request.encrypted_secrets.len())
    )]
    fn validate_create_secrets_request(
        &self,
        ctx: &LimitContext,
        public_key: Option<&ThresholdPublicKey>,
        request: &CreateSecretsRequest,
    ) -> Result<(), ValidationError> {
        let result = self.validate_write_request(
            ctx,
            public_key,
            &request.request_id,
            &request.encrypted_secrets,
        );
        log_verdict(&result);
        result
    }

    #[instrument(
        level = "debug",
        name = "validate_update_secrets",
        skip_all,
        fields(request_id = %request.request_id, items = request.encrypted_secrets.len())
    )]
    fn validate_update_secrets_request(
        &self,
        ctx: &LimitContext,
        public_key: Option<&ThresholdPublicKey>,
        request: &UpdateSecretsRequest,
    ) -> Result<(), ValidationError> {
        let result = self.validate_write_request(
            ctx,
            public_key,
            &request.request_id,
            &request.encrypted_secrets,
        );
        log_verdict(&result);
        result
    }

    #[instrument(
        level = "debug",
        name = "validate_get_secrets",
        skip_all,
        fields(items = request.requests.len())
    )]
    fn validate_get_secrets_request(
        &self,
        request: &GetSecretsRequest,
    ) -> Result<(), ValidationError> {
        let result = validate_get_entries(request);
        log_verdict(&result);
        result
    }

    #[instrument(
        level = "debug",
        name = "validate_list_secret_identifiers",
        skip_all,
        fields(request_id = %request.request_id)
    )]
    fn validate_list_secret_identifiers_request(
        &self,
        request: &ListSecretIdentifiersRequest,
    ) -> Result<(), ValidationError> {
        let result = check_list_scope(request);
        log_verdict(&result);
        result
    }

    #[instrument(
        level = "debug",
        name = "validate_delete_secrets",
        skip_all,
        fields(request_id = %request.request_id, items = request.ids.len())
    )]
    fn validate_delete_secrets_request(
        &self,
        request: &DeleteSecretsRequest,
    ) -> Result<(), ValidationError> {
        let result = validate_delete_ids(request);
        log_verdict(&result);
        result
    }
}

// =============================================================================
// TESTS
// =============================================================================
