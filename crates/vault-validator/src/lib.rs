//! # Vault Request Validator
//!
//! Admission gate in front of the secret vault. Every create, update, get,
//! list and delete request passes through here before it reaches storage.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Pure per-item rules and the rejection taxonomy
//! - **Ports Layer** (`ports/`): The validation API and the limiter it consumes
//! - **Adapters Layer** (`adapters/`): In-process limiter implementations
//! - **Service Layer** (`service.rs`): Composes rules, limiter and ciphertext
//!   authentication per request kind
//!
//! ## Security Notes
//!
//! - **First failure wins**: Checks run in a fixed order and the first
//!   violation is returned. Errors are never aggregated.
//! - **All or nothing**: A batch is admitted only if every item passes.
//! - **Optional public key**: Without the vault key, write items are admitted
//!   on structure alone and must be re-validated once the key is known.
//! - **Asymmetric bounds**: Writes are bounded by the injected limiter; get and
//!   delete use the fixed [`vault_types::MAX_BATCH_SIZE`] with a strict `>=`.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::limiter::{LimitSettings, ScopedBoundLimiter, StaticBoundLimiter};
pub use config::{ConfigError, LimitsConfig, ValidatorConfig};
pub use domain::errors::{BatchLimit, ValidationError, ValidationErrorKind};
pub use ports::inbound::SecretsRequestValidation;
pub use ports::outbound::{BoundLimiter, LimitContext, LimitError};
pub use service::RequestValidator;
