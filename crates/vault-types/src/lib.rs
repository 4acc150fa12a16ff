//! # Vault Types Crate
//!
//! Request and entity types exchanged between the vault gateway and its
//! callers, plus the canonical identity keying used to detect duplicate
//! secret identifiers inside a single batch.
//!
//! ## Design Principles
//!
//! - **Wire-shaped**: Request types mirror what a transport decodes, so
//!   absent entries are `Option::None` rather than being rejected at parse time.
//!   Rejection is the validator's job.
//! - **No normalization**: Identifiers compare by exact string equality.

pub mod entities;
pub mod identity;

pub use entities::*;
pub use identity::{key_for, IdentityKey};
