//! # Vault Crypto - Threshold Ciphertext Codec
//!
//! Encodes, decodes and authenticates the vault's threshold ciphertexts.
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `public_key` | Threshold public key and its JSON wire form |
//! | `ciphertext` | TDH2 ciphertext, envelope, decode + verify |
//! | `encrypt` | Client-side encryption to the vault key |
//! | `group` | secp256k1 point/scalar codec and hash-to-scalar |
//!
//! ## Scheme
//!
//! TDH2 (Shoup-Gennaro) over secp256k1. A 32-byte symmetric key is
//! encapsulated to the threshold key together with a NIZK proof that
//! `log_g(u) == log_g_bar(u_bar)`. The proof is checkable with the public key
//! alone, which is what lets the gateway reject forged or mangled
//! ciphertexts without any party decrypting. The payload itself is sealed
//! with AES-256-GCM under the encapsulated key.
//!
//! Key generation and threshold decryption live elsewhere.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ciphertext;
pub mod encrypt;
pub mod errors;
pub mod group;
pub mod public_key;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

// Re-exports
pub use ciphertext::{Ciphertext, ThresholdCiphertext};
pub use encrypt::{encrypt, encrypt_with_label};
pub use errors::CryptoError;
pub use public_key::ThresholdPublicKey;
