//! Dealer-style key fixtures for tests.
//!
//! A single party samples the master secret and hands out Shamir shares.
//! Good enough to produce real public keys for exercising the codec; not a
//! distributed key generation.

use crate::ciphertext::Ciphertext;
use crate::encrypt::key_mask;
use crate::group::random_scalar;
use crate::public_key::ThresholdPublicKey;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use k256::{ProjectivePoint, Scalar};

/// Public key plus the master secret it was derived from.
pub struct DealerKey {
    /// Public key distributed to clients and gateways.
    pub public_key: ThresholdPublicKey,
    /// Master secret `x` with `h = g^x`.
    pub secret: Scalar,
    /// Share of node `i` is `shares[i] = p(i + 1)`.
    pub shares: Vec<Scalar>,
}

/// Generate a key for `nodes` parties where `threshold` shares decrypt.
///
/// # Panics
///
/// Panics if `nodes` is zero or `threshold` is zero or above `nodes`.
pub fn generate_dealer_key(nodes: usize, threshold: usize) -> DealerKey {
    assert!(nodes > 0, "nodes must be positive");
    assert!(
        threshold > 0 && threshold <= nodes,
        "threshold must be in 1..=nodes"
    );

    let coefficients: Vec<Scalar> = (0..threshold).map(|_| random_scalar()).collect();
    let secret = coefficients[0];

    let shares: Vec<Scalar> = (1..=nodes as u64)
        .map(|i| {
            let x = Scalar::from(i);
            coefficients
                .iter()
                .rev()
                .fold(Scalar::ZERO, |acc, coeff| acc * x + coeff)
        })
        .collect();

    let g_bar = ProjectivePoint::GENERATOR * random_scalar();
    let h = ProjectivePoint::GENERATOR * secret;
    let h_array = shares
        .iter()
        .map(|share| ProjectivePoint::GENERATOR * share)
        .collect();

    let public_key =
        ThresholdPublicKey::new(g_bar, h, h_array).expect("dealer key has verification keys");

    DealerKey {
        public_key,
        secret,
        shares,
    }
}

/// Decrypt with the master secret, bypassing the threshold protocol.
pub fn decrypt_with_secret(ciphertext: &Ciphertext, secret: &Scalar) -> Option<Vec<u8>> {
    let tdh2 = ciphertext.threshold_ciphertext();
    let mask = key_mask(&(tdh2.u * secret));

    let mut key = [0u8; 32];
    for (out, (c, m)) in key.iter_mut().zip(tdh2.c.iter().zip(mask.iter())) {
        *out = c ^ m;
    }

    let cipher = Aes256Gcm::new_from_slice(&key).ok()?;
    cipher
        .decrypt(Nonce::from_slice(ciphertext.nonce()), ciphertext.sym_ctxt())
        .ok()
}
