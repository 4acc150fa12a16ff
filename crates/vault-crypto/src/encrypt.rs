//! # Client-Side Encryption
//!
//! Encrypts a secret to the vault's threshold public key, producing the
//! [`Ciphertext`] a client hex-encodes into a write request.
//!
//! ## Steps
//!
//! 1. Seal the plaintext with AES-256-GCM under a fresh random key `k`.
//! 2. Encapsulate `k` as `c = k XOR H(h^r)`, `u = g^r`, `u_bar = g_bar^r`.
//! 3. Prove `log_g(u) == log_g_bar(u_bar)` with a Schnorr-style proof
//!    `(e, f)` over nonce `s`.

use crate::ciphertext::{
    proof_challenge, Ciphertext, ThresholdCiphertext, KEY_LEN, LABEL_LEN, NONCE_LEN,
};
use crate::group::{encode_point, random_scalar};
use crate::public_key::ThresholdPublicKey;
use crate::CryptoError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use k256::ProjectivePoint;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

const KEY_MASK_TAG: &[u8] = b"vault-tdh2-key-mask-v1";

/// Encrypt `plaintext` to `public_key` with the all-zero label.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if sealing fails.
pub fn encrypt(
    public_key: &ThresholdPublicKey,
    plaintext: &[u8],
) -> Result<Ciphertext, CryptoError> {
    encrypt_with_label(public_key, plaintext, [0u8; LABEL_LEN])
}

/// Encrypt `plaintext` to `public_key`, binding `label` into the proof.
pub fn encrypt_with_label(
    public_key: &ThresholdPublicKey,
    plaintext: &[u8],
    label: [u8; LABEL_LEN],
) -> Result<Ciphertext, CryptoError> {
    let mut rng = rand::thread_rng();

    let mut key = [0u8; KEY_LEN];
    rng.fill_bytes(&mut key);
    let mut nonce = [0u8; NONCE_LEN];
    rng.fill_bytes(&mut nonce);

    let sealed = seal(&key, &nonce, plaintext);

    // Encapsulate before checking the seal result so `key` is wiped on
    // both paths.
    let r = random_scalar();
    let s = random_scalar();

    let mask = key_mask(&(*public_key.h() * r));
    let mut c = [0u8; KEY_LEN];
    for (out, (k, m)) in c.iter_mut().zip(key.iter().zip(mask.iter())) {
        *out = k ^ m;
    }
    key.zeroize();
    let sym_ctxt = sealed?;

    let u = ProjectivePoint::GENERATOR * r;
    let w = ProjectivePoint::GENERATOR * s;
    let u_bar = *public_key.g_bar() * r;
    let w_bar = *public_key.g_bar() * s;

    let e = proof_challenge(&c, &label, &u, &w, &u_bar, &w_bar);
    let f = s + r * e;

    Ok(Ciphertext {
        tdh2: ThresholdCiphertext {
            group: public_key.group().to_string(),
            c,
            label,
            u,
            u_bar,
            e,
            f,
        },
        sym_ctxt,
        nonce,
    })
}

/// Mask applied to the symmetric key, derived from the shared point `h^r`.
pub(crate) fn key_mask(shared: &ProjectivePoint) -> [u8; KEY_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(KEY_MASK_TAG);
    hasher.update(encode_point(shared));
    hasher.finalize().into()
}

fn seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;
    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))
}
