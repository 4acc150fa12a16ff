//! # Threshold Ciphertexts
//!
//! A [`Ciphertext`] is what clients submit (hex-encoded) as a secret's
//! encrypted value. It wraps:
//!
//! - a [`ThresholdCiphertext`]: the TDH2 encapsulation of a 32-byte key,
//!   carrying a proof bound to the vault public key;
//! - the AES-256-GCM sealed payload and its nonce.
//!
//! ## Authentication
//!
//! [`ThresholdCiphertext::verify`] recomputes
//!
//! ```text
//! w     = g^f     / u^e
//! w_bar = g_bar^f / u_bar^e
//! e'    = H(c, label, u, w, u_bar, w_bar)
//! ```
//!
//! and accepts iff `e' == e`. A ciphertext built for another key, or one with
//! any proof component altered, fails this check. The sealed payload is only
//! authenticated on decryption.

use crate::group::{decode_point, decode_scalar, encode_point, encode_scalar, hash_to_scalar};
use crate::public_key::ThresholdPublicKey;
use crate::CryptoError;
use k256::{ProjectivePoint, Scalar};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use subtle::ConstantTimeEq;

/// Length of the encapsulated symmetric key.
pub const KEY_LEN: usize = 32;

/// Length of the ciphertext label.
pub const LABEL_LEN: usize = 32;

/// AES-GCM nonce length.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length.
pub const TAG_LEN: usize = 16;

const PROOF_TAG: &[u8] = b"vault-tdh2-proof-v1";

/// TDH2 encapsulation of a symmetric key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdCiphertext {
    pub(crate) group: String,
    pub(crate) c: [u8; KEY_LEN],
    pub(crate) label: [u8; LABEL_LEN],
    pub(crate) u: ProjectivePoint,
    pub(crate) u_bar: ProjectivePoint,
    pub(crate) e: Scalar,
    pub(crate) f: Scalar,
}

impl ThresholdCiphertext {
    /// Group the ciphertext was produced in.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Label bound into the proof.
    pub fn label(&self) -> &[u8; LABEL_LEN] {
        &self.label
    }

    /// Check the consistency proof against `public_key`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::GroupMismatch` if the groups differ
    /// - `CryptoError::InvalidProof` if the proof does not hold
    pub fn verify(&self, public_key: &ThresholdPublicKey) -> Result<(), CryptoError> {
        if self.group != public_key.group() {
            return Err(CryptoError::GroupMismatch {
                expected: public_key.group().to_string(),
                actual: self.group.clone(),
            });
        }

        let w = ProjectivePoint::GENERATOR * self.f - self.u * self.e;
        let w_bar = *public_key.g_bar() * self.f - self.u_bar * self.e;
        let expected = proof_challenge(&self.c, &self.label, &self.u, &w, &self.u_bar, &w_bar);

        if bool::from(expected.ct_eq(&self.e)) {
            Ok(())
        } else {
            Err(CryptoError::InvalidProof)
        }
    }
}

/// Fiat-Shamir challenge of the TDH2 proof.
pub(crate) fn proof_challenge(
    c: &[u8; KEY_LEN],
    label: &[u8; LABEL_LEN],
    u: &ProjectivePoint,
    w: &ProjectivePoint,
    u_bar: &ProjectivePoint,
    w_bar: &ProjectivePoint,
) -> Scalar {
    hash_to_scalar(
        PROOF_TAG,
        &[
            c.as_slice(),
            label.as_slice(),
            encode_point(u).as_slice(),
            encode_point(w).as_slice(),
            encode_point(u_bar).as_slice(),
            encode_point(w_bar).as_slice(),
        ],
    )
}

/// Ciphertext envelope as submitted by clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub(crate) tdh2: ThresholdCiphertext,
    pub(crate) sym_ctxt: Vec<u8>,
    pub(crate) nonce: [u8; NONCE_LEN],
}

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdCiphertextWire {
    group: String,
    #[serde_as(as = "Base64")]
    c: Vec<u8>,
    #[serde_as(as = "Base64")]
    label: Vec<u8>,
    #[serde_as(as = "Base64")]
    u: Vec<u8>,
    #[serde_as(as = "Base64")]
    u_bar: Vec<u8>,
    #[serde_as(as = "Base64")]
    e: Vec<u8>,
    #[serde_as(as = "Base64")]
    f: Vec<u8>,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CiphertextWire {
    tdh2_ctxt: ThresholdCiphertextWire,
    #[serde_as(as = "Base64")]
    sym_ctxt: Vec<u8>,
    #[serde_as(as = "Base64")]
    nonce: Vec<u8>,
}

impl Ciphertext {
    /// The TDH2 encapsulation.
    pub fn threshold_ciphertext(&self) -> &ThresholdCiphertext {
        &self.tdh2
    }

    /// Sealed payload, tag included.
    pub fn sym_ctxt(&self) -> &[u8] {
        &self.sym_ctxt
    }

    /// AES-GCM nonce.
    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// Check the encapsulation proof against `public_key`.
    pub fn verify(&self, public_key: &ThresholdPublicKey) -> Result<(), CryptoError> {
        self.tdh2.verify(public_key)
    }

    /// Serialize to the JSON wire form.
    pub fn marshal(&self) -> Result<Vec<u8>, CryptoError> {
        let wire = CiphertextWire {
            tdh2_ctxt: ThresholdCiphertextWire {
                group: self.tdh2.group.clone(),
                c: self.tdh2.c.to_vec(),
                label: self.tdh2.label.to_vec(),
                u: encode_point(&self.tdh2.u),
                u_bar: encode_point(&self.tdh2.u_bar),
                e: encode_scalar(&self.tdh2.e),
                f: encode_scalar(&self.tdh2.f),
            },
            sym_ctxt: self.sym_ctxt.clone(),
            nonce: self.nonce.to_vec(),
        };
        serde_json::to_vec(&wire).map_err(|e| CryptoError::Malformed {
            what: "ciphertext",
            reason: e.to_string(),
        })
    }

    /// Parse the JSON wire form without checking the proof.
    ///
    /// Every group element and scalar is decoded, so a successful parse means
    /// the ciphertext is structurally well-formed.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, CryptoError> {
        let wire: CiphertextWire =
            serde_json::from_slice(bytes).map_err(|e| CryptoError::Malformed {
                what: "ciphertext",
                reason: e.to_string(),
            })?;

        let t = wire.tdh2_ctxt;
        let tdh2 = ThresholdCiphertext {
            group: t.group,
            c: fixed(&t.c, "c")?,
            label: fixed(&t.label, "label")?,
            u: decode_point(&t.u, "u")?,
            u_bar: decode_point(&t.u_bar, "u_bar")?,
            e: decode_scalar(&t.e, "e")?,
            f: decode_scalar(&t.f, "f")?,
        };

        if wire.sym_ctxt.len() < TAG_LEN {
            return Err(CryptoError::Malformed {
                what: "ciphertext",
                reason: format!(
                    "sealed payload is {} bytes, shorter than the {} byte tag",
                    wire.sym_ctxt.len(),
                    TAG_LEN
                ),
            });
        }

        Ok(Self {
            tdh2,
            sym_ctxt: wire.sym_ctxt,
            nonce: fixed(&wire.nonce, "nonce")?,
        })
    }

    /// Parse and authenticate in one step.
    ///
    /// This is the check the gateway runs on every write item when it holds
    /// the vault public key.
    pub fn unmarshal_verify(
        bytes: &[u8],
        public_key: &ThresholdPublicKey,
    ) -> Result<Self, CryptoError> {
        let ciphertext = Self::unmarshal(bytes)?;
        ciphertext.verify(public_key)?;
        Ok(ciphertext)
    }
}

fn fixed<const N: usize>(bytes: &[u8], field: &'static str) -> Result<[u8; N], CryptoError> {
    bytes.try_into().map_err(|_| CryptoError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
