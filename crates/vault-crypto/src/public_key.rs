//! # Threshold Public Key
//!
//! The vault's TDH2 public key: the second generator `g_bar`, the combined
//! key `h = g^x` and one verification key per node (`h_array[i] = g^x_i`).
//! Only `g_bar` and the group name take part in ciphertext authentication;
//! `h` is what clients encrypt to.

use crate::group::{decode_point, encode_point, GROUP_NAME};
use crate::CryptoError;
use k256::ProjectivePoint;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Threshold public key shared by all vault nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThresholdPublicKey {
    group: String,
    g_bar: ProjectivePoint,
    h: ProjectivePoint,
    h_array: Vec<ProjectivePoint>,
}

#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PublicKeyWire {
    group: String,
    #[serde_as(as = "Base64")]
    g_bar: Vec<u8>,
    #[serde_as(as = "Base64")]
    h: Vec<u8>,
    #[serde_as(as = "Vec<Base64>")]
    h_array: Vec<Vec<u8>>,
}

impl ThresholdPublicKey {
    /// Assemble a key from its group elements.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::Malformed` if `h_array` is empty.
    pub fn new(
        g_bar: ProjectivePoint,
        h: ProjectivePoint,
        h_array: Vec<ProjectivePoint>,
    ) -> Result<Self, CryptoError> {
        if h_array.is_empty() {
            return Err(CryptoError::Malformed {
                what: "public key",
                reason: "no verification keys".to_string(),
            });
        }
        Ok(Self {
            group: GROUP_NAME.to_string(),
            g_bar,
            h,
            h_array,
        })
    }

    /// Group name.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Second generator used by the consistency proof.
    pub fn g_bar(&self) -> &ProjectivePoint {
        &self.g_bar
    }

    /// Combined public key.
    pub fn h(&self) -> &ProjectivePoint {
        &self.h
    }

    /// Per-node verification keys.
    pub fn verification_keys(&self) -> &[ProjectivePoint] {
        &self.h_array
    }

    /// Number of nodes holding a key share.
    pub fn nodes(&self) -> usize {
        self.h_array.len()
    }

    /// Serialize to the JSON wire form.
    pub fn marshal(&self) -> Result<Vec<u8>, CryptoError> {
        let wire = PublicKeyWire {
            group: self.group.clone(),
            g_bar: encode_point(&self.g_bar),
            h: encode_point(&self.h),
            h_array: self.h_array.iter().map(encode_point).collect(),
        };
        serde_json::to_vec(&wire).map_err(|e| CryptoError::Malformed {
            what: "public key",
            reason: e.to_string(),
        })
    }

    /// Parse the JSON wire form.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, an unknown group, undecodable points or an
    /// empty verification key list.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, CryptoError> {
        let wire: PublicKeyWire =
            serde_json::from_slice(bytes).map_err(|e| CryptoError::Malformed {
                what: "public key",
                reason: e.to_string(),
            })?;

        if wire.group != GROUP_NAME {
            return Err(CryptoError::GroupMismatch {
                expected: GROUP_NAME.to_string(),
                actual: wire.group,
            });
        }

        let g_bar = decode_point(&wire.g_bar, "g_bar")?;
        let h = decode_point(&wire.h, "h")?;
        let h_array = wire
            .h_array
            .iter()
            .map(|bytes| decode_point(bytes, "h_array"))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(g_bar, h, h_array)
    }
}
