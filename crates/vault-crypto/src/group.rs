//! # Group Codec (secp256k1)
//!
//! Point and scalar encodings shared by keys and ciphertexts, plus the
//! domain-separated hash-to-scalar used for proof challenges.
//!
//! Points are compressed SEC1 (33 bytes); scalars are big-endian 32 bytes and
//! must be canonical (below the group order).

use crate::CryptoError;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};
use sha2::{Digest, Sha256};

/// Name of the only group this codec speaks.
pub const GROUP_NAME: &str = "secp256k1";

/// Compressed SEC1 point length.
pub const POINT_LEN: usize = 33;

/// Scalar length.
pub const SCALAR_LEN: usize = 32;

/// Encode a point in compressed SEC1 form.
pub fn encode_point(point: &ProjectivePoint) -> Vec<u8> {
    AffinePoint::from(*point)
        .to_encoded_point(true)
        .as_bytes()
        .to_vec()
}

/// Decode a compressed SEC1 point.
///
/// Only the 0x02/0x03 tags are accepted, so each point has exactly one
/// encoding. The identity is rejected.
pub fn decode_point(bytes: &[u8], field: &'static str) -> Result<ProjectivePoint, CryptoError> {
    if bytes.len() != POINT_LEN {
        return Err(CryptoError::InvalidLength {
            field,
            expected: POINT_LEN,
            actual: bytes.len(),
        });
    }

    // Only the compressed tags; SEC1 also admits 0x05 (compact) at this length.
    if !matches!(bytes[0], 0x02 | 0x03) {
        return Err(CryptoError::InvalidPoint {
            field,
            reason: format!("expected compressed SEC1 tag, got {:#04x}", bytes[0]),
        });
    }

    let encoded = EncodedPoint::from_bytes(bytes).map_err(|e| CryptoError::InvalidPoint {
        field,
        reason: e.to_string(),
    })?;

    let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
    let affine = affine.ok_or_else(|| CryptoError::InvalidPoint {
        field,
        reason: "not on curve".to_string(),
    })?;

    Ok(ProjectivePoint::from(affine))
}

/// Encode a scalar as 32 big-endian bytes.
pub fn encode_scalar(scalar: &Scalar) -> Vec<u8> {
    scalar.to_repr().to_vec()
}

/// Decode a canonical 32-byte scalar.
pub fn decode_scalar(bytes: &[u8], field: &'static str) -> Result<Scalar, CryptoError> {
    if bytes.len() != SCALAR_LEN {
        return Err(CryptoError::InvalidLength {
            field,
            expected: SCALAR_LEN,
            actual: bytes.len(),
        });
    }

    let repr = FieldBytes::clone_from_slice(bytes);
    Option::<Scalar>::from(Scalar::from_repr(repr)).ok_or(CryptoError::InvalidScalar { field })
}

/// Hash `parts` under `tag` into a scalar.
///
/// Every part is length-prefixed so that moving bytes between adjacent parts
/// changes the digest.
pub fn hash_to_scalar(tag: &[u8], parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha256::new();
    hasher.update((tag.len() as u32).to_be_bytes());
    hasher.update(tag);
    for part in parts {
        hasher.update((part.len() as u32).to_be_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();
    <Scalar as Reduce<U256>>::reduce_bytes(&digest)
}

/// Uniformly random scalar.
pub fn random_scalar() -> Scalar {
    Scalar::random(&mut rand::thread_rng())
}
