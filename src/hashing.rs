//! Challenge hashing and digest helpers
//!
//! Two SHA-256 constructions belong to the wire protocol and must stay
//! bit-compatible:
//!
//! - the DLEQ Fiat–Shamir challenge: SHA-256 over the concatenated canonical
//!   encodings of the challenge points, read as a big-endian integer and
//!   reduced into the scalar field at the point of use;
//! - the coin base point: `SHA-256(coin)` read the same way and multiplied
//!   onto the G1 base point.
//!
//! The BLAKE3 digest at the bottom is *not* part of any protocol; it gives
//! callers a stable fingerprint of large public artifacts (the commitment
//! key) for audit trails, with a domain prefix and length-delimited parts so
//! concatenation cannot collide across part boundaries.

#![forbid(unsafe_code)]

use ark_ec::Group;
use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};

use crate::{F, G1};

/// Serialize a curve point or scalar to its canonical compressed bytes.
pub(crate) fn canonical_bytes<T: CanonicalSerialize>(value: &T) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(value.compressed_size());
    value
        .serialize_compressed(&mut bytes)
        .expect("canonical serialization into a Vec cannot fail");
    bytes
}

/// SHA-256 over the concatenated canonical encodings of `points`, interpreted
/// as a big-endian integer and reduced modulo the group order.
///
/// Point order is significant; callers fix it per protocol step.
pub fn challenge_scalar(points: &[G1]) -> F {
    let mut hasher = Sha256::new();
    for point in points {
        hasher.update(canonical_bytes(point));
    }
    let digest = hasher.finalize();
    F::from_be_bytes_mod_order(&digest)
}

/// Derive the coin base point `Gb = SHA-256(coin)·g1`.
///
/// The hasher learns the discrete log of the returned point, so this is not
/// a real hash-to-curve; a standard encoding (e.g. SVDW for BN254) would
/// remove that knowledge. Preserved as-is for compatibility with existing
/// coin transcripts.
pub fn coin_base_point(coin: &[u8]) -> ark_bn254::G1Projective {
    let digest = Sha256::digest(coin);
    ark_bn254::G1Projective::generator() * F::from_be_bytes_mod_order(&digest)
}

/// BLAKE3 audit digest over length-delimited parts with a fixed domain prefix.
pub fn audit_digest(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"polycrypto.digest.v1");
    for part in parts {
        hasher.update(&(part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
