//! Constantinople PVSS: DLEQ-proved shares and threshold coin reconstruction
//!
//! A dealer shares a secret through a random polynomial, publishing
//! `Vᵢ = sᵢ·g1` for each participant's evaluation `sᵢ`. To contribute to a
//! common coin, participant `i` blinds their share onto the coin's base point
//! `Gb = SHA-256(coin)·g1` and proves, with a non-interactive Chaum–Pedersen
//! DLEQ, that `(g1, Vᵢ)` and `(Gb, sᵢ·Gb)` share the discrete log `sᵢ` —
//! without revealing it. Anyone holding a quorum of verified proofs
//! interpolates the blinded shares in the exponent at zero and hashes the
//! result into the 32-byte coin.
//!
//! The challenge is Fiat–Shamir: SHA-256 over the five challenge points in a
//! fixed order, reduced into the scalar field. Proofs carry their index so
//! reconstruction operates on proofs alone.
//!
//! Note the coin base point's caveat in [`crate::hashing::coin_base_point`]:
//! whoever hashes the coin knows its discrete log, which weakens what the
//! DLEQ statement buys. Kept for compatibility.

#![forbid(unsafe_code)]

use ark_bn254::G1Projective;
use ark_ec::{AffineRepr, CurveGroup, Group, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};
use sha2::{Digest, Sha256};

use crate::scalar::{self, InterpolationError};
use crate::{hashing, F, G1};

/// Errors from proof verification and coin reconstruction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DleqError {
    /// A DLEQ equation does not hold for the published share commitment.
    #[error("DLEQ verification failed")]
    VerificationFailed,
    /// The participant id has no published share commitment.
    #[error("participant {id} out of range ({total} share commitments published)")]
    UnknownParticipant {
        /// The id the caller asked about.
        id: usize,
        /// Number of published share commitments.
        total: usize,
    },
    /// Proof indices were zero or not pairwise distinct.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

/// Published per-participant share commitments `Vᵢ = sᵢ·g1`.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicInfo {
    /// One commitment per participant, in dealing order.
    pub share_commitments: Vec<G1>,
}

/// A participant's private share: the polynomial evaluation at their index.
///
/// Not `Debug`; the value is the participant's secret.
#[derive(Clone, Copy, CanonicalSerialize, CanonicalDeserialize)]
pub struct Share {
    /// `poly(index)`.
    pub value: F,
    /// The participant's evaluation index.
    pub index: F,
}

/// A DLEQ proof that a blinded share matches the published commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Proof {
    /// `sᵢ·Gb`, the share blinded onto the coin base point.
    pub blinded_share: G1,
    /// `r·g1`, the nonce commitment on the fixed base.
    pub nonce_commitment: G1,
    /// `r·Gb`, the nonce commitment on the coin base.
    pub blinded_nonce_commitment: G1,
    /// `r + sᵢ·c` for the Fiat–Shamir challenge `c`.
    pub response: F,
    /// The participant's evaluation index, carried for reconstruction.
    pub index: F,
}

/// Deal shares of `secret` to the given indices through a random polynomial
/// of `degree` coefficients, publishing `sᵢ·g1` per participant.
pub fn generate_data(
    rng: &mut (impl CryptoRng + Rng),
    secret: F,
    indices: &[F],
    degree: usize,
) -> (PublicInfo, Vec<Share>) {
    let mut poly = Vec::with_capacity(degree);
    if degree > 0 {
        poly.push(secret);
        for _ in 1..degree {
            poly.push(scalar::rand_scalar(rng));
        }
    }

    let generator = G1Projective::generator();
    let mut share_commitments = Vec::with_capacity(indices.len());
    let mut shares = Vec::with_capacity(indices.len());
    for &index in indices {
        let value = scalar::evaluate_poly(&poly, index);
        share_commitments.push((generator * value).into_affine());
        shares.push(Share { value, index });
    }
    (PublicInfo { share_commitments }, shares)
}

/// Prove that this share, blinded onto the coin base point, matches the
/// dealer's published commitment.
///
/// The five challenge points are hashed in the fixed order
/// `(Gb, sᵢ·Gb, r·g1, r·Gb, sᵢ·g1)`; the share commitment is recomputed from
/// the share so proving needs no access to the published data.
pub fn generate_proof(rng: &mut (impl CryptoRng + Rng), share: &Share, coin: &[u8]) -> Proof {
    let coin_base = hashing::coin_base_point(coin);
    let generator = G1Projective::generator();
    let nonce = scalar::rand_scalar(rng);

    let blinded_share = (coin_base * share.value).into_affine();
    let nonce_commitment = (generator * nonce).into_affine();
    let blinded_nonce_commitment = (coin_base * nonce).into_affine();
    let share_commitment = (generator * share.value).into_affine();

    let challenge = hashing::challenge_scalar(&[
        coin_base.into_affine(),
        blinded_share,
        nonce_commitment,
        blinded_nonce_commitment,
        share_commitment,
    ]);
    let response = nonce + share.value * challenge;

    Proof {
        blinded_share,
        nonce_commitment,
        blinded_nonce_commitment,
        response,
        index: share.index,
    }
}

/// Verify participant `id`'s proof for the given coin.
///
/// Checks both Chaum–Pedersen equations against the recomputed challenge:
/// `response·g1 = r·g1 + c·Vᵢ` and `response·Gb = r·Gb + c·(sᵢ·Gb)`.
pub fn verify_proof(
    pi: &PublicInfo,
    id: usize,
    coin: &[u8],
    proof: &Proof,
) -> Result<(), DleqError> {
    let total = pi.share_commitments.len();
    let share_commitment = *pi
        .share_commitments
        .get(id)
        .ok_or(DleqError::UnknownParticipant { id, total })?;

    let coin_base = hashing::coin_base_point(coin);
    let challenge = hashing::challenge_scalar(&[
        coin_base.into_affine(),
        proof.blinded_share,
        proof.nonce_commitment,
        proof.blinded_nonce_commitment,
        share_commitment,
    ]);

    let generator = G1Projective::generator();
    if generator * proof.response
        != proof.nonce_commitment.into_group() + share_commitment.into_group() * challenge
    {
        return Err(DleqError::VerificationFailed);
    }
    if coin_base * proof.response
        != proof.blinded_nonce_commitment.into_group()
            + proof.blinded_share.into_group() * challenge
    {
        return Err(DleqError::VerificationFailed);
    }
    Ok(())
}

/// Reconstruct the coin from a quorum of proofs: interpolate the blinded
/// shares in the exponent at zero and hash the resulting point.
///
/// Requires at least as many proofs as the dealing polynomial has
/// coefficients, with nonzero pairwise-distinct indices. The digest is a
/// deterministic function of the dealt secret and the coin, so any
/// sufficient quorum yields the same 32 bytes.
pub fn reconstruct(proofs: &[Proof]) -> Result<[u8; 32], DleqError> {
    let indices: Vec<F> = proofs.iter().map(|proof| proof.index).collect();
    let weights = scalar::lagrange_weights_at_zero(&indices)?;
    let bases: Vec<G1> = proofs.iter().map(|proof| proof.blinded_share).collect();
    let interpolated = G1Projective::msm_unchecked(&bases, &weights).into_affine();
    tracing::debug!(proofs = proofs.len(), "coin reconstructed");
    Ok(Sha256::digest(hashing::canonical_bytes(&interpolated)).into())
}
