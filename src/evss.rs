//! Efficient verifiable secret sharing (eVSS)
//!
//! The dealer-side half of Kate–Zaverucha–Goldberg §4.1: a secret is the
//! constant term of a random polynomial, the dealer publishes a commitment
//! key plus the polynomial's commitment as [`PublicInfo`], and each recipient
//! gets a [`Share`] — their index, the evaluation there, and the evaluation
//! witness. Recipients verify their share against the public info alone;
//! a quorum of at least `degree` distinct shares reconstructs the constant
//! by Lagrange interpolation at zero.
//!
//! This module is a set of pure functions: the library never talks to
//! recipients, the caller moves the artifacts. Shares are small and travel
//! by value; [`PublicInfo`] carries the full commitment key and should be
//! distributed once.

#![forbid(unsafe_code)]

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};

use crate::polycommit::{Commitment, PolyCommitError, PublicKey, Witness};
use crate::scalar::{self, InterpolationError};
use crate::{hashing, F};

/// Errors surfaced by dealer and reconstruction operations.
#[derive(Debug, thiserror::Error)]
pub enum EvssError {
    /// The underlying commitment or witness operation failed.
    #[error(transparent)]
    Commit(#[from] PolyCommitError),
    /// Reconstruction indices were zero or not pairwise distinct.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
    /// Wire bytes did not decode to a well-formed object.
    #[error("deserialization error: {0}")]
    Deserialize(String),
}

/// The dealer's secret: a polynomial whose constant term is the shared value.
///
/// Exists only on the dealer; discard it once shares are dealt. Deliberately
/// not `Debug` so the coefficients don't end up in logs.
#[derive(Clone)]
pub struct Secret {
    /// Coefficients low→high; `poly[0]` is the shared constant.
    pub poly: Vec<F>,
}

/// Public information recipients verify against: the commitment key and the
/// dealer's polynomial commitment.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicInfo {
    /// Commitment key sized to the secret polynomial.
    pub pk: PublicKey,
    /// Commitment to the secret polynomial.
    pub commitment: Commitment,
}

/// One recipient's share: a witnessed evaluation of the secret polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Share {
    /// The recipient's evaluation index.
    pub index: F,
    /// `poly(index)`.
    pub value: F,
    /// Witness for the evaluation.
    pub witness: Witness,
}

/// Draw a secret polynomial of `degree` coefficients with the given constant
/// term; the remaining coefficients are uniform.
pub fn generate_secret(rng: &mut (impl CryptoRng + Rng), constant: F, degree: usize) -> Secret {
    let mut poly = Vec::with_capacity(degree);
    if degree > 0 {
        poly.push(constant);
        for _ in 1..degree {
            poly.push(scalar::rand_scalar(rng));
        }
    }
    Secret { poly }
}

/// Set up a fresh commitment key sized to `secret` and commit to it.
pub fn generate_public_info(
    rng: &mut (impl CryptoRng + Rng),
    secret: &Secret,
) -> Result<PublicInfo, EvssError> {
    let pk = PublicKey::setup(rng, secret.poly.len());
    let commitment = pk.commit(&secret.poly)?;
    Ok(PublicInfo { pk, commitment })
}

/// Produce the share for `index`: the evaluation there plus its witness.
pub fn generate_share(
    pi: &PublicInfo,
    secret: &Secret,
    index: F,
) -> Result<Share, EvssError> {
    let (value, witness) = pi.pk.create_witness(&secret.poly, index)?;
    Ok(Share {
        index,
        value,
        witness,
    })
}

/// Check a share against the dealer's commitment.
pub fn verify_share(pi: &PublicInfo, share: &Share) -> bool {
    pi.pk
        .verify_eval(&pi.commitment, share.index, share.value, &share.witness)
}

/// Reconstruct the shared constant from a quorum of shares.
///
/// Indices must be nonzero and pairwise distinct, and the quorum must hold at
/// least as many shares as the secret polynomial has coefficients — with
/// fewer, the interpolation yields an unrelated value.
pub fn reconstruct_secret(shares: &[Share]) -> Result<F, EvssError> {
    let indices: Vec<F> = shares.iter().map(|share| share.index).collect();
    let weights = scalar::lagrange_weights_at_zero(&indices)?;
    tracing::debug!(shares = shares.len(), "reconstructing shared constant");
    let constant = weights
        .iter()
        .zip(shares.iter())
        .map(|(weight, share)| *weight * share.value)
        .sum();
    Ok(constant)
}

// ----------------------------------------------------------------------------
// Wire encoding
// ----------------------------------------------------------------------------

impl PublicInfo {
    /// Canonical compressed encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        hashing::canonical_bytes(self)
    }

    /// Decode from canonical bytes, rejecting malformed commitment keys.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, EvssError> {
        let pi = Self::deserialize_compressed(&mut bytes)
            .map_err(|e| EvssError::Deserialize(e.to_string()))?;
        pi.pk
            .check_shape()
            .map_err(|e| EvssError::Deserialize(e.to_string()))?;
        Ok(pi)
    }
}

impl Share {
    /// Canonical compressed encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        hashing::canonical_bytes(self)
    }

    /// Decode from canonical bytes.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, EvssError> {
        Self::deserialize_compressed(&mut bytes)
            .map_err(|e| EvssError::Deserialize(e.to_string()))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    const DEGREE: usize = 16;

    fn dealt_secret() -> (F, Secret, PublicInfo) {
        let mut rng = thread_rng();
        let constant = scalar::rand_scalar(&mut rng);
        let secret = generate_secret(&mut rng, constant, DEGREE);
        let pi = generate_public_info(&mut rng, &secret).unwrap();
        (constant, secret, pi)
    }

    #[test]
    fn secret_has_requested_shape() {
        let mut rng = thread_rng();
        let constant = F::from(42u64);
        let secret = generate_secret(&mut rng, constant, DEGREE);
        assert_eq!(secret.poly.len(), DEGREE);
        assert_eq!(secret.poly[0], constant);

        assert!(generate_secret(&mut rng, constant, 0).poly.is_empty());
    }

    #[test]
    fn honest_shares_verify_and_tampered_values_do_not() {
        let mut rng = thread_rng();
        let (_, secret, pi) = dealt_secret();
        for i in 0..DEGREE as u64 {
            let share = generate_share(&pi, &secret, F::from(i)).unwrap();
            assert!(verify_share(&pi, &share));

            let mut tampered = share;
            tampered.value = scalar::rand_scalar(&mut rng);
            if tampered.value != share.value {
                assert!(!verify_share(&pi, &tampered));
            }
        }
    }

    #[test]
    fn quorum_reconstructs_the_constant() {
        let (constant, secret, pi) = dealt_secret();
        let shares: Vec<Share> = (1..=DEGREE as u64)
            .map(|i| generate_share(&pi, &secret, F::from(i)).unwrap())
            .collect();
        assert_eq!(reconstruct_secret(&shares).unwrap(), constant);
    }

    #[test]
    fn reconstruction_rejects_bad_indices() {
        let (_, secret, pi) = dealt_secret();
        let mut shares: Vec<Share> = (1..=DEGREE as u64)
            .map(|i| generate_share(&pi, &secret, F::from(i)).unwrap())
            .collect();

        shares[0].index = F::from(0u64);
        assert!(matches!(
            reconstruct_secret(&shares),
            Err(EvssError::Interpolation(InterpolationError::ZeroIndex))
        ));

        shares[0].index = shares[1].index;
        assert!(matches!(
            reconstruct_secret(&shares),
            Err(EvssError::Interpolation(InterpolationError::RepeatedIndex))
        ));
    }

    #[test]
    fn wire_roundtrip_preserves_verification() {
        let mut rng = thread_rng();
        let (_, secret, pi) = dealt_secret();
        let restored_pi = PublicInfo::from_bytes(&pi.to_bytes()).unwrap();
        assert_eq!(pi, restored_pi);

        for i in 0..DEGREE as u64 {
            let share = generate_share(&pi, &secret, F::from(i)).unwrap();
            let restored = Share::from_bytes(&share.to_bytes()).unwrap();
            assert_eq!(share, restored);
            assert!(verify_share(&restored_pi, &restored));

            let mut tampered = restored;
            tampered.value = scalar::rand_scalar(&mut rng);
            if tampered.value != share.value {
                assert!(!verify_share(&restored_pi, &tampered));
            }
        }
    }

    #[test]
    fn public_info_bytes_reject_garbage() {
        assert!(matches!(
            PublicInfo::from_bytes(&[0xffu8; 16]),
            Err(EvssError::Deserialize(_))
        ));
    }
}
