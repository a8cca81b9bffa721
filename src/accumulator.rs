//! Bilinear accumulator: a credential set committed as polynomial roots
//!
//! The set `{c₁, …, cₙ}` becomes the monic polynomial `P(x) = Πₖ (x − cₖ)`,
//! committed with the PolyCommit core. A credential `d` is a member exactly
//! when `P(d) = 0`, i.e. when `(x − d)` divides `P`, so the membership
//! witness is the ordinary evaluation witness at `d` for the value 0 and the
//! verifier runs the same pairing check the commitment scheme already has.

#![forbid(unsafe_code)]

use ark_ff::{One, Zero};

use crate::polycommit::{Commitment, PolyCommitError, PublicKey, Witness};
use crate::F;

/// Errors from accumulator operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccumulatorError {
    /// The queried credential is not a root of the accumulated polynomial.
    #[error("credential is not a member of the accumulated set")]
    NotAMember,
    /// The underlying commitment or witness operation failed.
    #[error(transparent)]
    Commit(#[from] PolyCommitError),
}

/// Expand a credential set into the monic polynomial with those roots.
///
/// Naive O(n²) convolution: starting from the unit polynomial, each
/// credential `c` folds in a factor `(x − c)` in place, high index first so
/// the shift reads coefficients not yet overwritten. The result has length
/// `credentials.len() + 1` and leading coefficient 1.
pub fn expand(credentials: &[F]) -> Vec<F> {
    let mut poly = vec![F::zero(); credentials.len() + 1];
    poly[0] = F::one();
    for (i, cred) in credentials.iter().enumerate() {
        for j in (1..=i + 1).rev() {
            poly[j] = poly[j - 1] - poly[j] * *cred;
        }
        poly[0] = -(poly[0] * *cred);
    }
    poly
}

/// Commit to an expanded credential polynomial.
pub fn evaluate(pk: &PublicKey, poly: &[F]) -> Result<Commitment, AccumulatorError> {
    Ok(pk.commit(poly)?)
}

/// Produce the membership witness for `credential`.
///
/// Fails with [`AccumulatorError::NotAMember`] when the credential is not a
/// root of `poly` (the division leaves a nonzero remainder).
pub fn create_witness(
    pk: &PublicKey,
    poly: &[F],
    credential: F,
) -> Result<Witness, AccumulatorError> {
    let (value, witness) = pk.create_witness(poly, credential)?;
    if !value.is_zero() {
        return Err(AccumulatorError::NotAMember);
    }
    Ok(witness)
}

/// Verify a membership witness: the pairing check at evaluation value 0.
pub fn verify(pk: &PublicKey, commitment: &Commitment, witness: &Witness, credential: F) -> bool {
    pk.verify_eval(commitment, credential, F::zero(), witness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar;
    use rand::thread_rng;

    #[test]
    fn expansion_of_a_small_set_matches_by_hand() {
        // (x − 2)(x − 3) = x² − 5x + 6
        let poly = expand(&[F::from(2u64), F::from(3u64)]);
        assert_eq!(
            poly,
            vec![
                scalar::from_signed(6),
                scalar::from_signed(-5),
                scalar::from_signed(1)
            ]
        );
    }

    #[test]
    fn expansion_of_the_empty_set_is_the_unit_polynomial() {
        assert_eq!(expand(&[]), vec![F::one()]);
    }

    #[test]
    fn expansion_is_monic_with_the_credentials_as_roots() {
        let mut rng = thread_rng();
        let credentials: Vec<F> = (0..6).map(|_| scalar::rand_scalar(&mut rng)).collect();
        let poly = expand(&credentials);
        assert_eq!(poly.len(), credentials.len() + 1);
        assert_eq!(*poly.last().unwrap(), F::one());
        for cred in &credentials {
            assert!(scalar::evaluate_poly(&poly, *cred).is_zero());
        }
        let outsider = scalar::rand_scalar(&mut rng);
        if !credentials.contains(&outsider) {
            assert!(!scalar::evaluate_poly(&poly, outsider).is_zero());
        }
    }

    #[test]
    fn membership_witnesses_verify_and_outsiders_are_rejected() {
        let mut rng = thread_rng();
        let pk = PublicKey::setup(&mut rng, 3);
        let credentials = [F::from(2u64), F::from(3u64)];
        let poly = expand(&credentials);
        let commitment = evaluate(&pk, &poly).unwrap();

        for cred in credentials {
            let witness = create_witness(&pk, &poly, cred).unwrap();
            assert!(verify(&pk, &commitment, &witness, cred));
        }

        assert_eq!(
            create_witness(&pk, &poly, F::from(5u64)),
            Err(AccumulatorError::NotAMember)
        );

        // A member's witness does not vouch for anyone else.
        let witness = create_witness(&pk, &poly, F::from(2u64)).unwrap();
        assert!(!verify(&pk, &commitment, &witness, F::from(5u64)));
    }

    #[test]
    fn oversized_sets_are_rejected_by_the_key() {
        let pk = PublicKey::setup(&mut thread_rng(), 3);
        let poly = expand(&[F::from(1u64), F::from(2u64), F::from(3u64)]);
        assert!(matches!(
            evaluate(&pk, &poly),
            Err(AccumulatorError::Commit(
                PolyCommitError::DegreeExceedsKey { .. }
            ))
        ));
    }
}
