//! Scalar façade over the BN254 scalar field
//!
//! Everything here is plain `Fr` arithmetic shared by the commitment core and
//! both secret-sharing protocols: uniform sampling, canonicalization of signed
//! integers at the input boundary, Horner evaluation, and the Lagrange-at-zero
//! weights both reconstruction paths use (scalar-side in eVSS, exponent-side
//! in Constantinople).
//!
//! The weights are computed through the product identity
//! `λᵢ(0) = [Πⱼ≠ᵢ (1 − xᵢ·xⱼ⁻¹)]⁻¹`, which needs every index to be nonzero
//! (each `xⱼ` is inverted) and pairwise distinct (a repeated index zeroes a
//! factor). Violations surface as [`InterpolationError`] instead of a failed
//! inverse deep in a caller.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use ark_ff::{Field, One, UniformRand, Zero};
use rand::{CryptoRng, Rng};

use crate::F;

/// Errors from Lagrange weight computation over a quorum's indices.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InterpolationError {
    /// An index was zero; interpolation at zero inverts every index.
    #[error("interpolation index is zero")]
    ZeroIndex,
    /// Two quorum members claimed the same index.
    #[error("interpolation indices are not pairwise distinct")]
    RepeatedIndex,
}

/// Sample a scalar uniformly from [0, q).
#[inline]
pub fn rand_scalar(rng: &mut (impl CryptoRng + Rng)) -> F {
    F::rand(rng)
}

/// Canonicalize a signed integer into [0, q).
///
/// A negative input maps to the additive inverse of its absolute value, so
/// `c·P` for signed `c` equals `|c|·P` negated — the same group element the
/// sign-splitting formulation produces.
#[inline]
pub fn from_signed(value: i64) -> F {
    if value < 0 {
        -F::from(value.unsigned_abs())
    } else {
        F::from(value as u64)
    }
}

/// Evaluate `poly` at `x` by Horner's rule. Empty polynomials evaluate to 0.
pub fn evaluate_poly(poly: &[F], x: F) -> F {
    let mut acc = F::zero();
    for coeff in poly.iter().rev() {
        acc = acc * x + coeff;
    }
    acc
}

/// Lagrange coefficients at zero for the given evaluation indices.
///
/// Returns `λᵢ` such that `f(0) = Σᵢ λᵢ·f(xᵢ)` for any polynomial `f` of
/// degree below `indices.len()`. The coefficients weight scalars (secret
/// reconstruction) and group elements (interpolation in the exponent) alike.
pub fn lagrange_weights_at_zero(indices: &[F]) -> Result<Vec<F>, InterpolationError> {
    let mut inverses = Vec::with_capacity(indices.len());
    for x in indices {
        inverses.push(x.inverse().ok_or(InterpolationError::ZeroIndex)?);
    }

    let mut weights = Vec::with_capacity(indices.len());
    for (i, xi) in indices.iter().enumerate() {
        let mut denominator = F::one();
        for (j, inv_xj) in inverses.iter().enumerate() {
            if i != j {
                denominator *= F::one() - *xi * *inv_xj;
            }
        }
        // A zero factor means x_i == x_j for some j != i.
        let weight = denominator
            .inverse()
            .ok_or(InterpolationError::RepeatedIndex)?;
        weights.push(weight);
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn signed_canonicalization_matches_field_negation() {
        assert_eq!(from_signed(-5), -F::from(5u64));
        assert_eq!(from_signed(7), F::from(7u64));
        assert_eq!(from_signed(0), F::zero());
        assert_eq!(from_signed(-1) + F::one(), F::zero());
    }

    #[test]
    fn horner_matches_power_sum() {
        let mut rng = thread_rng();
        let poly: Vec<F> = (0..8).map(|_| rand_scalar(&mut rng)).collect();
        let x = rand_scalar(&mut rng);

        let mut expected = F::zero();
        let mut power = F::one();
        for coeff in &poly {
            expected += *coeff * power;
            power *= x;
        }
        assert_eq!(evaluate_poly(&poly, x), expected);
    }

    #[test]
    fn empty_polynomial_evaluates_to_zero() {
        assert_eq!(evaluate_poly(&[], F::from(3u64)), F::zero());
    }

    #[test]
    fn lagrange_weights_recover_the_constant_term() {
        let mut rng = thread_rng();
        // f(x) = 9 + 4x + x^2, evaluated at three distinct nonzero indices.
        let poly = vec![F::from(9u64), F::from(4u64), F::one()];
        let indices: Vec<F> = (1u64..=3).map(F::from).collect();
        let evals: Vec<F> = indices.iter().map(|x| evaluate_poly(&poly, *x)).collect();

        let weights = lagrange_weights_at_zero(&indices).unwrap();
        let recovered: F = weights
            .iter()
            .zip(evals.iter())
            .map(|(w, y)| *w * *y)
            .sum();
        assert_eq!(recovered, poly[0]);

        // Also at random indices.
        let indices: Vec<F> = (0..5).map(|_| rand_scalar(&mut rng)).collect();
        let evals: Vec<F> = indices.iter().map(|x| evaluate_poly(&poly, *x)).collect();
        let weights = lagrange_weights_at_zero(&indices).unwrap();
        let recovered: F = weights
            .iter()
            .zip(evals.iter())
            .map(|(w, y)| *w * *y)
            .sum();
        assert_eq!(recovered, poly[0]);
    }

    #[test]
    fn zero_index_is_rejected() {
        let indices = vec![F::from(1u64), F::zero(), F::from(2u64)];
        assert_eq!(
            lagrange_weights_at_zero(&indices),
            Err(InterpolationError::ZeroIndex)
        );
    }

    #[test]
    fn repeated_index_is_rejected() {
        let indices = vec![F::from(4u64), F::from(2u64), F::from(4u64)];
        assert_eq!(
            lagrange_weights_at_zero(&indices),
            Err(InterpolationError::RepeatedIndex)
        );
    }
}
