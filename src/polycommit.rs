//! PolyCommit-DL on BN254 — trusted-setup powers, commitments, witnesses
//!
//! Implements the constant-size polynomial commitment of Kate, Zaverucha and
//! Goldberg (§3.2): a [`PublicKey`] carries the towers `αⁱ·g1` and `αⁱ·g2`
//! for a trapdoor α, a polynomial commits to the single G2 element
//! `C = Σᵢ aᵢ·αⁱ·g2`, and an evaluation `poly(i) = r` is attested by one G1
//! element — the commitment to the quotient `(poly(x) − r)/(x − i)` — checked
//! through the pairing equation
//!
//! ```text
//! e(g1, C) = e(W, α·g2 − i·g2) · e(g1, g2)^r
//! ```
//!
//! # Security model
//!
//! The binding of the scheme rests on α being unknown to everyone holding the
//! key. [`PublicKey::setup`] samples α from the caller's RNG and forgets it.
//! A production deployment would obtain the towers from a multi-party
//! ceremony instead of a single dealer; this library takes the dealer
//! shortcut its callers (eVSS, the accumulator) assume.
//!
//! The `fixed-alpha` cargo feature reproduces the reference implementation's
//! override `α := 1`. Every power then equals the base point, the commitment
//! degenerates to `(Σaᵢ)·g2`, and nothing is bound. Test vectors only.
//!
//! # Untrusted keys
//!
//! A key received over the wire is checked structurally on deserialization
//! (shape, base points). [`PublicKey::validate`] additionally verifies the
//! discrete-log consistency of both towers under the pairing; it costs
//! `4(t − 1)` pairings, so call it once per received key, not per operation.
//!
//! This scheme is not hiding: witnesses are unblinded, and a commitment
//! binds the polynomial without concealing it from an exhaustive guesser.

#![forbid(unsafe_code)]

use std::path::Path;

use ark_bn254::{Bn254, G1Projective, G2Projective};
use ark_ec::pairing::Pairing;
use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::{One, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};

use crate::{hashing, scalar, F, G1, G2};

// ============================================================================
// Error types
// ============================================================================

/// Errors from commitment and witness creation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolyCommitError {
    /// The polynomial has no coefficients.
    #[error("polynomial is empty")]
    EmptyPolynomial,
    /// The polynomial has more coefficients than the key has powers.
    #[error("public key supports {supported} coefficients, polynomial has {got}")]
    DegreeExceedsKey {
        /// Number of powers in the public key.
        supported: usize,
        /// Coefficient count of the offending polynomial.
        got: usize,
    },
}

/// Errors from key (de)serialization, persistence, and validation.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    /// File I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The bytes do not decode to well-formed group elements.
    #[error("deserialization error: {0}")]
    Deserialize(String),
    /// The decoded key violates a structural or pairing invariant.
    #[error("public key validation failed: {0}")]
    Validation(String),
}

// ============================================================================
// Types
// ============================================================================

/// Commitment key: parallel powers of the trapdoor in both source groups.
///
/// `g1_powers[i] = αⁱ·g1` and `g2_powers[i] = αⁱ·g2`, both of length `t`
/// (the maximum supported coefficient count). The key is large — hold it
/// once and share it by reference; all operations take `&self`.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PublicKey {
    /// `αⁱ·g1` for `i` in `[0, t)`; the witness basis.
    pub g1_powers: Vec<G1>,
    /// `αⁱ·g2` for `i` in `[0, t)`; the commitment basis.
    pub g2_powers: Vec<G2>,
}

/// Commitment to a polynomial: a single G2 element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Commitment(
    /// `Σᵢ aᵢ·αⁱ·g2`.
    pub G2,
);

/// Witness to one evaluation: the quotient polynomial committed in G1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Witness(
    /// `Σⱼ qⱼ·αʲ·g1` for the quotient `q`.
    pub G1,
);

// ============================================================================
// Setup and core operations
// ============================================================================

impl PublicKey {
    /// Generate a fresh commitment key supporting polynomials of up to `t`
    /// coefficients.
    ///
    /// The trapdoor α is drawn from `rng` and dropped when this function
    /// returns. With the `fixed-alpha` feature the sampled value is replaced
    /// by 1, reproducing the reference test vectors at the cost of all
    /// security.
    pub fn setup(rng: &mut (impl CryptoRng + Rng), t: usize) -> Self {
        let mut alpha = scalar::rand_scalar(rng);
        if cfg!(feature = "fixed-alpha") {
            alpha = F::one();
        }

        let g1_gen = G1Projective::generator();
        let g2_gen = G2Projective::generator();
        let mut g1_powers = Vec::with_capacity(t);
        let mut g2_powers = Vec::with_capacity(t);
        let mut power = F::one();
        for _ in 0..t {
            g1_powers.push((g1_gen * power).into_affine());
            g2_powers.push((g2_gen * power).into_affine());
            power *= alpha;
        }
        tracing::debug!(size = t, "commitment key generated");
        Self {
            g1_powers,
            g2_powers,
        }
    }

    /// Maximum coefficient count this key supports.
    #[inline]
    pub fn degree(&self) -> usize {
        self.g1_powers.len()
    }

    fn check_poly(&self, poly: &[F]) -> Result<(), PolyCommitError> {
        if poly.is_empty() {
            return Err(PolyCommitError::EmptyPolynomial);
        }
        if poly.len() > self.degree() {
            return Err(PolyCommitError::DegreeExceedsKey {
                supported: self.degree(),
                got: poly.len(),
            });
        }
        Ok(())
    }

    /// Commit to `poly` (coefficients low→high): `C = Σᵢ aᵢ·g2_powers[i]`.
    pub fn commit(&self, poly: &[F]) -> Result<Commitment, PolyCommitError> {
        self.check_poly(poly)?;
        let mut acc = G2Projective::zero();
        for (coeff, power) in poly.iter().zip(self.g2_powers.iter()) {
            if coeff.is_zero() {
                continue;
            }
            acc += power.into_group() * *coeff;
        }
        Ok(Commitment(acc.into_affine()))
    }

    /// Recompute the commitment of `poly` and compare. `false` on any error
    /// or mismatch.
    pub fn verify_poly(&self, poly: &[F], commitment: &Commitment) -> bool {
        match self.commit(poly) {
            Ok(recomputed) => recomputed == *commitment,
            Err(_) => false,
        }
    }

    /// Evaluate `poly` at `index` and produce the witness for that evaluation.
    ///
    /// Returns `(poly(index), W)` where `W` commits to the quotient
    /// `(poly(x) − poly(index))/(x − index)`. For a constant polynomial the
    /// quotient is empty and `W` is the identity.
    pub fn create_witness(
        &self,
        poly: &[F],
        index: F,
    ) -> Result<(F, Witness), PolyCommitError> {
        self.check_poly(poly)?;
        // poly(x) − poly(i) is divisible by (x − i), so synthetic division
        // from the top coefficient yields quotient and remainder in one pass:
        //   q_{n−1} = a_n,  q_j = a_{j+1} + q_{j+1}·i,  r = a_0 + q_0·i.
        let mut quotient = vec![F::zero(); poly.len() - 1];
        if let Some(top) = quotient.last_mut() {
            *top = poly[poly.len() - 1];
        }
        for j in (0..quotient.len().saturating_sub(1)).rev() {
            quotient[j] = poly[j + 1] + quotient[j + 1] * index;
        }
        let value = poly[0] + quotient.first().map_or(F::zero(), |q0| *q0 * index);

        let mut acc = G1Projective::zero();
        for (coeff, power) in quotient.iter().zip(self.g1_powers.iter()) {
            if coeff.is_zero() {
                continue;
            }
            acc += power.into_group() * *coeff;
        }
        Ok((value, Witness(acc.into_affine())))
    }

    /// Check the evaluation `poly(index) = value` against `commitment` using
    /// `witness`: `e(g1, C) = e(W, α·g2 − i·g2) · e(g1, g2)^value`.
    ///
    /// Returns `false` for keys with fewer than two powers (the equation
    /// needs `α·g2`) — boolean verifiers do not panic on malformed input.
    pub fn verify_eval(
        &self,
        commitment: &Commitment,
        index: F,
        value: F,
        witness: &Witness,
    ) -> bool {
        if self.degree() < 2 {
            return false;
        }
        let shifted_g2 = self.g2_powers[1].into_group() - G2Projective::generator() * index;
        let lhs = Bn254::pairing(self.g1_powers[0], commitment.0);
        let rhs = Bn254::pairing(witness.0, shifted_g2)
            + Bn254::pairing(self.g1_powers[0], self.g2_powers[0]) * value;
        lhs == rhs
    }
}

// ============================================================================
// Serialization, persistence, validation
// ============================================================================

impl PublicKey {
    /// Canonical compressed encoding of the key.
    pub fn to_bytes(&self) -> Vec<u8> {
        hashing::canonical_bytes(self)
    }

    /// Decode a key from its canonical encoding and check its shape.
    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, KeyError> {
        let pk = Self::deserialize_compressed(&mut bytes)
            .map_err(|e| KeyError::Deserialize(e.to_string()))?;
        pk.check_shape()?;
        Ok(pk)
    }

    /// Persist the canonical encoding to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), KeyError> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Load a key from a file written by [`PublicKey::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub(crate) fn check_shape(&self) -> Result<(), KeyError> {
        if self.g1_powers.is_empty() {
            return Err(KeyError::Validation("key has no powers".into()));
        }
        if self.g1_powers.len() != self.g2_powers.len() {
            return Err(KeyError::Validation(format!(
                "tower lengths differ: {} G1 powers vs {} G2 powers",
                self.g1_powers.len(),
                self.g2_powers.len()
            )));
        }
        if self.g1_powers[0] != G1::generator() {
            return Err(KeyError::Validation(
                "zeroth G1 power is not the base point".into(),
            ));
        }
        if self.g2_powers[0] != G2::generator() {
            return Err(KeyError::Validation(
                "zeroth G2 power is not the base point".into(),
            ));
        }
        Ok(())
    }

    /// Verify the discrete-log consistency of both towers under the pairing:
    /// for every `i`, `e(g1_powers[i], g2) = e(g1_powers[i−1], g2_powers[1])`
    /// and `e(g1, g2_powers[i]) = e(g1_powers[1], g2_powers[i−1])`.
    ///
    /// Costs `4(t − 1)` pairings.
    pub fn validate(&self) -> Result<(), KeyError> {
        self.check_shape()?;
        if self.degree() < 2 {
            return Ok(());
        }
        let g1_gen = self.g1_powers[0];
        let g2_gen = self.g2_powers[0];
        let alpha_g1 = self.g1_powers[1];
        let alpha_g2 = self.g2_powers[1];
        for i in 1..self.degree() {
            if Bn254::pairing(self.g1_powers[i], g2_gen)
                != Bn254::pairing(self.g1_powers[i - 1], alpha_g2)
            {
                return Err(KeyError::Validation(format!(
                    "G1 power {i} is inconsistent with the trapdoor ratio"
                )));
            }
            if Bn254::pairing(g1_gen, self.g2_powers[i])
                != Bn254::pairing(alpha_g1, self.g2_powers[i - 1])
            {
                return Err(KeyError::Validation(format!(
                    "G2 power {i} is inconsistent with the trapdoor ratio"
                )));
            }
        }
        tracing::debug!(size = self.degree(), "commitment key validated");
        Ok(())
    }

    /// Audit digest of the key (BLAKE3 over both towers' compressed bytes).
    ///
    /// Stable across save/load; compare against a known-good value when the
    /// key comes from an external ceremony or an untrusted channel.
    pub fn digest(&self) -> [u8; 32] {
        let mut g1_bytes = Vec::with_capacity(self.g1_powers.len() * 32);
        for point in &self.g1_powers {
            g1_bytes.extend_from_slice(&hashing::canonical_bytes(point));
        }
        let mut g2_bytes = Vec::with_capacity(self.g2_powers.len() * 64);
        for point in &self.g2_powers {
            g2_bytes.extend_from_slice(&hashing::canonical_bytes(point));
        }
        hashing::audit_digest(&[&g1_bytes, &g2_bytes])
    }
}

// ============================================================================
// Tests
// ============================================================================
