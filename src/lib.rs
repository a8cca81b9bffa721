//! Crate root: public surface, core aliases, and protocol-wide invariants
//!
//! This crate is a toolbox of pairing-based polynomial-commitment primitives
//! over BN254. One cryptographic engine — powers of a trapdoor α committed in
//! both source groups, evaluation witnesses in G1, a pairing-equation check —
//! backs three constructions that share it:
//!
//! - [`polycommit`]: the constant-size PolyCommit-DL scheme (Kate, Zaverucha,
//!   Goldberg §3.2). Commit a polynomial to a single G2 element, prove an
//!   evaluation with a single G1 element.
//! - [`evss`]: efficient verifiable secret sharing (same paper, §4.1). A
//!   dealer commits to a random polynomial with a chosen constant term and
//!   hands out witnessed evaluations; any large-enough quorum reconstructs
//!   the constant.
//! - [`accumulator`]: a bilinear accumulator. A credential set becomes the
//!   roots of a monic polynomial; membership is a zero-evaluation witness.
//!
//! A fourth module, [`constantinople`], implements a publicly verifiable
//! secret sharing flavor on the same scalar/group machinery: each share is
//! published as `V = s·g1` with a Chaum–Pedersen DLEQ proof tied to a hashed
//! coin point, and a quorum of proofs reconstructs the coin digest by
//! Lagrange interpolation in the exponent.
//!
//! ## Invariants
//!
//! - **Field & curve.** The scalar field is `ark_bn254::Fr` ([`F`] in this
//!   crate); commitments live in G2, witnesses in G1, and verification goes
//!   through the BN254 pairing. We forbid `unsafe` throughout.
//! - **Public key shape.** A [`polycommit::PublicKey`] of size `t` holds the
//!   parallel towers `αⁱ·g1` and `αⁱ·g2` for `i < t`, with the zeroth entries
//!   equal to the fixed base points. Deserialization enforces the shape;
//!   [`polycommit::PublicKey::validate`] checks the towers pairwise under the
//!   pairing.
//! - **Pure synchronous library.** Every operation consumes its inputs and
//!   returns; there is no shared mutable state, no background work, and no
//!   caching of caller entropy. Operations that share a public key read-only
//!   may run concurrently.
//! - **Failure discipline.** Protocol and input errors surface as per-module
//!   `thiserror` enums; verification outcomes are plain `bool`s (or a
//!   dedicated failure error for the DLEQ check) and never panic on
//!   malformed input.
//!
//! ## Trusted setup caveat
//!
//! [`polycommit::PublicKey::setup`] samples α from the caller's RNG and keeps
//! it, as the construction requires. The `fixed-alpha` cargo feature instead
//! overrides α with 1 — reproducing the reference implementation's degenerate
//! key for test-vector compatibility. Under that feature every power equals
//! the base point and a commitment to any polynomial is `(Σaᵢ)·g2`: nothing
//! is bound. The feature exists for tests and must never ship.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Bilinear accumulator: credential sets as polynomial roots.
pub mod accumulator;
/// Constantinople PVSS: DLEQ-proved shares and threshold coin reconstruction.
pub mod constantinople;
/// Efficient verifiable secret sharing on top of the commitment core.
pub mod evss;
/// Challenge hashing (SHA-256 → scalar), coin point derivation, audit digests.
pub mod hashing;
/// PolyCommit-DL: trusted-setup powers, commitments, evaluation witnesses.
pub mod polycommit;
/// Scalar façade: sampling, signed canonicalization, Horner, Lagrange weights.
pub mod scalar;

// ============================================================================
// Canonical aliases and root-level re-exports
// ============================================================================

/// Scalar field used across the crate (the BN254 group order `q`).
pub type F = ark_bn254::Fr;

/// G1 affine group element (witnesses, PVSS share commitments).
pub type G1 = ark_bn254::G1Affine;

/// G2 affine group element (polynomial commitments).
pub type G2 = ark_bn254::G2Affine;

pub use crate::polycommit::{Commitment, KeyError, PolyCommitError, PublicKey, Witness};
pub use crate::scalar::InterpolationError;
