//! Structured reference string.
use ark_ec::{pairing::Pairing, scalar_mul::ScalarMul, AffineRepr, CurveGroup, PrimeGroup};
use ark_ff::One;
use std::vec::Vec;

/// Powers of a secret `τ` in both source groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Srs<E: Pairing> {
    /// `[τ^i]G₁` for `i` in `0..size`. Polynomials of up to `size` coefficients can be committed.
    pub g1: Vec<E::G1Affine>,
    /// `[G₂, [τ]G₂]`.
    pub g2: [E::G2Affine; 2],
}

impl<E: Pairing> Srs<E> {
    /// Derives an SRS of `size` G1 powers from a known `tau`.
    ///
    /// Anyone holding `tau` can forge openings, so this is only meant for tests and benchmarks.
    pub fn new_insecure(size: usize, tau: E::ScalarField) -> Self {
        let mut powers = Vec::with_capacity(size);
        let mut power = E::ScalarField::one();
        for _ in 0..size {
            powers.push(power);
            power *= tau;
        }
        let g1 = E::G1::generator().batch_mul(&powers);
        let g2 = E::G2Affine::generator();
        Self {
            g1,
            g2: [g2, (g2 * tau).into_affine()],
        }
    }

    /// Number of coefficients of the largest committable polynomial.
    #[inline]
    pub fn size(&self) -> usize {
        self.g1.len()
    }
}
