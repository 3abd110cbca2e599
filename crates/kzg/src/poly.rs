//! Dense univariate polynomials as coefficient slices, lowest degree first.
use ark_ff::Field;
use std::vec::Vec;

/// `f(point)` by Horner's rule.
pub fn evaluate<F: Field>(poly: &[F], point: F) -> F {
    poly.iter().rev().fold(F::zero(), |acc, c| acc * point + c)
}

/// Quotient of `f(X) - f(point)` by `X - point`, computed by synthetic division.
pub fn divide_by_linear<F: Field>(poly: &[F], point: F) -> Vec<F> {
    if poly.len() < 2 {
        return Vec::new();
    }
    let mut quotient = vec![F::zero(); poly.len() - 1];
    let mut carry = F::zero();
    for i in (1..poly.len()).rev() {
        carry = carry * point + poly[i];
        quotient[i - 1] = carry;
    }
    quotient
}

/// `Σ gamma^i · polys[i]`.
pub fn fold<F: Field, P: AsRef<[F]>>(polys: &[P], gamma: F) -> Vec<F> {
    let len = polys.iter().map(|p| p.as_ref().len()).max().unwrap_or(0);
    let mut folded = vec![F::zero(); len];
    for poly in polys.iter().rev() {
        for c in folded.iter_mut() {
            *c *= gamma;
        }
        for (acc, c) in folded.iter_mut().zip(poly.as_ref()) {
            *acc += c;
        }
    }
    folded
}

/// `[1, gamma, gamma², ...]` with `n` entries.
pub fn powers<F: Field>(gamma: F, n: usize) -> Vec<F> {
    core::iter::successors(Some(F::one()), |p| Some(*p * gamma))
        .take(n)
        .collect()
}
