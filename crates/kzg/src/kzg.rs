//! Commit, open and verify.
//!
//! A commitment to `f` is `[f(τ)]G₁`. An opening at `z` claims `v = f(z)` and carries
//! `H = [q(τ)]G₁` with `q = (f - v) / (X - z)`. It verifies if
//! `e(C - [v]G₁ + [z]H, G₂) = e(H, [τ]G₂)`.
use crate::{
    error::{KzgError, KzgResult},
    poly::{divide_by_linear, evaluate, fold, powers},
    srs::Srs,
};
use ark_ec::{
    pairing::Pairing,
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr, CurveGroup,
};
use ark_ff::One;
use std::vec::Vec;

/// Commitment to a polynomial.
pub type Commitment<E> = <E as Pairing>::G1Affine;

/// Proof that a committed polynomial evaluates to `claimed_value` at `point`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpeningProof<E: Pairing> {
    /// Evaluation point.
    pub point: E::ScalarField,
    /// Claimed evaluation.
    pub claimed_value: E::ScalarField,
    /// Commitment to the quotient `(f - f(z)) / (X - z)`.
    pub h: E::G1Affine,
}

/// Opening of several polynomials at the same point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOpeningProof<E: Pairing> {
    /// Evaluation point.
    pub point: E::ScalarField,
    /// Claimed evaluation of every polynomial.
    pub claimed_values: Vec<E::ScalarField>,
    /// Commitment to the quotient of `Σ γ^i·f_i`.
    pub h: E::G1Affine,
}

/// Commits to `poly`.
///
/// # Errors
///
/// Returns [`KzgError::PolynomialTooLarge`] if `poly` has more coefficients than the SRS.
#[tracing::instrument(skip_all, fields(len = poly.len()))]
pub fn commit<E, P>(poly: &[E::ScalarField], srs: &Srs<E>) -> KzgResult<Commitment<E>>
where
    E: Pairing<G1Affine = Affine<P>>,
    P: SWCurveConfig<ScalarField = E::ScalarField>,
{
    check_size(poly.len(), srs)?;
    Ok(msm::msm(&srs.g1[..poly.len()], poly)?)
}

/// Opens `poly` at `point`.
///
/// # Errors
///
/// Returns [`KzgError::PolynomialTooLarge`] if `poly` has more coefficients than the SRS.
#[tracing::instrument(skip_all, fields(len = poly.len()))]
pub fn open<E, P>(
    poly: &[E::ScalarField],
    point: E::ScalarField,
    srs: &Srs<E>,
) -> KzgResult<OpeningProof<E>>
where
    E: Pairing<G1Affine = Affine<P>>,
    P: SWCurveConfig<ScalarField = E::ScalarField>,
{
    check_size(poly.len(), srs)?;
    let claimed_value = evaluate(poly, point);
    let h = commit(&divide_by_linear(poly, point), srs)?;
    Ok(OpeningProof {
        point,
        claimed_value,
        h,
    })
}

/// Verifies an opening of `commitment`.
///
/// # Errors
///
/// Returns [`KzgError::VerificationFailed`] if the proof does not hold.
pub fn verify<E: Pairing>(
    commitment: &Commitment<E>,
    proof: &OpeningProof<E>,
    srs: &Srs<E>,
) -> KzgResult<()> {
    pairing_check(*commitment, proof.point, proof.claimed_value, proof.h, srs)
}

/// Opens every polynomial of `polys` at `point` with a single proof.
///
/// The polynomials are folded with powers of `gamma`, which the verifier must use as well.
///
/// # Security
///
/// The opening is only binding if `gamma` is unpredictable to the prover until the point, the
/// commitments and the claimed values are fixed. Derive it with
/// [`batch_challenge`](crate::batch_challenge) unless an outer protocol already provides such a
/// challenge.
///
/// # Errors
///
/// Returns [`KzgError::InvalidNumberOfPolynomials`] for an empty batch and
/// [`KzgError::PolynomialTooLarge`] if a polynomial exceeds the SRS.
#[tracing::instrument(skip_all, fields(polys = polys.len()))]
pub fn batch_open_single_point<E, P, T>(
    polys: &[T],
    point: E::ScalarField,
    gamma: E::ScalarField,
    srs: &Srs<E>,
) -> KzgResult<BatchOpeningProof<E>>
where
    E: Pairing<G1Affine = Affine<P>>,
    P: SWCurveConfig<ScalarField = E::ScalarField>,
    T: AsRef<[E::ScalarField]>,
{
    if polys.is_empty() {
        return Err(KzgError::InvalidNumberOfPolynomials {
            polynomials: 0,
            claimed_values: 0,
        });
    }
    for poly in polys {
        check_size(poly.as_ref().len(), srs)?;
    }

    let claimed_values = polys
        .iter()
        .map(|poly| evaluate(poly.as_ref(), point))
        .collect();
    let folded = fold(polys, gamma);
    let h = commit(&divide_by_linear(&folded, point), srs)?;
    Ok(BatchOpeningProof {
        point,
        claimed_values,
        h,
    })
}

/// Verifies a batch opening of `commitments` with the `gamma` used to open it.
///
/// # Security
///
/// A `gamma` taken from the prover proves nothing: recompute it from the commitments and the
/// proof with [`batch_challenge`](crate::batch_challenge).
///
/// # Errors
///
/// Returns [`KzgError::InvalidNumberOfPolynomials`] if the batch is empty or the number of
/// commitments differs from the number of claimed values, and [`KzgError::VerificationFailed`]
/// if the proof does not hold.
#[tracing::instrument(skip_all, fields(commitments = commitments.len()))]
pub fn batch_verify_single_point<E, P>(
    commitments: &[Commitment<E>],
    proof: &BatchOpeningProof<E>,
    gamma: E::ScalarField,
    srs: &Srs<E>,
) -> KzgResult<()>
where
    E: Pairing<G1Affine = Affine<P>>,
    P: SWCurveConfig<ScalarField = E::ScalarField>,
{
    if commitments.is_empty() || commitments.len() != proof.claimed_values.len() {
        return Err(KzgError::InvalidNumberOfPolynomials {
            polynomials: commitments.len(),
            claimed_values: proof.claimed_values.len(),
        });
    }

    let folded_commitment = msm::msm(commitments, &powers(gamma, commitments.len()))?;
    let folded_value = evaluate(&proof.claimed_values, gamma);
    pairing_check(folded_commitment, proof.point, folded_value, proof.h, srs)
}

fn check_size<E: Pairing>(len: usize, srs: &Srs<E>) -> KzgResult<()> {
    if len > srs.size() {
        return Err(KzgError::PolynomialTooLarge {
            len,
            max: srs.size(),
        });
    }
    Ok(())
}

/// `e(C - [v]G₁ + [z]H, G₂) · e(-H, [τ]G₂) == 1`.
fn pairing_check<E: Pairing>(
    commitment: E::G1Affine,
    point: E::ScalarField,
    value: E::ScalarField,
    h: E::G1Affine,
    srs: &Srs<E>,
) -> KzgResult<()> {
    let Some(g1) = srs.g1.first() else {
        return Err(KzgError::VerificationFailed);
    };
    let lhs = commitment.into_group() - *g1 * value + h * point;
    let neg_h = -h.into_group();
    let result = E::multi_pairing([lhs.into_affine(), neg_h.into_affine()], srs.g2);
    if result.0.is_one() {
        Ok(())
    } else {
        tracing::debug!("kzg pairing check failed");
        Err(KzgError::VerificationFailed)
    }
}
