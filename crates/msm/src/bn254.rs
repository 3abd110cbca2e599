//! BN254 entry points. More details in [`g1_msm`].
use crate::{config::MsmConfig, error::MsmResult, msm::msm_with_config};
use ark_bn254::{Fr, G1Affine, G2Affine};

/// BN254 G1 multi-scalar multiplication.
///
/// Returns `Σ scalars[i] · points[i]`, the point at infinity for empty input.
#[inline]
pub fn g1_msm(points: &[G1Affine], scalars: &[Fr]) -> MsmResult<G1Affine> {
    msm_with_config(points, scalars, &MsmConfig::default())
}

/// BN254 G2 multi-scalar multiplication. See [`g1_msm`].
#[inline]
pub fn g2_msm(points: &[G2Affine], scalars: &[Fr]) -> MsmResult<G2Affine> {
    msm_with_config(points, scalars, &MsmConfig::default())
}
