//! `y² = x³ + 3x + 19` over `F_101`. The group has prime order 97, small enough to enumerate.
use ark_ec::{
    models::CurveConfig,
    short_weierstrass::{self, SWCurveConfig},
};
use ark_ff::{
    fields::{Fp64, MontBackend, MontConfig},
    Field, MontFp,
};

#[derive(MontConfig)]
#[modulus = "101"]
#[generator = "2"]
pub(crate) struct FqConfig;
pub(crate) type Fq = Fp64<MontBackend<FqConfig, 1>>;

#[derive(MontConfig)]
#[modulus = "97"]
#[generator = "5"]
pub(crate) struct FrConfig;
pub(crate) type Fr = Fp64<MontBackend<FrConfig, 1>>;

/// Order of the group.
pub(crate) const ORDER: u64 = 97;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct TinyConfig;

impl CurveConfig for TinyConfig {
    type BaseField = Fq;
    type ScalarField = Fr;

    const COFACTOR: &'static [u64] = &[1];
    const COFACTOR_INV: Fr = Fr::ONE;
}

impl SWCurveConfig for TinyConfig {
    const COEFF_A: Fq = MontFp!("3");
    const COEFF_B: Fq = MontFp!("19");
    const GENERATOR: Affine = Affine::new_unchecked(MontFp!("1"), MontFp!("15"));
}

pub(crate) type Affine = short_weierstrass::Affine<TinyConfig>;
pub(crate) type Projective = short_weierstrass::Projective<TinyConfig>;

/// `k·G` for `k` in `0..ORDER`, computed by repeated addition.
pub(crate) fn multiples() -> std::vec::Vec<Affine> {
    let generator = TinyConfig::GENERATOR;
    let mut acc = Projective::default();
    (0..ORDER)
        .map(|_| {
            let current = acc;
            acc += generator;
            ark_ec::CurveGroup::into_affine(current)
        })
        .collect()
}
