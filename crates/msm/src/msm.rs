//! Window scheduling and the public MSM entry points.
use crate::{
    chunk::process_chunk,
    config::MsmConfig,
    error::{MsmError, MsmResult},
    recode::{all_zero, scalar_bits, DigitMatrix, WindowLayout},
    xyzz::Xyzz,
};
use ark_ec::{
    short_weierstrass::{Affine, Projective, SWCurveConfig},
    AffineRepr, CurveGroup,
};
use std::vec::Vec;

/// Computes `Σ scalars[i] · points[i]` with the default [`MsmConfig`].
///
/// Returns the point at infinity for empty input.
///
/// # Errors
///
/// Returns [`MsmError::InputLengthMismatch`] if the slices have different lengths.
pub fn msm<P: SWCurveConfig>(
    points: &[Affine<P>],
    scalars: &[P::ScalarField],
) -> MsmResult<Affine<P>> {
    msm_with_config(points, scalars, &MsmConfig::default())
}

/// Computes `Σ scalars[i] · points[i]`.
///
/// Scalars are recoded into signed windows of `c` bits, every window is accumulated into
/// buckets independently, and the window sums are combined from the most significant one down.
/// The configuration only affects performance.
///
/// # Errors
///
/// Returns [`MsmError::InputLengthMismatch`] if the slices have different lengths, and
/// [`MsmError::InvalidWindowWidth`] or [`MsmError::InvalidBatchCapacity`] for invalid overrides.
#[tracing::instrument(skip_all, fields(n = points.len()))]
pub fn msm_with_config<P: SWCurveConfig>(
    points: &[Affine<P>],
    scalars: &[P::ScalarField],
    config: &MsmConfig,
) -> MsmResult<Affine<P>> {
    if points.len() != scalars.len() {
        return Err(MsmError::InputLengthMismatch {
            points: points.len(),
            scalars: scalars.len(),
        });
    }
    config.validate()?;

    if points.is_empty() || all_zero(scalars) {
        return Ok(Affine::zero());
    }

    let bits = scalar_bits::<P::ScalarField>();
    let layout = WindowLayout::new(config.window_width_for(points.len(), bits), bits);
    tracing::debug!(
        window_width = layout.width(),
        num_windows = layout.num_windows(),
        parallel = config.parallel,
        "msm layout"
    );

    let digits = DigitMatrix::recode(scalars, layout, config.parallel);
    let partials = window_sums(points, &digits, config);
    Ok(reduce_windows(&partials, layout.width()))
}

/// Sum of every window, indexed by window.
fn window_sums<P: SWCurveConfig>(
    points: &[Affine<P>],
    digits: &DigitMatrix,
    config: &MsmConfig,
) -> Vec<Xyzz<P>> {
    let layout = *digits.layout();
    let window_sum = |window: usize| {
        let bucket_count = layout.bucket_count(window);
        process_chunk(
            window,
            points,
            digits.window(window),
            bucket_count,
            config.batch_capacity_for(bucket_count),
        )
    };

    cfg_if::cfg_if! {
        if #[cfg(feature = "parallel")] {
            use rayon::prelude::*;
            if config.parallel {
                (0..layout.num_windows()).into_par_iter().map(window_sum).collect()
            } else {
                (0..layout.num_windows()).map(window_sum).collect()
            }
        } else {
            (0..layout.num_windows()).map(window_sum).collect()
        }
    }
}

/// Horner evaluation of the window sums in base `2^width`, top window first.
fn reduce_windows<P: SWCurveConfig>(partials: &[Xyzz<P>], width: u8) -> Affine<P> {
    let mut result = Xyzz::identity();
    for partial in partials.iter().rev() {
        for _ in 0..width {
            result.double_in_place();
        }
        result.add_assign(partial);
    }
    Projective::from(result).into_affine()
}
