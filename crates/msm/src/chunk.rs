//! Partial sum of a single window.
use crate::{bucket::BucketAccumulator, recode::SignedDigit, xyzz::Xyzz};
use ark_ec::short_weierstrass::{Affine, SWCurveConfig};

/// Returns `Σ digit_i · points_i` for the digits of one window.
///
/// Points are dropped into bucket `|digit| - 1`, negated for negative digits. The buckets are
/// then reduced from the highest index down with a running sum, so that bucket `k` ends up
/// counted `k + 1` times.
#[tracing::instrument(level = "trace", skip(points, digits))]
pub(crate) fn process_chunk<P: SWCurveConfig>(
    window: usize,
    points: &[Affine<P>],
    digits: &[SignedDigit],
    bucket_count: usize,
    batch_capacity: usize,
) -> Xyzz<P> {
    debug_assert_eq!(points.len(), digits.len());
    let mut accumulator = BucketAccumulator::new(bucket_count, batch_capacity);
    for (point, digit) in points.iter().zip(digits) {
        if digit.is_zero() || point.infinity {
            continue;
        }
        accumulator.add(digit.bucket_index(), point, digit.is_negative());
    }
    let (buckets, stats) = accumulator.finish();
    tracing::trace!(
        flushes = stats.flushes,
        batched = stats.batched,
        collisions = stats.collisions,
        "buckets filled"
    );

    let mut running = Xyzz::identity();
    let mut total = Xyzz::identity();
    for bucket in buckets.iter().rev() {
        running.add_assign_affine(bucket);
        total.add_assign(&running);
    }
    total
}
