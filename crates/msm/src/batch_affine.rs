//! Affine bucket additions batched behind a single field inversion.
//!
//! Adding `P` to a bucket `R` in affine coordinates needs `1/(P.x - R.x)`. The adder collects up
//! to `capacity` such additions, multiplies all denominators together, inverts the product once
//! and recovers every individual inverse from the prefix products. A batch of `n` additions costs
//! one inversion and about `6n` multiplications.
//!
//! Every slot of a batch must target a distinct bucket: the new bucket values are computed from
//! the old ones, so two slots on the same bucket would both read the stale value. Callers keep
//! track of busy buckets, see [`crate::bucket::BucketAccumulator`].
use ark_ec::{
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr,
};
use ark_ff::{AdditiveGroup, Field, One};
use std::vec::Vec;

/// Outcome of [`BatchAffineAdder::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Push {
    /// The addition was resolved immediately, no slot was used.
    Applied,
    /// The addition occupies a slot until the next flush.
    Queued,
}

#[derive(Debug)]
pub(crate) struct BatchAffineAdder<P: SWCurveConfig> {
    capacity: usize,
    /// Target bucket of each slot.
    targets: Vec<usize>,
    /// Addend of each slot.
    addends: Vec<Affine<P>>,
    /// Product of the denominators of all previous slots.
    prefix: Vec<P::BaseField>,
}

impl<P: SWCurveConfig> BatchAffineAdder<P> {
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            capacity,
            targets: Vec::with_capacity(capacity),
            addends: Vec::with_capacity(capacity),
            prefix: Vec::with_capacity(capacity),
        }
    }

    /// Buckets with a slot in the current batch.
    #[inline]
    pub(crate) fn targets(&self) -> &[usize] {
        &self.targets
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.targets.len() == self.capacity
    }

    /// Schedules `buckets[bucket] += point`.
    ///
    /// Additions for which the affine formula is singular are applied right away: an empty
    /// bucket takes the point, an equal point doubles the bucket and an opposite point empties
    /// it. `bucket` must not already be queued in this batch.
    pub(crate) fn push(
        &mut self,
        buckets: &mut [Affine<P>],
        bucket: usize,
        point: Affine<P>,
    ) -> Push {
        debug_assert!(!self.is_full());
        debug_assert!(!point.infinity);

        let target = &mut buckets[bucket];
        if target.infinity {
            *target = point;
            return Push::Applied;
        }
        if target.x == point.x {
            *target = if target.y == point.y {
                double(target)
            } else {
                Affine::zero()
            };
            return Push::Applied;
        }

        self.targets.push(bucket);
        self.addends.push(point);
        Push::Queued
    }

    /// Applies every queued addition and empties the batch. Returns the number of additions.
    pub(crate) fn flush(&mut self, buckets: &mut [Affine<P>]) -> usize {
        if self.is_empty() {
            return 0;
        }
        let n = self.targets.len();

        self.prefix.clear();
        let mut product = P::BaseField::one();
        for (&bucket, addend) in self.targets.iter().zip(&self.addends) {
            self.prefix.push(product);
            product *= addend.x - buckets[bucket].x;
        }

        // Denominators are non-zero: equal abscissae never reach a slot.
        let mut inverse = product
            .inverse()
            .expect("batch denominators are non-zero");

        for j in (0..n).rev() {
            let bucket = self.targets[j];
            let addend = self.addends[j];
            let r = buckets[bucket];

            let denominator = addend.x - r.x;
            // inverse = 1 / (d_0 ⋯ d_j), prefix[j] = d_0 ⋯ d_{j-1}
            let inv_denominator = inverse * self.prefix[j];
            inverse *= denominator;

            let lambda = (addend.y - r.y) * inv_denominator;
            let x3 = lambda.square() - r.x - addend.x;
            let y3 = lambda * (r.x - x3) - r.y;
            buckets[bucket] = Affine::new_unchecked(x3, y3);
        }

        self.targets.clear();
        self.addends.clear();
        n
    }
}

/// `2·p` in affine coordinates. Points of order two double to infinity.
fn double<P: SWCurveConfig>(p: &Affine<P>) -> Affine<P> {
    if p.infinity {
        return Affine::zero();
    }
    let Some(inv) = p.y.double().inverse() else {
        return Affine::zero();
    };
    let x2 = p.x.square();
    let lambda = (x2.double() + x2 + P::COEFF_A) * inv;
    let x3 = lambda.square() - p.x.double();
    let y3 = lambda * (p.x - x3) - p.y;
    Affine::new_unchecked(x3, y3)
}
