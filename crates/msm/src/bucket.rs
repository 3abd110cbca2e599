//! Buckets of one window, filled through the batch-affine adder.
//!
//! The accumulator keeps two containers: the active batch of the [`BatchAffineAdder`], where
//! every bucket appears at most once, and a pending queue for additions whose bucket was busy
//! when they arrived. Whenever the batch is flushed the queue is scanned from the most recent
//! entry to the oldest and every entry whose bucket is free is moved into the new batch.
use crate::batch_affine::{BatchAffineAdder, Push};
use ark_ec::{
    short_weierstrass::{Affine, SWCurveConfig},
    AffineRepr,
};
use bitvec::vec::BitVec;
use std::vec::Vec;

/// Addition deferred because its bucket was busy.
#[derive(Clone, Copy, Debug)]
struct PendingOp<P: SWCurveConfig> {
    bucket: usize,
    point: Affine<P>,
}

/// Counters of one accumulation, reported through `tracing`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AccumulatorStats {
    /// Number of batch flushes that performed at least one addition.
    pub(crate) flushes: usize,
    /// Additions performed by batch flushes.
    pub(crate) batched: usize,
    /// Additions that went through the pending queue.
    pub(crate) collisions: usize,
}

#[derive(Debug)]
pub(crate) struct BucketAccumulator<P: SWCurveConfig> {
    buckets: Vec<Affine<P>>,
    adder: BatchAffineAdder<P>,
    /// Buckets with a slot in the current batch.
    busy: BitVec,
    pending: Vec<PendingOp<P>>,
    /// Queue length that forces a flush.
    pending_limit: usize,
    stats: AccumulatorStats,
}

impl<P: SWCurveConfig> BucketAccumulator<P> {
    /// Returns `bucket_count` empty buckets fed through batches of `batch_capacity` additions.
    pub(crate) fn new(bucket_count: usize, batch_capacity: usize) -> Self {
        let batch_capacity = batch_capacity.clamp(1, bucket_count.max(1));
        Self {
            buckets: vec![Affine::zero(); bucket_count],
            adder: BatchAffineAdder::new(batch_capacity),
            busy: BitVec::repeat(false, bucket_count),
            pending: Vec::with_capacity(batch_capacity),
            pending_limit: batch_capacity,
            stats: AccumulatorStats::default(),
        }
    }

    /// Adds `point`, or `-point` if `negate` is set, to `bucket`.
    pub(crate) fn add(&mut self, bucket: usize, point: &Affine<P>, negate: bool) {
        debug_assert!(
            bucket < self.buckets.len(),
            "bucket {bucket} out of {} buckets",
            self.buckets.len()
        );
        let op = PendingOp {
            bucket,
            point: if negate { -*point } else { *point },
        };

        if self.busy[bucket] {
            self.stats.collisions += 1;
            self.pending.push(op);
            if self.pending.len() >= self.pending_limit {
                self.flush();
                self.reinsert_pending();
            }
            return;
        }

        self.insert(op);
        if self.adder.is_full() {
            self.flush();
            self.reinsert_pending();
        }
    }

    /// Applies all remaining additions and returns the buckets.
    pub(crate) fn finish(mut self) -> (Vec<Affine<P>>, AccumulatorStats) {
        while !self.pending.is_empty() {
            self.flush();
            self.reinsert_pending();
        }
        self.flush();
        debug_assert!(self.busy.not_any());
        (self.buckets, self.stats)
    }

    /// Hands `op` to the adder. Its bucket must be free.
    fn insert(&mut self, op: PendingOp<P>) {
        debug_assert!(!self.busy[op.bucket]);
        if self.adder.push(&mut self.buckets, op.bucket, op.point) == Push::Queued {
            self.busy.set(op.bucket, true);
        }
    }

    fn flush(&mut self) {
        for &bucket in self.adder.targets() {
            self.busy.set(bucket, false);
        }
        let added = self.adder.flush(&mut self.buckets);
        if added > 0 {
            self.stats.flushes += 1;
            self.stats.batched += added;
        }
    }

    /// Moves pending additions into the batch, newest first, flushing whenever the batch fills.
    ///
    /// A pass that flushed frees every bucket, so the queue is scanned again. Stops once the
    /// queue is empty or a full pass found only busy buckets.
    fn reinsert_pending(&mut self) {
        loop {
            let mut flushed = false;
            let mut i = self.pending.len();
            while i > 0 {
                i -= 1;
                if self.busy[self.pending[i].bucket] {
                    continue;
                }
                // The entry swapped into `i` was already visited in this pass.
                let op = self.pending.swap_remove(i);
                self.insert(op);
                if self.adder.is_full() {
                    self.flush();
                    flushed = true;
                }
            }
            if !flushed || self.pending.is_empty() {
                return;
            }
        }
    }
}
