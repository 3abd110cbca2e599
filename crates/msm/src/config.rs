//! Tuning parameters of the MSM engine.
//!
//! Neither the window width nor the batch capacity affect the result of an MSM, only its cost.
use crate::error::{MsmError, MsmResult};

/// Largest supported window width. The most significant window may need `2^c` buckets.
pub const MAX_WINDOW_WIDTH: u8 = 20;
/// Smallest window width considered by [`best_window_width`].
pub const MIN_AUTO_WINDOW_WIDTH: u8 = 2;
/// Largest window width considered by [`best_window_width`].
pub const MAX_AUTO_WINDOW_WIDTH: u8 = 16;
/// Upper bound of the default batch capacity.
pub const MAX_BATCH_CAPACITY: usize = 640;
/// Lower bound of the default batch capacity, before clamping to the bucket count.
pub const MIN_BATCH_CAPACITY: usize = 16;
/// Buckets per batch slot used by [`default_batch_capacity`]. Keeps collisions rare.
const BUCKETS_PER_BATCH_SLOT: usize = 50;

/// MSM configuration.
///
/// `None` fields are derived from the input size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MsmConfig {
    /// Window width `c` in bits. Derived from the number of points if `None`.
    pub window_width: Option<u8>,
    /// Number of additions sharing one field inversion. Derived from the bucket count if `None`.
    pub batch_capacity: Option<usize>,
    /// Process windows on the rayon thread pool. Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for MsmConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MsmConfig {
    /// Returns configuration with derived window width and batch capacity.
    pub const fn new() -> Self {
        Self {
            window_width: None,
            batch_capacity: None,
            parallel: true,
        }
    }

    /// Overrides the window width.
    pub const fn with_window_width(mut self, window_width: u8) -> Self {
        self.window_width = Some(window_width);
        self
    }

    /// Overrides the batch capacity.
    pub const fn with_batch_capacity(mut self, batch_capacity: usize) -> Self {
        self.batch_capacity = Some(batch_capacity);
        self
    }

    /// Processes all windows on the calling thread.
    pub const fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Checks overrides before anything is allocated.
    pub fn validate(&self) -> MsmResult<()> {
        if let Some(c) = self.window_width {
            if c == 0 || c > MAX_WINDOW_WIDTH {
                return Err(MsmError::InvalidWindowWidth(c));
            }
        }
        if self.batch_capacity == Some(0) {
            return Err(MsmError::InvalidBatchCapacity(0));
        }
        Ok(())
    }

    /// Window width used for `n` points and scalars of `scalar_bits` bits.
    pub fn window_width_for(&self, n: usize, scalar_bits: usize) -> u8 {
        self.window_width
            .unwrap_or_else(|| best_window_width(n, scalar_bits))
    }

    /// Batch capacity used for a window with `bucket_count` buckets.
    pub fn batch_capacity_for(&self, bucket_count: usize) -> usize {
        match self.batch_capacity {
            Some(capacity) => capacity.min(bucket_count).max(1),
            None => default_batch_capacity(bucket_count),
        }
    }
}

/// Picks the window width minimizing `⌈bits/c⌉ · (n + 2^(c-1))`.
///
/// The first factor counts windows, each of which touches every point once, the second the
/// per-window work: one bucket operation per point plus the bucket reduction.
pub fn best_window_width(n: usize, scalar_bits: usize) -> u8 {
    let bits = scalar_bits.max(1) as u128;
    let n = n as u128;

    let mut best = MIN_AUTO_WINDOW_WIDTH;
    let mut best_cost = u128::MAX;
    for c in MIN_AUTO_WINDOW_WIDTH..=MAX_AUTO_WINDOW_WIDTH {
        let windows = bits.div_ceil(c as u128);
        let cost = windows * (n + (1u128 << (c - 1)));
        if cost < best_cost {
            best = c;
            best_cost = cost;
        }
    }
    best
}

/// Default batch capacity for a window with `bucket_count` buckets.
///
/// Never exceeds the bucket count since every slot of a batch targets a distinct bucket.
pub fn default_batch_capacity(bucket_count: usize) -> usize {
    (bucket_count / BUCKETS_PER_BATCH_SLOT)
        .clamp(MIN_BATCH_CAPACITY, MAX_BATCH_CAPACITY)
        .min(bucket_count)
        .max(1)
}
