//! Signed-digit recoding of scalars.
//!
//! A scalar is cut into windows of `c` bits. Every window except the most significant one is
//! balanced into `[-2^(c-1), 2^(c-1))` by borrowing `2^c` from the next window, which halves the
//! number of buckets per window. The most significant window absorbs the last carry and is kept
//! non-negative, so its digit lies in `[0, 2^w]` where `w` is the number of scalar bits left for
//! it. Its bucket array is sized accordingly, see [`WindowLayout::bucket_count`].
use ark_ff::{BigInteger, PrimeField};
use std::vec::Vec;

/// Window geometry for a window width and a scalar bit size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowLayout {
    width: u8,
    num_windows: usize,
    top_width: u8,
}

impl WindowLayout {
    /// Returns layout of `scalar_bits` bit scalars cut into `width` bit windows.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn new(width: u8, scalar_bits: usize) -> Self {
        assert!(width > 0, "window width must be positive");
        let c = width as usize;
        let bits = scalar_bits.max(1);
        let num_windows = bits.div_ceil(c);
        let top_width = (bits - c * (num_windows - 1)) as u8;
        Self {
            width,
            num_windows,
            top_width,
        }
    }

    /// Window width `c`.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Number of windows.
    #[inline]
    pub const fn num_windows(&self) -> usize {
        self.num_windows
    }

    /// Scalar bits covered by the most significant window, in `1..=c`.
    #[inline]
    pub const fn top_width(&self) -> u8 {
        self.top_width
    }

    /// Whether `window` is the most significant window.
    #[inline]
    pub const fn is_top(&self, window: usize) -> bool {
        window + 1 == self.num_windows
    }

    /// Largest digit magnitude that can appear in `window`.
    #[inline]
    pub const fn max_digit(&self, window: usize) -> u32 {
        if self.is_top(window) {
            1 << self.top_width
        } else {
            1 << (self.width - 1)
        }
    }

    /// Number of buckets needed by `window`.
    ///
    /// A digit `d` lands in bucket `|d| - 1`, so this is [`Self::max_digit`]. For the top window
    /// this includes the extra carry bit.
    #[inline]
    pub const fn bucket_count(&self, window: usize) -> usize {
        self.max_digit(window) as usize
    }
}

/// Window digit packing a bucket index and a sign.
///
/// Zero means the point is skipped in this window. A positive digit `d` is stored as `d << 1`,
/// a negative digit `-d` as `((d - 1) << 1) | 1`, so `bits >> 1` is the bucket index of negative
/// digits and the bucket index plus one of positive digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SignedDigit(u32);

impl SignedDigit {
    /// Digit that contributes nothing.
    pub const ZERO: Self = Self(0);

    /// Packs a signed digit.
    #[inline]
    pub const fn new(value: i64) -> Self {
        if value == 0 {
            Self::ZERO
        } else if value > 0 {
            Self((value as u32) << 1)
        } else {
            Self((((-value) as u32 - 1) << 1) | 1)
        }
    }

    /// Packed representation.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether the digit is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Whether the point has to be subtracted from its bucket.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 & 1 == 1
    }

    /// Bucket receiving the point, `|digit| - 1`. Meaningless for [`Self::ZERO`].
    #[inline]
    pub const fn bucket_index(self) -> usize {
        let index = (self.0 >> 1) as usize;
        if self.is_negative() {
            index
        } else {
            index - 1
        }
    }

    /// Signed value of the digit.
    #[inline]
    pub const fn value(self) -> i64 {
        if self.is_zero() {
            0
        } else if self.is_negative() {
            -((self.0 >> 1) as i64 + 1)
        } else {
            (self.0 >> 1) as i64
        }
    }
}

/// Reads `width` bits of little-endian `limbs` starting at bit `start`. Missing limbs read as zero.
#[inline]
fn extract_window(limbs: &[u64], start: usize, width: usize) -> u64 {
    let limb = start / 64;
    let shift = start % 64;

    let lo = limbs.get(limb).copied().unwrap_or(0) as u128;
    let hi = limbs.get(limb + 1).copied().unwrap_or(0) as u128;
    let window = ((hi << 64) | lo) >> shift;

    (window & ((1u128 << width) - 1)) as u64
}

/// Recodes a scalar given as little-endian limbs into `out`, one digit per window.
///
/// `out` must hold exactly [`WindowLayout::num_windows`] digits and the scalar must fit the
/// layout's bit size.
pub fn recode_scalar(limbs: &[u64], layout: &WindowLayout, out: &mut [SignedDigit]) {
    debug_assert_eq!(out.len(), layout.num_windows());
    let c = layout.width() as usize;
    let half = 1i64 << (c - 1);
    let full = 1i64 << c;

    let mut carry = 0;
    for (window, digit) in out.iter_mut().enumerate() {
        let mut value = extract_window(limbs, window * c, c) as i64 + carry;
        carry = 0;
        if value >= half && !layout.is_top(window) {
            value -= full;
            carry = 1;
        }
        debug_assert!(value.unsigned_abs() <= layout.max_digit(window) as u64);
        *digit = SignedDigit::new(value);
    }
    debug_assert_eq!(carry, 0, "scalar does not fit the window layout");
}

/// Scalars recoded by one task of [`DigitMatrix::recode`].
const RECODE_BLOCK: usize = 256;

/// Signed digits of a batch of scalars, stored window after window.
///
/// Every window is a contiguous column with one digit per scalar, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigitMatrix {
    layout: WindowLayout,
    len: usize,
    digits: Vec<SignedDigit>,
}

impl DigitMatrix {
    /// Recodes all `scalars`. Blocks of scalars are recoded in parallel when `parallel` is set
    /// and the `parallel` feature is enabled.
    pub fn recode<F: PrimeField>(scalars: &[F], layout: WindowLayout, parallel: bool) -> Self {
        let len = scalars.len();
        let num_windows = layout.num_windows();
        let mut digits = vec![SignedDigit::ZERO; len * num_windows];
        if len == 0 {
            return Self {
                layout,
                len,
                digits,
            };
        }

        // blocks[b][w] holds window `w` of the scalars of block `b`.
        let mut blocks: Vec<Vec<&mut [SignedDigit]>> = (0..len.div_ceil(RECODE_BLOCK))
            .map(|_| Vec::with_capacity(num_windows))
            .collect();
        for column in digits.chunks_mut(len) {
            for (block, part) in blocks.iter_mut().zip(column.chunks_mut(RECODE_BLOCK)) {
                block.push(part);
            }
        }

        let recode_block = |(mut columns, scalars): (Vec<&mut [SignedDigit]>, &[F])| {
            let mut scratch = vec![SignedDigit::ZERO; num_windows];
            for (i, scalar) in scalars.iter().enumerate() {
                recode_scalar(scalar.into_bigint().as_ref(), &layout, &mut scratch);
                for (column, digit) in columns.iter_mut().zip(&scratch) {
                    column[i] = *digit;
                }
            }
        };

        cfg_if::cfg_if! {
            if #[cfg(feature = "parallel")] {
                use rayon::prelude::*;
                if parallel {
                    blocks
                        .into_par_iter()
                        .zip(scalars.par_chunks(RECODE_BLOCK))
                        .for_each(recode_block);
                } else {
                    blocks.into_iter().zip(scalars.chunks(RECODE_BLOCK)).for_each(recode_block);
                }
            } else {
                let _ = parallel;
                blocks.into_iter().zip(scalars.chunks(RECODE_BLOCK)).for_each(recode_block);
            }
        }

        Self {
            layout,
            len,
            digits,
        }
    }

    /// Window layout the scalars were recoded with.
    #[inline]
    pub fn layout(&self) -> &WindowLayout {
        &self.layout
    }

    /// Number of recoded scalars.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no scalar was recoded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All digits of scalar `index`, least significant window first.
    pub fn scalar(&self, index: usize) -> impl Iterator<Item = SignedDigit> + '_ {
        assert!(index < self.len, "scalar {index} out of {}", self.len);
        self.digits[index..].iter().step_by(self.len).copied()
    }

    /// Digits of every scalar for `window`, in input order.
    #[inline]
    pub fn window(&self, window: usize) -> &[SignedDigit] {
        &self.digits[window * self.len..(window + 1) * self.len]
    }
}

/// Bit size of the scalars of `F`.
#[inline]
pub fn scalar_bits<F: PrimeField>() -> usize {
    F::MODULUS_BIT_SIZE as usize
}

/// Returns `true` if every scalar is zero.
pub fn all_zero<F: PrimeField>(scalars: &[F]) -> bool {
    scalars.iter().all(|s| s.into_bigint().is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_ff::{UniformRand, Zero};
    use ark_std::test_rng;
    use rstest::rstest;

    /// Adds `value << shift` into `acc`.
    fn add_shifted(acc: &mut [u64], value: u64, shift: usize) {
        let mut limb = shift / 64;
        let wide = (value as u128) << (shift % 64);
        let mut carry = 0u128;
        for part in [wide as u64, (wide >> 64) as u64] {
            let sum = acc[limb] as u128 + part as u128 + carry;
            acc[limb] = sum as u64;
            carry = sum >> 64;
            limb += 1;
        }
        while carry != 0 {
            let sum = acc[limb] as u128 + carry;
            acc[limb] = sum as u64;
            carry = sum >> 64;
            limb += 1;
        }
    }

    /// Checks `Σ digitᵢ·2^(c·i) == scalar` over the integers.
    fn assert_reconstructs(limbs: &[u64], layout: &WindowLayout, digits: &[SignedDigit]) {
        let size = limbs.len() + 2;
        let mut positive = vec![0u64; size];
        let mut negative = vec![0u64; size];
        for (window, digit) in digits.iter().enumerate() {
            let shift = window * layout.width() as usize;
            let value = digit.value();
            if value > 0 {
                add_shifted(&mut positive, value as u64, shift);
            } else if value < 0 {
                add_shifted(&mut negative, value.unsigned_abs(), shift);
            }
        }
        // positive == scalar + negative
        let mut expected = negative;
        for (i, limb) in limbs.iter().enumerate() {
            add_shifted(&mut expected, *limb, i * 64);
        }
        assert_eq!(positive, expected, "layout {layout:?}");
    }

    fn recode_one(scalar: Fr, layout: &WindowLayout) -> Vec<SignedDigit> {
        let mut digits = vec![SignedDigit::ZERO; layout.num_windows()];
        recode_scalar(scalar.into_bigint().as_ref(), layout, &mut digits);
        digits
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(8)]
    #[case(11)]
    #[case(13)]
    #[case(16)]
    #[case(20)]
    fn reconstructs_scalars(#[case] c: u8) {
        let mut rng = test_rng();
        let layout = WindowLayout::new(c, scalar_bits::<Fr>());
        let mut scalars = vec![Fr::zero(), Fr::from(1u64), -Fr::from(1u64), Fr::from(u64::MAX)];
        scalars.extend((0..32).map(|_| Fr::rand(&mut rng)));
        for scalar in scalars {
            let digits = recode_one(scalar, &layout);
            for (window, digit) in digits.iter().enumerate() {
                let magnitude = digit.value().unsigned_abs();
                assert!(magnitude <= layout.max_digit(window) as u64);
                if !digit.is_zero() {
                    assert!(digit.bucket_index() < layout.bucket_count(window));
                }
                if !layout.is_top(window) {
                    assert!(digit.value() < 1 << (c - 1));
                }
            }
            assert_reconstructs(scalar.into_bigint().as_ref(), &layout, &digits);
        }
    }

    #[test]
    fn top_window_holds_carry() {
        // 0b1111_1111 with c = 4 over 8 bits: the low window borrows, the top one absorbs 16.
        let layout = WindowLayout::new(4, 8);
        assert_eq!(layout.num_windows(), 2);
        assert_eq!(layout.top_width(), 4);
        assert_eq!(layout.bucket_count(0), 8);
        assert_eq!(layout.bucket_count(1), 16);

        let mut digits = [SignedDigit::ZERO; 2];
        recode_scalar(&[0xff], &layout, &mut digits);
        assert_eq!(digits.map(SignedDigit::value), [-1, 16]);
        assert_eq!(digits[1].bucket_index(), layout.bucket_count(1) - 1);
    }

    #[test]
    fn top_window_bucket_count_covers_field_modulus() {
        for c in 1..=20u8 {
            let layout = WindowLayout::new(c, scalar_bits::<Fr>());
            let top = layout.num_windows() - 1;
            assert!(layout.top_width() >= 1 && layout.top_width() <= c);
            assert_eq!(layout.bucket_count(top), 1 << layout.top_width());
            // largest representable top digit: every top bit set plus the carry
            let max_top = (1u64 << layout.top_width()) - 1 + 1;
            assert!(max_top <= layout.bucket_count(top) as u64);
            assert_eq!(
                (layout.num_windows() - 1) * c as usize + layout.top_width() as usize,
                scalar_bits::<Fr>()
            );
        }
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(-1, 0)]
    #[case(5, 4)]
    #[case(-5, 4)]
    #[case(1 << 20, (1 << 20) - 1)]
    #[case(-(1 << 19), (1 << 19) - 1)]
    fn digit_packing(#[case] value: i64, #[case] bucket: usize) {
        let digit = SignedDigit::new(value);
        assert_eq!(digit.value(), value);
        assert_eq!(digit.is_zero(), value == 0);
        if value != 0 {
            assert_eq!(digit.is_negative(), value < 0);
            assert_eq!(digit.bucket_index(), bucket);
            assert_eq!(digit.bits() >> 1, bucket as u32 + u32::from(value > 0));
        }
    }

    #[rstest]
    #[case::sequential(17, false)]
    #[case::parallel(17, true)]
    #[case::several_blocks(3 * RECODE_BLOCK + 5, true)]
    fn matrix_columns(#[case] n: usize, #[case] parallel: bool) {
        let mut rng = test_rng();
        let scalars: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();
        let layout = WindowLayout::new(9, scalar_bits::<Fr>());
        let matrix = DigitMatrix::recode(&scalars, layout, parallel);
        assert_eq!(matrix.len(), n);
        for (i, scalar) in scalars.iter().enumerate() {
            let digits: Vec<_> = matrix.scalar(i).collect();
            assert_eq!(digits, recode_one(*scalar, &layout));
        }
        for window in 0..layout.num_windows() {
            let column = matrix.window(window);
            assert_eq!(column.len(), n);
            for (i, scalar) in scalars.iter().enumerate() {
                assert_eq!(column[i], recode_one(*scalar, &layout)[window]);
            }
        }
    }

    #[test]
    fn empty_matrix() {
        let layout = WindowLayout::new(4, scalar_bits::<Fr>());
        let matrix = DigitMatrix::recode::<Fr>(&[], layout, true);
        assert!(matrix.is_empty());
        assert!(matrix.window(0).is_empty());
    }

    #[test]
    fn detects_zero_scalars() {
        assert!(all_zero::<Fr>(&[]));
        assert!(all_zero(&[Fr::zero(), Fr::zero()]));
        assert!(!all_zero(&[Fr::zero(), Fr::from(3u64)]));
    }
}
