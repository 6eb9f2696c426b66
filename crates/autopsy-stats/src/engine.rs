//! Single-pass statistics over a float buffer
//!
//! Each element is visited exactly once, left to right. NaN and infinite
//! elements are counted and otherwise ignored; finite elements are widened
//! to f64 and feed the running aggregates:
//!
//! - sum (for the mean)
//! - Welford mean and M2 over half-scaled values (for the variance)
//! - sum of squares (for the L2 norm)
//! - min / max
//!
//! Classification happens in the element's own width, so only the
//! element type decides what counts as NaN or infinite. Every finite f32
//! buffer reduces without overflow.

use crate::element::StatElement;
use crate::report::StatsReport;
use std::marker::PhantomData;

/// Running state of one reduction
#[derive(Debug, Clone)]
pub struct MomentAccumulator<T: StatElement> {
    nan_count: u64,
    inf_count: u64,
    count: u64,
    sum: f64,
    // Welford state over x / 2; differences of halves stay finite
    half_mean: f64,
    half_m2: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
    _element: PhantomData<T>,
}

impl<T: StatElement> Default for MomentAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StatElement> MomentAccumulator<T> {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            nan_count: 0,
            inf_count: 0,
            count: 0,
            sum: 0.0,
            half_mean: 0.0,
            half_m2: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            _element: PhantomData,
        }
    }

    /// Classify one element and fold it in
    #[inline]
    pub fn push(&mut self, x: T) {
        if x.is_nan() {
            self.nan_count += 1;
            return;
        }
        if x.is_infinite() {
            self.inf_count += 1;
            return;
        }

        let x = x.widen();
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;

        let half = x * 0.5;
        let delta = half - self.half_mean;
        self.half_mean += delta / self.count as f64;
        self.half_m2 += delta * (half - self.half_mean);

        if x < self.min {
            self.min = x;
        }
        if x > self.max {
            self.max = x;
        }
    }

    /// Number of elements seen so far
    pub fn seen(&self) -> u64 {
        self.nan_count + self.inf_count + self.count
    }

    /// Derive the report from the accumulated state
    ///
    /// The mean is `sum / valid_count`, kept inside `[min, max]` so that
    /// rounding never moves it past the data (a constant buffer reports its
    /// value exactly). Variance and L2 norm only overflow to `+inf` when the
    /// true value exceeds the f64 range; they are never negative.
    pub fn finish(&self) -> StatsReport {
        if self.count == 0 {
            return StatsReport::empty(self.nan_count, self.inf_count);
        }

        let n = self.count as f64;

        StatsReport {
            nan_count: self.nan_count,
            inf_count: self.inf_count,
            valid_count: self.count,
            mean: (self.sum / n).clamp(self.min, self.max),
            variance: 4.0 * (self.half_m2.max(0.0) / n),
            l2_norm: self.sum_sq.sqrt(),
            min_val: self.min,
            max_val: self.max,
        }
    }
}

/// Compute the quality report for a buffer
///
/// Never fails; an empty buffer or one with no finite element yields the
/// NaN sentinels described in [`StatsReport`].
pub fn compute_statistics<T: StatElement>(data: &[T]) -> StatsReport {
    let mut acc = MomentAccumulator::new();
    for &x in data {
        acc.push(x);
    }
    acc.finish()
}

/// Compute the quality report for a raw pointer and element count
///
/// `len == 0` never touches `ptr`, so a null pointer is accepted for an
/// empty buffer.
///
/// # Safety
///
/// When `len > 0`, `ptr` must be non-null, aligned for `T` and valid for
/// reads of `len` consecutive elements for the duration of the call, and
/// the memory must not be mutated concurrently.
pub unsafe fn compute_statistics_raw<T: StatElement>(ptr: *const T, len: usize) -> StatsReport {
    if len == 0 {
        return StatsReport::empty(0, 0);
    }
    let data = unsafe { std::slice::from_raw_parts(ptr, len) };
    compute_statistics(data)
}

/// Whether any element is NaN or infinite
///
/// Stops at the first offending element.
pub fn has_failure<T: StatElement>(data: &[T]) -> bool {
    data.iter().any(|x| x.is_nan() || x.is_infinite())
}
