//! Cumulative distribution table for rank-based sampling
//!
//! A [`DistributionTable`] holds the normalised prefix sums of the Zipf weights
//! `i^(-alpha)` for `i = 1..=m`:
//!
//! ```text
//! table[0] = 0
//! table[i] = (w_1 + ... + w_i) / (w_1 + ... + w_m)
//! table[m] = 1
//! ```
//!
//! Sampling is inverse transform: a uniform `u` in `[0, 1)` resolves to the
//! number of entries `<= u`, minus one. That is a 0-indexed rank where rank 0
//! owns the interval `[0, table[1])`, the largest slice of mass.
//!
//! # Numerics
//!
//! Weights are accumulated in increasing rank order using Neumaier compensated
//! summation, so `m` in the hundreds of millions stays accurate in the tail.
//! Each prefix is clamped to its predecessor, which keeps the table
//! non-decreasing even when the tail weights fall below the sum's precision.

use crate::error::{Result, TraceError};

/// Immutable cumulative table over `m` ranks
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTable {
    cdf: Vec<f64>,
    alpha: f64,
}

impl DistributionTable {
    /// Build the table for `m` objects with skew `alpha`
    ///
    /// Costs O(m) time and `8 * (m + 1)` bytes.
    ///
    /// # Errors
    ///
    /// [`TraceError::InvalidParameter`] if `m == 0`, if `alpha` is negative or
    /// not finite, or if `m + 1` entries cannot be addressed on this platform.
    pub fn build(m: u64, alpha: f64) -> Result<Self> {
        if m == 0 {
            return Err(TraceError::invalid("m", m, "object count must be at least 1"));
        }
        if !alpha.is_finite() {
            return Err(TraceError::invalid("alpha", alpha, "must be a finite number"));
        }
        if alpha < 0.0 {
            return Err(TraceError::invalid("alpha", alpha, "must be non-negative"));
        }
        let len = usize::try_from(m)
            .ok()
            .and_then(|m| m.checked_add(1))
            .ok_or_else(|| TraceError::invalid("m", m, "too many objects for one table"))?;

        let mut cdf = Vec::with_capacity(len);
        cdf.push(0.0);

        let mut sum = 0.0f64;
        let mut compensation = 0.0f64;
        let mut prev = 0.0f64;
        for rank in 1..=m {
            let weight = (rank as f64).powf(-alpha);
            let t = sum + weight;
            if sum.abs() >= weight.abs() {
                compensation += (sum - t) + weight;
            } else {
                compensation += (weight - t) + sum;
            }
            sum = t;
            let prefix = (sum + compensation).max(prev);
            cdf.push(prefix);
            prev = prefix;
        }

        let total = prev;
        for value in cdf.iter_mut().skip(1) {
            *value /= total;
        }

        Ok(Self { cdf, alpha })
    }

    /// Number of ranks `m`
    pub fn num_objects(&self) -> u64 {
        (self.cdf.len() - 1) as u64
    }

    /// Number of table entries, `m + 1`
    pub fn len(&self) -> usize {
        self.cdf.len()
    }

    /// Always false: a table has at least the two entries 0 and 1
    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    /// Skew parameter the table was built with
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Raw cumulative values
    pub fn as_slice(&self) -> &[f64] {
        &self.cdf
    }

    /// Probability mass of a single 0-indexed rank
    ///
    /// Returns 0 for ranks outside `[0, m)`.
    pub fn probability(&self, rank: u64) -> f64 {
        match usize::try_from(rank) {
            Ok(r) if r + 1 < self.cdf.len() => self.cdf[r + 1] - self.cdf[r],
            _ => 0.0,
        }
    }

    /// Resolve a uniform draw to a 0-indexed rank
    ///
    /// Counts the entries `<= u` and subtracts one. Draws below 0 map to rank 0
    /// and draws at or above 1 map to rank `m - 1`, so the result is always a
    /// valid rank.
    #[inline]
    pub fn rank_for(&self, u: f64) -> u64 {
        let at_or_below = self.cdf.partition_point(|&x| x <= u);
        let rank = at_or_below.saturating_sub(1) as u64;
        rank.min(self.num_objects() - 1)
    }
}
