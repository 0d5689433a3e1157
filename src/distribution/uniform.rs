//! Uniform random distribution
//!
//! Every object id in `[start, start + m - 1]` is equally likely. There is no
//! table and no state beyond the object count, so construction is free.
//!
//! A draw scales a uniform real in `[0, 1)` up to `[0, m)` and truncates. The
//! truncated value is clamped to `m - 1`, which guards against rounding
//! `u * m` up to `m` when `m` is large.

use super::Sampler;
use crate::error::{Result, TraceError};
use rand::{Rng, RngCore};

/// Draw `n` uniform ids in `[start, start + m - 1]`
pub fn sample_batch(rng: &mut dyn RngCore, m: u64, n: usize, start: u64) -> Result<Vec<u64>> {
    UniformSampler::new(m)?.sample_batch(rng, n, start)
}

/// Uniform sampler over `m` objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSampler {
    m: u64,
}

impl UniformSampler {
    pub fn new(m: u64) -> Result<Self> {
        if m == 0 {
            return Err(TraceError::invalid("m", m, "object count must be at least 1"));
        }
        Ok(Self { m })
    }
}

impl Sampler for UniformSampler {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn num_objects(&self) -> u64 {
        self.m
    }

    #[inline(always)]
    fn sample_rank(&self, rng: &mut dyn RngCore) -> u64 {
        let scaled = rng.gen::<f64>() * self.m as f64;
        (scaled as u64).min(self.m - 1)
    }
}
