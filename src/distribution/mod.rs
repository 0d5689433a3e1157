//! Object-id samplers
//!
//! This module provides the distributions used to draw object ids for a
//! synthetic request trace. Each sampler maps a uniform random draw onto a
//! rank in `[0, m)`; the generator adds the `start` offset and writes the id.
//!
//! # Distributions
//!
//! - **Zipf**: power law over popularity rank, rank 0 is the hottest object
//! - **Uniform**: every object equally likely
//!
//! # Build once, sample many
//!
//! Samplers are immutable after construction. The Zipf sampler pays O(m) once
//! to build its [`table::DistributionTable`] and O(log m) per draw afterwards.
//! Because samplers never mutate, one instance can be shared by reference
//! across any number of threads, each with its own RNG.
//!
//! # Example
//!
//! ```
//! use tracegen::distribution::{rng::seeded_rng, zipf::ZipfSampler, Sampler};
//!
//! let sampler = ZipfSampler::new(1000, 1.0).unwrap();
//! let mut rng = seeded_rng(42);
//! let ids = sampler.sample_batch(&mut rng, 10, 5000).unwrap();
//! assert!(ids.iter().all(|&id| (5000..6000).contains(&id)));
//! ```

pub mod rng;
pub mod table;
pub mod uniform;
pub mod zipf;

use crate::error::{Result, TraceError};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Sampler trait for object-id generation
///
/// Implementations hold no mutable state: the random source is passed in on
/// every call, which is what makes a sampler reproducible under a fixed seed
/// and shareable across worker threads.
pub trait Sampler: Send + Sync {
    /// Short name used in logs and summaries
    fn name(&self) -> &'static str;

    /// Number of distinct objects `m`
    fn num_objects(&self) -> u64;

    /// Draw one rank in `[0, m)`
    fn sample_rank(&self, rng: &mut dyn RngCore) -> u64;

    /// Draw `n` ids in `[start, start + m - 1]`, in draw order
    ///
    /// Produces exactly the sequence that `n` consecutive [`sample_rank`]
    /// calls on the same RNG would, offset by `start`.
    ///
    /// [`sample_rank`]: Sampler::sample_rank
    fn sample_batch(&self, rng: &mut dyn RngCore, n: usize, start: u64) -> Result<Vec<u64>> {
        check_id_range(self.num_objects(), start)?;
        Ok((0..n).map(|_| start + self.sample_rank(rng)).collect())
    }
}

/// Distribution selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Power-law popularity, rank 0 hottest
    #[default]
    Zipf,
    /// Equal probability for every object
    Uniform,
}

impl std::fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zipf => write!(f, "zipf"),
            Self::Uniform => write!(f, "uniform"),
        }
    }
}

/// Build a sampler for the given distribution
///
/// `alpha` is only consulted for [`DistributionKind::Zipf`].
pub fn build_sampler(kind: DistributionKind, m: u64, alpha: f64) -> Result<Box<dyn Sampler>> {
    match kind {
        DistributionKind::Zipf => Ok(Box::new(zipf::ZipfSampler::new(m, alpha)?)),
        DistributionKind::Uniform => Ok(Box::new(uniform::UniformSampler::new(m)?)),
    }
}

/// Check that ids `start..=start + m - 1` are representable
pub fn check_id_range(m: u64, start: u64) -> Result<()> {
    if m == 0 {
        return Err(TraceError::invalid("m", m, "object count must be at least 1"));
    }
    if start.checked_add(m - 1).is_none() {
        return Err(TraceError::invalid(
            "start",
            start,
            "start + m - 1 overflows a 64-bit object id",
        ));
    }
    Ok(())
}
