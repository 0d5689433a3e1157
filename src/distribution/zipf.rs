//! Zipf distribution sampler
//!
//! Rank `i` (1-indexed) is drawn with probability proportional to `i^(-alpha)`.
//! Emitted ranks are 0-indexed, so id `start` is the most popular object.
//!
//! # Characteristics
//!
//! - `alpha = 0`: flat, every object equally likely
//! - `alpha < 1`: mild skew, long heavy tail
//! - `alpha = 1`: classic Zipf, the most popular object gets `1 / H(m)` of requests
//! - `alpha > 1`: strong skew, the head dominates
//!
//! # Performance
//!
//! Inverse transform sampling over a pre-computed [`DistributionTable`]:
//! O(m) to build, O(log m) per draw.
//!
//! # Example
//!
//! ```
//! use tracegen::distribution::{rng::seeded_rng, zipf::ZipfSampler, Sampler};
//!
//! let sampler = ZipfSampler::new(1_000, 1.2).unwrap();
//! let mut rng = seeded_rng(1);
//! let rank = sampler.sample_rank(&mut rng);
//! assert!(rank < 1_000);
//! ```

use super::table::DistributionTable;
use super::{check_id_range, Sampler};
use crate::error::Result;
use rand::{Rng, RngCore};

/// Build the cumulative table for `m` objects with skew `alpha`
pub fn build(m: u64, alpha: f64) -> Result<DistributionTable> {
    DistributionTable::build(m, alpha)
}

/// Resolve one uniform draw `u` in `[0, 1)` to a 0-indexed rank
pub fn sample(table: &DistributionTable, u: f64) -> u64 {
    table.rank_for(u)
}

/// Draw `n` 0-indexed ranks from `table`, in draw order
pub fn sample_batch(table: &DistributionTable, rng: &mut dyn RngCore, n: usize) -> Vec<u64> {
    (0..n).map(|_| table.rank_for(rng.gen::<f64>())).collect()
}

/// Zipf sampler over `m` ranked objects
///
/// Owns its table; the table is never mutated after construction.
#[derive(Debug, Clone)]
pub struct ZipfSampler {
    table: DistributionTable,
}

impl ZipfSampler {
    /// Build a sampler for `m` objects with skew `alpha`
    pub fn new(m: u64, alpha: f64) -> Result<Self> {
        Ok(Self {
            table: DistributionTable::build(m, alpha)?,
        })
    }

    /// Wrap an already-built table
    pub fn from_table(table: DistributionTable) -> Self {
        Self { table }
    }

    /// The cumulative table backing this sampler
    pub fn table(&self) -> &DistributionTable {
        &self.table
    }
}

impl Sampler for ZipfSampler {
    fn name(&self) -> &'static str {
        "zipf"
    }

    fn num_objects(&self) -> u64 {
        self.table.num_objects()
    }

    #[inline]
    fn sample_rank(&self, rng: &mut dyn RngCore) -> u64 {
        self.table.rank_for(rng.gen::<f64>())
    }

    fn sample_batch(&self, rng: &mut dyn RngCore, n: usize, start: u64) -> Result<Vec<u64>> {
        check_id_range(self.num_objects(), start)?;
        let mut ids = sample_batch(&self.table, rng, n);
        for id in &mut ids {
            *id += start;
        }
        Ok(ids)
    }
}
