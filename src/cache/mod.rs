//! Cache simulation for generated traces
//!
//! Feeding a trace through a cache is the quickest way to check that its
//! skew behaves as intended: a Zipf trace should show a much higher hit ratio
//! than a uniform one at the same cache size.

pub mod replay;
pub mod s3fifo;

pub use replay::{replay_file, replay_ids, ReplayReport};
pub use s3fifo::{CacheStats, S3FifoCache};
