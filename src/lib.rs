//! tracegen - synthetic request traces for cache and storage benchmarking
//!
//! tracegen emits a sequence of object ids, one per line, drawn from a Zipf
//! (power-law) or uniform distribution over `m` objects. The traces drive
//! cache and storage benchmarks where the popularity skew of the workload is
//! the thing under study.
//!
//! # Architecture
//!
//! - **Samplers**: an immutable cumulative table built once per `(m, alpha)`,
//!   sampled by binary search; a stateless uniform sampler
//! - **Generator**: fixed-size batches with independent RNG streams, optional
//!   parallel batches, exact request counts
//! - **Replay**: an S3-FIFO simulator to sanity-check a trace's hit ratio

pub mod cache;
pub mod config;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod output;
pub mod util;

// Re-export commonly used types
pub use config::Config;
pub use distribution::{DistributionKind, Sampler};
pub use error::{Result, TraceError};
pub use generator::{generate, generate_to_file, GenerationPlan, RunReport};
