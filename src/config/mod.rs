//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Values resolve in three layers: built-in defaults, then the optional TOML
//! file, then flags given explicitly on the command line.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::distribution::DistributionKind;
use crate::output::SummaryFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of distinct objects (`-m`)
pub const DEFAULT_OBJECTS: u64 = 1_000_000;
/// Default number of requests (`-n`)
pub const DEFAULT_REQUESTS: u64 = 100_000_000;
/// Default Zipf skew (`--alpha`)
pub const DEFAULT_ALPHA: f64 = 1.0;
/// Default requests per batch (`--batch_size`)
pub const DEFAULT_BATCH_SIZE: usize = 1_000_000;
/// Default trace path (`--output_file`)
pub const DEFAULT_OUTPUT_FILE: &str = "./dataset.txt";
/// Default replay cache capacity in objects (`--cache_size`)
pub const DEFAULT_CACHE_SIZE: usize = 100_000;
/// Default share of the replay cache given to the small queue (`--small_ratio`)
pub const DEFAULT_SMALL_RATIO: f64 = 0.1;

/// Largest replay cache accepted; about 100 bytes of bookkeeping per object
pub const MAX_CACHE_SIZE: usize = 1 << 30;

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
}

/// Trace generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub distribution: DistributionKind,
    /// Number of distinct objects
    pub objects: u64,
    /// Number of requests to generate
    pub requests: u64,
    /// Zipf skew parameter, ignored for uniform
    pub alpha: f64,
    /// First object id
    pub start: u64,
    pub batch_size: usize,
    pub seed: Option<u64>,
    /// Concurrent batches (0 = one per CPU)
    pub threads: usize,
    pub output_file: PathBuf,
    pub summary: SummaryFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            distribution: DistributionKind::Zipf,
            objects: DEFAULT_OBJECTS,
            requests: DEFAULT_REQUESTS,
            alpha: DEFAULT_ALPHA,
            start: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            threads: 1,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            summary: SummaryFormat::Text,
        }
    }
}

/// Trace replay settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReplayConfig {
    /// Trace to replay; defaults to the generator's output file
    pub trace: Option<PathBuf>,
    /// Total cache capacity in objects
    pub cache_size: usize,
    /// Fraction of capacity given to the small FIFO
    pub small_ratio: f64,
    pub summary: SummaryFormat,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            trace: None,
            cache_size: DEFAULT_CACHE_SIZE,
            small_ratio: DEFAULT_SMALL_RATIO,
            summary: SummaryFormat::Text,
        }
    }
}
