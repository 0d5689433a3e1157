//! Trace replay
//!
//! Reads a newline-delimited trace and runs every id through an
//! [`S3FifoCache`], counting hits and misses.

use super::s3fifo::S3FifoCache;
use crate::error::{Result, TraceError};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Lines between progress log events
const PROGRESS_INTERVAL: u64 = 10_000_000;

/// Outcome of a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<PathBuf>,
    pub requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
    pub cache_size: usize,
    pub small_capacity: usize,
    pub main_capacity: usize,
    pub elapsed_secs: f64,
}

impl ReplayReport {
    fn from_cache(cache: &S3FifoCache, started: Instant) -> Self {
        let stats = cache.stats();
        let requests = stats.hits + stats.misses;
        let hit_ratio = if requests > 0 {
            stats.hits as f64 / requests as f64
        } else {
            0.0
        };
        Self {
            trace: None,
            requests,
            hits: stats.hits,
            misses: stats.misses,
            hit_ratio,
            cache_size: cache.capacity(),
            small_capacity: cache.small_capacity(),
            main_capacity: cache.main_capacity(),
            elapsed_secs: started.elapsed().as_secs_f64(),
        }
    }
}

/// Replay ids from an iterator
pub fn replay_ids<I>(ids: I, cache: &mut S3FifoCache) -> ReplayReport
where
    I: IntoIterator<Item = u64>,
{
    let started = Instant::now();
    for id in ids {
        cache.access(id);
    }
    ReplayReport::from_cache(cache, started)
}

/// Replay a trace file
///
/// Blank lines are skipped; anything else that is not a decimal `u64` is an
/// error naming the 1-based line number.
pub fn replay_file(path: &Path, cache: &mut S3FifoCache) -> Result<ReplayReport> {
    let file = File::open(path).map_err(|e| TraceError::io(path, e))?;
    let reader = BufReader::new(file);
    let started = Instant::now();

    tracing::info!(
        trace = %path.display(),
        cache_size = cache.capacity(),
        small = cache.small_capacity(),
        main = cache.main_capacity(),
        "replaying trace"
    );

    let mut line_no = 0u64;
    for line in reader.lines() {
        line_no += 1;
        let line = line.map_err(|e| TraceError::io(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let id: u64 = trimmed.parse().map_err(|_| TraceError::MalformedTrace {
            path: path.to_path_buf(),
            line: line_no,
            content: trimmed.to_string(),
        })?;
        cache.access(id);

        if line_no % PROGRESS_INTERVAL == 0 {
            tracing::debug!(lines = line_no, "replay progress");
        }
    }

    let mut report = ReplayReport::from_cache(cache, started);
    report.trace = Some(path.to_path_buf());
    tracing::info!(
        requests = report.requests,
        hit_ratio = report.hit_ratio,
        "replay complete"
    );
    Ok(report)
}
