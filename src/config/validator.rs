//! Configuration validation
//!
//! Runs before any output file is touched, so a bad parameter never leaves a
//! truncated trace behind.

use super::*;
use crate::distribution::check_id_range;
use crate::error::{Result, TraceError};

/// Validate generation parameters
pub fn validate_generator(config: &GeneratorConfig) -> Result<()> {
    check_id_range(config.objects, config.start)?;

    if config.distribution == DistributionKind::Zipf {
        if !config.alpha.is_finite() {
            return Err(TraceError::invalid("alpha", config.alpha, "must be a finite number"));
        }
        if config.alpha < 0.0 {
            return Err(TraceError::invalid("alpha", config.alpha, "must be non-negative"));
        }
        if config.alpha == 0.0 {
            tracing::warn!("alpha = 0 makes the zipf trace flat; consider --distribution uniform");
        }
    }

    if config.batch_size == 0 {
        return Err(TraceError::invalid("batch_size", config.batch_size, "must be at least 1"));
    }

    if config.output_file.as_os_str().is_empty() {
        return Err(TraceError::invalid("output_file", "\"\"", "must not be empty"));
    }

    if config.requests > 0 && config.requests < config.objects {
        tracing::warn!(
            requests = config.requests,
            objects = config.objects,
            "fewer requests than objects; most objects will never appear"
        );
    }

    Ok(())
}

/// Validate replay parameters
pub fn validate_replay(config: &ReplayConfig) -> Result<()> {
    if config.cache_size < 2 {
        return Err(TraceError::invalid(
            "cache_size",
            config.cache_size,
            "needs room for both the small and the main queue (at least 2)",
        ));
    }
    if config.cache_size > MAX_CACHE_SIZE {
        return Err(TraceError::invalid(
            "cache_size",
            config.cache_size,
            "exceeds the largest simulated cache (1073741824 objects)",
        ));
    }
    if !(config.small_ratio > 0.0 && config.small_ratio < 1.0) {
        return Err(TraceError::invalid(
            "small_ratio",
            config.small_ratio,
            "must be strictly between 0 and 1",
        ));
    }
    Ok(())
}
