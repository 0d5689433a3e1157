//! Error types shared by the samplers, the generator and the replay path

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by tracegen
#[derive(Debug, Error)]
pub enum TraceError {
    /// A sampling or generation parameter is out of its domain
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The trace file could not be opened, written or read
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A trace line is not a decimal object id
    #[error("malformed trace {}: line {line}: {content:?}", .path.display())]
    MalformedTrace {
        path: PathBuf,
        line: u64,
        content: String,
    },

    /// The worker pool for parallel batch generation could not start
    #[error("failed to start generation thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl TraceError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type used by the library modules
pub type Result<T> = std::result::Result<T, TraceError>;
