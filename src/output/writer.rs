//! Newline-delimited trace output
//!
//! A trace file is one decimal object id per line, nothing else.

use crate::error::{Result, TraceError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write buffer size for trace files
const WRITE_BUFFER_SIZE: usize = 1 << 20;

/// Destination for generated batches
pub trait BatchSink {
    /// Append one batch of ids, in order
    fn write_batch(&mut self, ids: &[u64]) -> Result<()>;
}

impl BatchSink for Vec<u64> {
    fn write_batch(&mut self, ids: &[u64]) -> Result<()> {
        self.extend_from_slice(ids);
        Ok(())
    }
}

/// Buffered writer producing one id per line
pub struct TraceWriter<W: Write> {
    inner: W,
    path: PathBuf,
    written: u64,
}

impl TraceWriter<BufWriter<File>> {
    /// Create (or truncate) the trace file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| TraceError::io(path, e))?;
        Ok(Self::new(BufWriter::with_capacity(WRITE_BUFFER_SIZE, file), path))
    }
}

impl<W: Write> TraceWriter<W> {
    /// Wrap any writer; `path` is only used in error messages
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            written: 0,
        }
    }

    /// Ids written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush buffered output and hand back the inner writer
    pub fn finish(mut self) -> Result<W> {
        self.inner
            .flush()
            .map_err(|e| TraceError::io(&self.path, e))?;
        Ok(self.inner)
    }
}

impl<W: Write> BatchSink for TraceWriter<W> {
    fn write_batch(&mut self, ids: &[u64]) -> Result<()> {
        for id in ids {
            writeln!(self.inner, "{}", id).map_err(|e| TraceError::io(&self.path, e))?;
        }
        self.written += ids.len() as u64;
        Ok(())
    }
}
