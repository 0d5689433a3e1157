//! Output: the trace file itself and the run summaries
//!
//! The trace is written by [`writer::TraceWriter`]. After a run a summary is
//! printed to stdout as plain text or JSON; logs go to stderr, so a JSON
//! summary can be piped straight into another tool.

pub mod json;
pub mod text;
pub mod writer;

use serde::{Deserialize, Serialize};

/// Summary format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Human-readable block
    #[default]
    Text,
    /// One pretty-printed JSON object
    Json,
    /// Print nothing
    #[value(name = "none")]
    #[serde(rename = "none")]
    Quiet,
}
