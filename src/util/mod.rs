//! Utility functions and helpers

pub mod format;
pub mod logging;
