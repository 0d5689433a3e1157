//! JSON summaries

use crate::cache::ReplayReport;
use crate::generator::RunReport;
use anyhow::{Context, Result};

/// Serialize a generation report
pub fn generation_summary(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize generation summary")
}

/// Serialize a replay report
pub fn replay_summary(report: &ReplayReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize replay summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::DistributionKind;
    use std::path::PathBuf;

    #[test]
    fn test_generation_summary_fields() {
        let report = RunReport {
            distribution: DistributionKind::Zipf,
            objects: 1000,
            requests: 5000,
            alpha: 1.2,
            start: 10,
            seed: 42,
            batches: 5,
            threads: 1,
            elapsed_secs: 0.5,
            output_file: Some(PathBuf::from("dataset.txt")),
        };
        let value: serde_json::Value =
            serde_json::from_str(&generation_summary(&report).unwrap()).unwrap();
        assert_eq!(value["distribution"], "zipf");
        assert_eq!(value["objects"], 1000);
        assert_eq!(value["requests"], 5000);
        assert_eq!(value["seed"], 42);
        assert_eq!(value["start"], 10);
        assert_eq!(value["output_file"], "dataset.txt");
    }

    #[test]
    fn test_generation_summary_omits_missing_output() {
        let report = RunReport {
            distribution: DistributionKind::Uniform,
            objects: 1,
            requests: 0,
            alpha: 1.0,
            start: 0,
            seed: 1,
            batches: 0,
            threads: 1,
            elapsed_secs: 0.0,
            output_file: None,
        };
        let value: serde_json::Value =
            serde_json::from_str(&generation_summary(&report).unwrap()).unwrap();
        assert!(value.get("output_file").is_none());
        assert_eq!(value["distribution"], "uniform");
    }

    #[test]
    fn test_replay_summary_fields() {
        let report = ReplayReport {
            trace: None,
            requests: 10,
            hits: 4,
            misses: 6,
            hit_ratio: 0.4,
            cache_size: 100,
            small_capacity: 10,
            main_capacity: 90,
            elapsed_secs: 0.01,
        };
        let value: serde_json::Value =
            serde_json::from_str(&replay_summary(&report).unwrap()).unwrap();
        assert_eq!(value["hits"], 4);
        assert_eq!(value["hit_ratio"], 0.4);
        assert!(value.get("trace").is_none());
    }
}
