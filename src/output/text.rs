//! Human-readable text output

use crate::cache::ReplayReport;
use crate::distribution::DistributionKind;
use crate::generator::RunReport;
use crate::util::format::{format_number, format_rate};
use std::fmt;

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Render a generation report
pub fn generation_summary(report: &RunReport) -> String {
    GenerationSummary(report).to_string()
}

/// Render a replay report
pub fn replay_summary(report: &ReplayReport) -> String {
    ReplaySummary(report).to_string()
}

fn banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{RULE}")?;
    writeln!(f, "                    {title}")?;
    writeln!(f, "{RULE}")
}

struct GenerationSummary<'a>(&'a RunReport);

impl fmt::Display for GenerationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        banner(f, "TRACE GENERATED")?;
        writeln!(f, "Distribution: {}", report.distribution)?;
        writeln!(f, "Objects:      {}", format_number(report.objects))?;
        if report.distribution == DistributionKind::Zipf {
            writeln!(f, "Alpha:        {}", report.alpha)?;
        }
        let last_id = report.start + report.objects.saturating_sub(1);
        writeln!(f, "Id range:     {} - {}", report.start, last_id)?;
        writeln!(f, "Requests:     {}", format_number(report.requests))?;
        writeln!(
            f,
            "Batches:      {} ({} thread{})",
            report.batches,
            report.threads,
            if report.threads == 1 { "" } else { "s" }
        )?;
        writeln!(f, "Seed:         {}", report.seed)?;
        writeln!(
            f,
            "Elapsed:      {:.3}s ({} req/s)",
            report.elapsed_secs,
            format_rate(report.requests_per_sec())
        )?;
        if let Some(path) = &report.output_file {
            writeln!(f, "Output:       {}", path.display())?;
        }
        Ok(())
    }
}

struct ReplaySummary<'a>(&'a ReplayReport);

impl fmt::Display for ReplaySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        banner(f, "REPLAY RESULTS")?;
        if let Some(path) = &report.trace {
            writeln!(f, "Trace:        {}", path.display())?;
        }
        writeln!(
            f,
            "Cache:        {} objects (small {}, main {})",
            format_number(report.cache_size as u64),
            format_number(report.small_capacity as u64),
            format_number(report.main_capacity as u64)
        )?;
        writeln!(f, "Requests:     {}", format_number(report.requests))?;
        writeln!(f, "Hits:         {}", format_number(report.hits))?;
        writeln!(f, "Misses:       {}", format_number(report.misses))?;
        writeln!(f, "Hit ratio:    {:.4}", report.hit_ratio)?;
        writeln!(f, "Elapsed:      {:.3}s", report.elapsed_secs)
    }
}
