//! Trace generation driver
//!
//! Splits a run of `n` requests into fixed-size batches, draws each batch from
//! its own RNG stream and hands the batches to a [`BatchSink`] in order.
//!
//! # Batching
//!
//! Batches bound peak memory: only `batch_size` ids (or `threads * batch_size`
//! in parallel mode) are held at once. The last batch carries the remainder,
//! so exactly `n` ids are produced.
//!
//! # Reproducibility
//!
//! Batch `k` draws from the run seed's xoshiro stream jumped `k` times. The
//! output for a seed is therefore the same whether batches are generated on
//! one thread or many.

use crate::config::GeneratorConfig;
use crate::distribution::rng::{random_seed, BatchStreams, TraceRng};
use crate::distribution::{build_sampler, check_id_range, DistributionKind, Sampler};
use crate::error::{Result, TraceError};
use crate::output::writer::{BatchSink, TraceWriter};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Fully resolved parameters of one generation run
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub distribution: DistributionKind,
    /// Number of distinct objects `m`
    pub objects: u64,
    /// Number of requests `n`
    pub requests: u64,
    pub alpha: f64,
    /// Id of the most popular object; ids span `[start, start + m - 1]`
    pub start: u64,
    pub batch_size: usize,
    /// Fixed seed, or `None` to pick one from entropy
    pub seed: Option<u64>,
    /// Batches generated concurrently; 0 means one per CPU
    pub threads: usize,
}

impl GenerationPlan {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            distribution: config.distribution,
            objects: config.objects,
            requests: config.requests,
            alpha: config.alpha,
            start: config.start,
            batch_size: config.batch_size,
            seed: config.seed,
            threads: config.threads,
        }
    }

    /// Number of batches, `ceil(n / batch_size)`
    pub fn num_batches(&self) -> u64 {
        if self.batch_size == 0 {
            return 0;
        }
        self.requests.div_ceil(self.batch_size as u64)
    }

    /// Length of batch `index`; only the last batch may be short
    pub fn batch_len(&self, index: u64) -> usize {
        let offset = index.saturating_mul(self.batch_size as u64);
        let remaining = self.requests.saturating_sub(offset);
        remaining.min(self.batch_size as u64) as usize
    }

    /// Worker count after resolving 0 to the CPU count
    pub fn effective_threads(&self) -> usize {
        match self.threads {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub distribution: DistributionKind,
    pub objects: u64,
    pub requests: u64,
    pub alpha: f64,
    pub start: u64,
    /// Seed actually used; pass it back with `--seed` to reproduce the run
    pub seed: u64,
    pub batches: u64,
    pub threads: usize,
    pub elapsed_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
}

impl RunReport {
    pub fn requests_per_sec(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.requests as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }
}

/// Generate the whole trace into `sink`
pub fn generate(plan: &GenerationPlan, sink: &mut dyn BatchSink) -> Result<RunReport> {
    let sampler = prepare(plan)?;
    run(plan, sampler.as_ref(), sink)
}

/// Generate the trace into a file, overwriting it
///
/// Parameters are checked and the sampler built before the file is opened,
/// so a rejected plan leaves an existing file untouched.
pub fn generate_to_file(plan: &GenerationPlan, path: &Path) -> Result<RunReport> {
    let sampler = prepare(plan)?;
    let mut writer = TraceWriter::create(path)?;
    let mut report = run(plan, sampler.as_ref(), &mut writer)?;
    tracing::debug!(
        path = %writer.path().display(),
        lines = writer.written(),
        "flushing trace"
    );
    writer.finish()?;
    report.output_file = Some(path.to_path_buf());
    Ok(report)
}

/// Check the plan and build its sampler
fn prepare(plan: &GenerationPlan) -> Result<Box<dyn Sampler>> {
    if plan.batch_size == 0 {
        return Err(TraceError::invalid(
            "batch_size",
            plan.batch_size,
            "must be at least 1",
        ));
    }
    check_id_range(plan.objects, plan.start)?;

    let build_start = Instant::now();
    let sampler = build_sampler(plan.distribution, plan.objects, plan.alpha)?;
    tracing::debug!(
        sampler = sampler.name(),
        objects = plan.objects,
        elapsed_ms = build_start.elapsed().as_millis() as u64,
        "sampler ready"
    );
    Ok(sampler)
}

fn run(plan: &GenerationPlan, sampler: &dyn Sampler, sink: &mut dyn BatchSink) -> Result<RunReport> {
    let seed = plan.seed.unwrap_or_else(random_seed);
    let threads = plan.effective_threads();
    let batches = plan.num_batches();

    tracing::info!(
        distribution = %plan.distribution,
        objects = plan.objects,
        requests = plan.requests,
        alpha = plan.alpha,
        start = plan.start,
        batch_size = plan.batch_size,
        batches,
        threads,
        seed,
        "generating trace"
    );

    let started = Instant::now();
    let mut streams = BatchStreams::new(seed);
    if threads <= 1 {
        for index in 0..batches {
            let rng = streams.next_stream();
            let ids = draw_batch(sampler, plan, index, rng)?;
            sink.write_batch(&ids)?;
            tracing::debug!(batch = index, len = ids.len(), "batch written");
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        let mut index = 0u64;
        while index < batches {
            let window_end = (index + threads as u64).min(batches);
            let jobs: Vec<(u64, TraceRng)> =
                (index..window_end).map(|i| (i, streams.next_stream())).collect();
            let drawn: Vec<Result<Vec<u64>>> = pool.install(|| {
                jobs.into_par_iter()
                    .map(|(i, rng)| draw_batch(sampler, plan, i, rng))
                    .collect()
            });
            for (offset, ids) in drawn.into_iter().enumerate() {
                let ids = ids?;
                sink.write_batch(&ids)?;
                tracing::debug!(batch = index + offset as u64, len = ids.len(), "batch written");
            }
            index = window_end;
        }
    }

    let report = RunReport {
        distribution: plan.distribution,
        objects: plan.objects,
        requests: plan.requests,
        alpha: plan.alpha,
        start: plan.start,
        seed,
        batches,
        threads,
        elapsed_secs: started.elapsed().as_secs_f64(),
        output_file: None,
    };
    tracing::info!(
        requests = report.requests,
        elapsed_secs = report.elapsed_secs,
        "trace complete"
    );
    Ok(report)
}

fn draw_batch(
    sampler: &dyn Sampler,
    plan: &GenerationPlan,
    index: u64,
    mut rng: TraceRng,
) -> Result<Vec<u64>> {
    sampler.sample_batch(&mut rng, plan.batch_len(index), plan.start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn plan(distribution: DistributionKind) -> GenerationPlan {
        GenerationPlan {
            distribution,
            objects: 100,
            requests: 2_500,
            alpha: 1.0,
            start: 0,
            batch_size: 1_000,
            seed: Some(42),
            threads: 1,
        }
    }

    #[test]
    fn test_batch_arithmetic() {
        let p = plan(DistributionKind::Zipf);
        assert_eq!(p.num_batches(), 3);
        assert_eq!(p.batch_len(0), 1_000);
        assert_eq!(p.batch_len(1), 1_000);
        assert_eq!(p.batch_len(2), 500);
        assert_eq!(p.batch_len(3), 0);

        let exact = GenerationPlan { requests: 3_000, ..p.clone() };
        assert_eq!(exact.num_batches(), 3);
        assert_eq!(exact.batch_len(2), 1_000);

        let empty = GenerationPlan { requests: 0, ..p };
        assert_eq!(empty.num_batches(), 0);
    }

    #[test]
    fn test_generate_honours_request_count() {
        let mut ids = Vec::new();
        let report = generate(&plan(DistributionKind::Zipf), &mut ids).unwrap();
        assert_eq!(ids.len(), 2_500);
        assert_eq!(report.requests, 2_500);
        assert_eq!(report.batches, 3);
        assert_eq!(report.seed, 42);
    }

    #[test]
    fn test_generate_applies_start() {
        for kind in [DistributionKind::Zipf, DistributionKind::Uniform] {
            let p = GenerationPlan { start: 1_000_000, ..plan(kind) };
            let mut ids = Vec::new();
            generate(&p, &mut ids).unwrap();
            assert!(ids.iter().all(|&id| (1_000_000..1_000_100).contains(&id)));
        }
    }

    #[test]
    fn test_generate_zero_requests() {
        let p = GenerationPlan { requests: 0, ..plan(DistributionKind::Uniform) };
        let mut ids = Vec::new();
        let report = generate(&p, &mut ids).unwrap();
        assert!(ids.is_empty());
        assert_eq!(report.batches, 0);
    }

    #[test]
    fn test_generate_same_seed_same_trace() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        generate(&plan(DistributionKind::Zipf), &mut a).unwrap();
        generate(&plan(DistributionKind::Zipf), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_parallel_matches_sequential() {
        let sequential = plan(DistributionKind::Zipf);
        let parallel = GenerationPlan { threads: 4, batch_size: 300, ..sequential.clone() };
        let sequential = GenerationPlan { batch_size: 300, ..sequential };

        let mut a = Vec::new();
        let mut b = Vec::new();
        generate(&sequential, &mut a).unwrap();
        generate(&parallel, &mut b).unwrap();
        assert_eq!(a.len(), 2_500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_random_seed_is_reported() {
        let p = GenerationPlan { seed: None, ..plan(DistributionKind::Uniform) };
        let mut first = Vec::new();
        let report = generate(&p, &mut first).unwrap();

        let replay = GenerationPlan { seed: Some(report.seed), ..p };
        let mut second = Vec::new();
        generate(&replay, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_rejects_bad_parameters() {
        let mut sink = Vec::new();
        let zero_batch = GenerationPlan { batch_size: 0, ..plan(DistributionKind::Zipf) };
        assert!(matches!(
            generate(&zero_batch, &mut sink),
            Err(TraceError::InvalidParameter { name: "batch_size", .. })
        ));

        let no_objects = GenerationPlan { objects: 0, ..plan(DistributionKind::Zipf) };
        assert!(generate(&no_objects, &mut sink).is_err());

        let negative_alpha = GenerationPlan { alpha: -1.0, ..plan(DistributionKind::Zipf) };
        assert!(generate(&negative_alpha, &mut sink).is_err());

        let overflow = GenerationPlan { start: u64::MAX, ..plan(DistributionKind::Uniform) };
        assert!(generate(&overflow, &mut sink).is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_generate_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataset.txt");
        let p = GenerationPlan { start: 10, ..plan(DistributionKind::Uniform) };

        let report = generate_to_file(&p, &path).unwrap();
        assert_eq!(report.output_file.as_deref(), Some(path.as_path()));

        let contents = fs::read_to_string(&path).unwrap();
        let ids: Vec<u64> = contents.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(ids.len(), 2_500);
        assert!(ids.iter().all(|&id| (10..110).contains(&id)));
    }

    #[test]
    fn test_rejected_plan_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataset.txt");
        fs::write(&path, "1\n2\n3\n").unwrap();

        let bad_alpha = GenerationPlan { alpha: -1.0, ..plan(DistributionKind::Zipf) };
        assert!(generate_to_file(&bad_alpha, &path).is_err());
        let zero_batch = GenerationPlan { batch_size: 0, ..plan(DistributionKind::Uniform) };
        assert!(generate_to_file(&zero_batch, &path).is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n3\n");
    }

    #[test]
    fn test_threads_zero_uses_cpu_count() {
        let auto = GenerationPlan { threads: 0, batch_size: 200, ..plan(DistributionKind::Zipf) };
        assert!(auto.effective_threads() >= 1);
        assert_eq!(auto.effective_threads(), num_cpus::get());

        let sequential = GenerationPlan { threads: 1, ..auto.clone() };
        let mut a = Vec::new();
        let mut b = Vec::new();
        let report = generate(&auto, &mut a).unwrap();
        generate(&sequential, &mut b).unwrap();
        assert_eq!(report.threads, num_cpus::get());
        assert_eq!(a, b);
    }

    #[test]
    fn test_zipf_trace_is_skewed() {
        let p = GenerationPlan { requests: 100_000, batch_size: 10_000, ..plan(DistributionKind::Zipf) };
        let mut ids = Vec::new();
        generate(&p, &mut ids).unwrap();
        let head = ids.iter().filter(|&&id| id == 0).count();
        let tail = ids.iter().filter(|&&id| id == 99).count();
        assert!(head > tail * 10, "head {head} tail {tail}");
    }
}
