//! CLI argument parsing using clap
//!
//! Generation flags live at the top level so `tracegen -m 1000 -n 5000` works
//! without a subcommand. Flags are optional here so that a value given on
//! the command line can be told apart from one that should come from the
//! config file or the defaults.

use crate::distribution::DistributionKind;
use crate::output::SummaryFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tracegen - synthetic request traces for cache and storage benchmarks
#[derive(Parser, Debug)]
#[command(name = "tracegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub generate: GenerateArgs,

    /// TOML configuration file ([generator] and [replay] tables)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long = "log_level", global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a trace through an S3-FIFO cache and report the hit ratio
    Replay(ReplayArgs),
}

/// Trace generation flags
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Number of distinct objects [default: 1000000]
    #[arg(short = 'm', long = "objects")]
    pub objects: Option<u64>,

    /// Number of requests [default: 100000000]
    #[arg(short = 'n', long = "requests")]
    pub requests: Option<u64>,

    /// Zipf skew parameter, >= 0 [default: 1.0]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Output trace file, overwritten if it exists [default: ./dataset.txt]
    #[arg(long = "output_file")]
    pub output_file: Option<PathBuf>,

    /// Object-id distribution [default: zipf]
    #[arg(long, value_enum)]
    pub distribution: Option<DistributionKind>,

    /// Id of the first (most popular) object [default: 0]
    #[arg(long)]
    pub start: Option<u64>,

    /// Requests generated per batch, bounds peak memory [default: 1000000]
    #[arg(long = "batch_size")]
    pub batch_size: Option<usize>,

    /// RNG seed for a reproducible trace [default: random, logged]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Batches generated in parallel, 0 = one per CPU [default: 1]
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Summary printed after the run [default: text]
    #[arg(long, value_enum)]
    pub summary: Option<SummaryFormat>,
}

/// Replay flags
#[derive(Args, Debug, Default)]
pub struct ReplayArgs {
    /// Trace file to replay [default: the generator output file]
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Cache capacity in objects [default: 100000]
    #[arg(long = "cache_size")]
    pub cache_size: Option<usize>,

    /// Fraction of the capacity given to the small FIFO queue [default: 0.1]
    #[arg(long = "small_ratio")]
    pub small_ratio: Option<f64>,

    /// Summary format [default: text]
    #[arg(long, value_enum)]
    pub summary: Option<SummaryFormat>,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generation_flags() {
        let cli = Cli::try_parse_from([
            "tracegen",
            "-m",
            "500",
            "-n",
            "2000",
            "--alpha",
            "0.8",
            "--output_file",
            "/tmp/trace.txt",
            "--distribution",
            "uniform",
            "--start",
            "10",
            "--seed",
            "7",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        let args = cli.generate;
        assert_eq!(args.objects, Some(500));
        assert_eq!(args.requests, Some(2000));
        assert_eq!(args.alpha, Some(0.8));
        assert_eq!(args.output_file, Some(PathBuf::from("/tmp/trace.txt")));
        assert_eq!(args.distribution, Some(DistributionKind::Uniform));
        assert_eq!(args.start, Some(10));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.batch_size, None);
    }

    #[test]
    fn test_no_flags_leaves_everything_unset() {
        let cli = Cli::try_parse_from(["tracegen"]).unwrap();
        assert!(cli.generate.objects.is_none());
        assert!(cli.generate.alpha.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_negative_request_count_rejected() {
        assert!(Cli::try_parse_from(["tracegen", "-n", "-5"]).is_err());
    }

    #[test]
    fn test_replay_subcommand() {
        let cli = Cli::try_parse_from([
            "tracegen",
            "replay",
            "--trace",
            "dataset.txt",
            "--cache_size",
            "1000",
            "--log_level",
            "debug",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Replay(args)) => {
                assert_eq!(args.trace, Some(PathBuf::from("dataset.txt")));
                assert_eq!(args.cache_size, Some(1000));
                assert_eq!(args.small_ratio, None);
            }
            None => panic!("expected replay subcommand"),
        }
        assert_eq!(cli.log_level, "debug");
    }
}
