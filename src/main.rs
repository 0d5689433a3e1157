//! tracegen CLI entry point

use anyhow::{Context, Result};
use tracegen::cache::{replay_file, S3FifoCache};
use tracegen::config::cli::{Cli, Command};
use tracegen::config::{toml, validator, Config};
use tracegen::generator::{generate_to_file, GenerationPlan};
use tracegen::output::{json, text, SummaryFormat};
use tracegen::util::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level)?;

    let config = toml::resolve(&cli)?;

    match cli.command {
        None => run_generate(&config),
        Some(Command::Replay(_)) => run_replay(&config),
    }
}

/// Generate a trace file
fn run_generate(config: &Config) -> Result<()> {
    let generator = &config.generator;
    validator::validate_generator(generator).context("Invalid generator configuration")?;

    let plan = GenerationPlan::from_config(generator);
    let report = generate_to_file(&plan, &generator.output_file)
        .with_context(|| format!("Failed to generate {}", generator.output_file.display()))?;

    match generator.summary {
        SummaryFormat::Text => print!("{}", text::generation_summary(&report)),
        SummaryFormat::Json => println!("{}", json::generation_summary(&report)?),
        SummaryFormat::Quiet => {}
    }
    Ok(())
}

/// Replay a trace through S3-FIFO
fn run_replay(config: &Config) -> Result<()> {
    let replay = &config.replay;
    validator::validate_replay(replay).context("Invalid replay configuration")?;

    let trace = replay
        .trace
        .clone()
        .unwrap_or_else(|| config.generator.output_file.clone());
    let mut cache = S3FifoCache::new(replay.cache_size, replay.small_ratio);
    let report = replay_file(&trace, &mut cache)
        .with_context(|| format!("Failed to replay {}", trace.display()))?;

    match replay.summary {
        SummaryFormat::Text => print!("{}", text::replay_summary(&report)),
        SummaryFormat::Json => println!("{}", json::replay_summary(&report)?),
        SummaryFormat::Quiet => {}
    }
    Ok(())
}
