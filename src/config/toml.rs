//! TOML configuration file parsing

use super::*;
use crate::config::cli::{Cli, Command, GenerateArgs, ReplayArgs};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the config file named on the command line (if any) and apply CLI overrides
pub fn resolve(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    Ok(merge_cli_with_config(cli, base))
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Config {
    merge_generate_args(&cli.generate, &mut config.generator);
    if let Some(Command::Replay(args)) = &cli.command {
        merge_replay_args(args, &mut config.replay);
    }
    config
}

fn merge_generate_args(args: &GenerateArgs, config: &mut GeneratorConfig) {
    if let Some(distribution) = args.distribution {
        config.distribution = distribution;
    }
    if let Some(objects) = args.objects {
        config.objects = objects;
    }
    if let Some(requests) = args.requests {
        config.requests = requests;
    }
    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(start) = args.start {
        config.start = start;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if let Some(output_file) = &args.output_file {
        config.output_file = output_file.clone();
    }
    if let Some(summary) = args.summary {
        config.summary = summary;
    }
}

fn merge_replay_args(args: &ReplayArgs, config: &mut ReplayConfig) {
    if args.trace.is_some() {
        config.trace = args.trace.clone();
    }
    if let Some(cache_size) = args.cache_size {
        config.cache_size = cache_size;
    }
    if let Some(small_ratio) = args.small_ratio {
        config.small_ratio = small_ratio;
    }
    if let Some(summary) = args.summary {
        config.summary = summary;
    }
}
