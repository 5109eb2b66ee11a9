mod print_config;
mod producer_consumer;
mod readers_writers;

use anyhow::{Context, Result};

use sync_patterns::Config;

use crate::cli_args::{self, RunSettings};

/// Figure out what command to run, then run it.
pub fn dispatch_command(args: &cli_args::CliArgs) -> Result<()> {
    match &args.command {
        cli_args::Command::ProducerConsumer(pc) => producer_consumer::producer_consumer(args, pc),
        cli_args::Command::ReadersWriters(rw) => readers_writers::readers_writers(args, rw),
        cli_args::Command::PrintConfig(pc) => print_config::print_config(args, pc),
    }
}

/// Build the configuration for a run: defaults, then the file if any, then flags.
fn resolve_config(settings: &RunSettings) -> Result<Config> {
    let mut config = match &settings.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("While loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(max_pause_nanos) = settings.max_pause_nanos {
        config.max_pause_nanos = max_pause_nanos;
    }
    if let Some(seed) = settings.seed {
        config.seed = Some(seed);
    }

    log::debug!("Resolved configuration: {config:?}");
    Ok(config)
}
