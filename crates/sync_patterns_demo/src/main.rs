//! Command line front end for `sync_patterns`.
//!
//! Each run subcommand builds a [sync_patterns::Config] (defaults, then an optional JSON/YAML file, then flags), runs
//! one pattern, and logs every worker event at `info`.  Set `RUST_LOG` to change what's shown; `RUST_LOG=warn` leaves
//! only the summary of anything that went wrong.
//!
//! The process exits nonzero if the configuration is rejected, a worker can't be started or panics, or a synchronized
//! record is seen to tear.
mod cli_args;
mod commands;

fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli_args::CliArgs::parse();
    commands::dispatch_command(&args)
}
