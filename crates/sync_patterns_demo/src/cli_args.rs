//! Definition of the Clap command line.
//!
//! The library's selectors ([ChannelBackend], [RecordVariant]) know nothing about clap, so the argument enums here
//! mirror them and convert with `From`.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use sync_patterns::{ChannelBackend, RecordVariant};

#[derive(Debug, Parser)]
#[command(about = "Run classic synchronization patterns and watch what they do")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run producers and consumers through a bounded channel.
    ProducerConsumer(ProducerConsumerArgs),

    /// Run readers and writers against a shared two-field record.
    ReadersWriters(ReadersWritersArgs),

    /// Print the default configuration, as a starting point for `--config`.
    PrintConfig(PrintConfigArgs),
}

/// Where a run's configuration comes from.  Flags override the file, which overrides the defaults.
#[derive(Debug, Parser)]
pub struct RunSettings {
    /// A `.json`, `.yaml` or `.yml` configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Upper bound on injected pauses, in nanoseconds.  0 disables them.
    #[arg(long)]
    pub max_pause_nanos: Option<u64>,

    /// Seed for the pause generators, to make a run's pauses repeatable.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Parser)]
pub struct ProducerConsumerArgs {
    #[arg(long, value_enum, default_value_t = BackendArg::Condvar)]
    pub backend: BackendArg,

    #[command(flatten)]
    pub settings: RunSettings,
}

#[derive(Debug, Parser)]
pub struct ReadersWritersArgs {
    #[arg(long, value_enum, default_value_t = VariantArg::Lock)]
    pub variant: VariantArg,

    #[command(flatten)]
    pub settings: RunSettings,
}

#[derive(Debug, Parser)]
pub struct PrintConfigArgs {
    #[arg(long, value_enum, default_value_t = FormatArg::Json)]
    pub format: FormatArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// A mutex with two condition variables.
    Condvar,

    /// Counting semaphores for free and filled slots.
    Semaphore,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Lock,
    Semaphore,

    /// No synchronization; reads are expected to tear.
    Unsynchronized,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
}

impl From<BackendArg> for ChannelBackend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Condvar => ChannelBackend::Condvar,
            BackendArg::Semaphore => ChannelBackend::Semaphore,
        }
    }
}

impl From<VariantArg> for RecordVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Lock => RecordVariant::Lock,
            VariantArg::Semaphore => RecordVariant::Semaphore,
            VariantArg::Unsynchronized => RecordVariant::Unsynchronized,
        }
    }
}
