//! Run configuration.
//!
//! Everything about a run is determined by a [Config]: buffer capacity, per-worker iteration counts, roster sizes and
//! the pause magnitude.  Configs can be built in code with [ConfigBuilder] or loaded from JSON/YAML files whose keys
//! are the camelCase names of the fields (`capacity`, `productionLimit`, `maxPauseNanos`, ...).  Missing keys take
//! their defaults; unknown keys are rejected, so a misspelled key can't silently fall back to a default.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The most slots a channel may have.  Rings are allocated up front, so this bounds what a config file can make a
/// run allocate.
pub const MAX_CAPACITY: usize = 1 << 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
#[builder(pattern = "owned", default)]
pub struct Config {
    /// Slots in the channel's ring.  One is always kept free, so only `capacity - 1` items fit at once.
    pub capacity: usize,

    /// Items each producer enqueues.
    pub production_limit: u64,

    /// Items each consumer dequeues.
    pub consumption_limit: u64,

    pub num_producers: u32,
    pub num_consumers: u32,

    /// Writes each writer performs.
    pub write_actions: u64,

    /// Reads each reader attempts, each only while writers are still running.
    pub read_actions: u64,

    pub num_readers: u32,
    pub num_writers: u32,

    /// Upper bound on the random pauses injected to widen interleavings.  0 disables them.
    pub max_pause_nanos: u64,

    /// Seed for the pause generators.  If unset, every run picks a random one.
    #[builder(setter(strip_option))]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: 10,
            production_limit: 25,
            consumption_limit: 35,
            num_producers: 3,
            num_consumers: 2,
            write_actions: 20,
            read_actions: 1,
            num_readers: 3,
            num_writers: 3,
            max_pause_nanos: 20_000,
            seed: None,
        }
    }
}

impl Config {
    /// Load a config from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_deref() {
            Some("json") => serde_json::from_str(&text)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&text)?,
            _ => return Err(ConfigError::UnknownFormat(path.to_path_buf())),
        };

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Total items all producers will enqueue.
    pub fn total_production(&self) -> Result<u64, ConfigError> {
        (self.num_producers as u64)
            .checked_mul(self.production_limit)
            .ok_or(ConfigError::CountOverflow)
    }

    /// Total items all consumers will dequeue.
    pub fn total_consumption(&self) -> Result<u64, ConfigError> {
        (self.num_consumers as u64)
            .checked_mul(self.consumption_limit)
            .ok_or(ConfigError::CountOverflow)
    }

    /// Check that a producer/consumer run with this config terminates.
    ///
    /// Consumers block forever if producers supply fewer items than they demand, and producers block forever if the
    /// surplus doesn't fit in the channel once consumers are done.  Both are rejected here rather than left to hang.
    pub fn validate_channel(&self) -> Result<(), ConfigError> {
        if self.capacity < 2 {
            return Err(ConfigError::CapacityTooSmall {
                capacity: self.capacity,
            });
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                capacity: self.capacity,
                max: MAX_CAPACITY,
            });
        }

        let supply = self.total_production()?;
        let demand = self.total_consumption()?;
        if supply < demand {
            return Err(ConfigError::ConsumerStarvation { supply, demand });
        }

        let surplus = supply - demand;
        let usable = self.capacity as u64 - 1;
        if surplus > usable {
            return Err(ConfigError::ProducerStall { surplus, usable });
        }

        Ok(())
    }
}
