use std::path::PathBuf;

use crate::worker::WorkerLabel;

/// A worker could not be started or finished.
///
/// These abort the whole run; nothing is retried.  Workers of the same run that were already started when a spawn
/// fails are detached rather than joined, and producers among them may stay blocked on a full channel for the life
/// of the process.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("could not spawn worker {worker}: {source}")]
    Spawn {
        worker: WorkerLabel,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {worker} panicked and could not be joined")]
    Join { worker: WorkerLabel },
}

/// A configuration was rejected before any worker started.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("channel capacity {capacity} leaves no usable slots; at least 2 are required")]
    CapacityTooSmall { capacity: usize },

    #[error("channel capacity {capacity} is more than the maximum of {max} slots")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error(
        "producers supply {supply} items but consumers demand {demand}; consumers would block forever"
    )]
    ConsumerStarvation { supply: u64, demand: u64 },

    #[error(
        "{surplus} items would be left over but the channel only holds {usable}; producers would block forever"
    )]
    ProducerStall { surplus: u64, usable: u64 },

    #[error("worker counts and limits overflow when multiplied")]
    CountOverflow,

    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot tell the format of {} from its extension (expected json, yaml or yml)", .0.display())]
    UnknownFormat(PathBuf),
}

#[derive(Debug, derive_more::Display, derive_more::IsVariant)]
enum ErrorPayload {
    #[display(fmt = "Setup failure: {}", _0)]
    Setup(SetupError),

    #[display(fmt = "Configuration hazard: {}", _0)]
    Config(ConfigError),
}

#[derive(Debug, thiserror::Error)]
#[error("{payload}")]
pub struct Error {
    payload: ErrorPayload,
}

macro_rules! conv {
    ($variant: ident, $from_err: path) => {
        impl From<$from_err> for Error {
            fn from(value: $from_err) -> Error {
                Error {
                    payload: ErrorPayload::$variant(value),
                }
            }
        }
    };
}

conv!(Setup, SetupError);
conv!(Config, ConfigError);

impl Error {
    /// Did a worker fail to start or join?
    pub fn is_setup_failure(&self) -> bool {
        self.payload.is_setup()
    }

    /// Was the configuration rejected?
    pub fn is_configuration_hazard(&self) -> bool {
        self.payload.is_config()
    }

    pub fn as_config_error(&self) -> Option<&ConfigError> {
        match &self.payload {
            ErrorPayload::Config(c) => Some(c),
            ErrorPayload::Setup(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::{WorkerId, WorkerRole};

    #[test]
    fn classification_follows_payload() {
        let setup: Error = SetupError::Join {
            worker: WorkerLabel::new(WorkerRole::Reader, WorkerId::new(2)),
        }
        .into();
        assert!(setup.is_setup_failure());
        assert!(!setup.is_configuration_hazard());
        assert!(setup.as_config_error().is_none());
        assert_eq!(
            setup.to_string(),
            "Setup failure: worker R2 panicked and could not be joined"
        );

        let config: Error = ConfigError::ConsumerStarvation {
            supply: 10,
            demand: 20,
        }
        .into();
        assert!(config.is_configuration_hazard());
        assert!(matches!(
            config.as_config_error(),
            Some(ConfigError::ConsumerStarvation {
                supply: 10,
                demand: 20
            })
        ));
    }
}
