//! Worker lifecycle: spawn rosters, run them to completion, join them in phase order.
//!
//! Every run has two rosters.  The first (producers or writers) is joined completely before the [WritingPhase] flag
//! is flipped, and only then is the second (consumers or readers) joined.  The joins are what order the flip after
//! every first-roster write; readers that check the flag afterwards see it.
//!
//! A worker which cannot be spawned or which panics aborts the whole run with a [SetupError].  Workers still running
//! at that point are detached.
mod payload;
mod producer_consumer;
mod readers_writers;

pub use payload::{consume, Item, ProductionCounter};
pub use producer_consumer::{run_producer_consumer, ChannelReport};
pub use readers_writers::{run_readers_writers, RecordReport};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::Config;
use crate::error::SetupError;
use crate::pause::{worker_seed, Pauser};
use crate::worker::{WorkerId, WorkerLabel, WorkerRole};

/// Set while the first roster is still running.  Flipped exactly once, by the orchestrating thread.
pub struct WritingPhase {
    active: AtomicBool,
}

impl WritingPhase {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn finish(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for WritingPhase {
    fn default() -> Self {
        Self::new()
    }
}

/// A set of running workers sharing one role, with identities `1..=count`.
pub struct WorkerRoster<T> {
    workers: Vec<(WorkerLabel, JoinHandle<T>)>,
}

impl<T: Send + 'static> WorkerRoster<T> {
    /// Spawn `count` named threads, each running `body` with its own label.
    ///
    /// Each worker logs when it enters and finishes.  If a spawn fails, the workers this call already started are
    /// detached: their handles are dropped and they run on unsupervised.
    pub fn spawn<F>(role: WorkerRole, count: u32, body: F) -> Result<Self, SetupError>
    where
        F: Fn(WorkerLabel) -> T + Send + Sync + 'static,
    {
        let body = Arc::new(body);
        let mut workers = Vec::with_capacity(count as usize);

        for id in 1..=count {
            let label = WorkerLabel::new(role, WorkerId::new(id));
            let body = body.clone();

            let handle = std::thread::Builder::new()
                .name(label.to_string())
                .spawn(move || {
                    log::info!("{label} entered");
                    let result = body(label);
                    log::info!("{label} finished");
                    result
                })
                .map_err(|source| SetupError::Spawn {
                    worker: label,
                    source,
                })?;

            workers.push((label, handle));
        }

        Ok(Self { workers })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Join every worker in identity order, returning their results in the same order.
    pub fn join_all(self) -> Result<Vec<T>, SetupError> {
        let mut results = Vec::with_capacity(self.workers.len());
        for (label, handle) in self.workers {
            let result = handle
                .join()
                .map_err(|_| SetupError::Join { worker: label })?;
            results.push(result);
        }
        Ok(results)
    }
}

/// Join `first`, flip `phase`, then join `second`.
pub(crate) fn join_in_phases<A: Send + 'static, B: Send + 'static>(
    first: WorkerRoster<A>,
    second: WorkerRoster<B>,
    phase: &WritingPhase,
) -> Result<(Vec<A>, Vec<B>), SetupError> {
    log::info!("Threads initialized");

    let first = first.join_all()?;
    phase.finish();
    log::debug!("Writing phase finished");

    let second = second.join_all()?;
    Ok((first, second))
}

/// Per-run pause settings, from which each worker builds its own [Pauser].
#[derive(Copy, Clone, Debug)]
pub(crate) struct PausePlan {
    max_pause_nanos: u64,
    run_seed: u64,
}

impl PausePlan {
    pub(crate) fn from_config(config: &Config) -> Self {
        let run_seed = config.seed.unwrap_or_else(rand::random);
        log::debug!(
            "Pausing up to {}ns with run seed {run_seed}",
            config.max_pause_nanos
        );

        Self {
            max_pause_nanos: config.max_pause_nanos,
            run_seed,
        }
    }

    pub(crate) fn pauser_for(&self, label: WorkerLabel) -> Pauser {
        let stream = ((label.role as u64) << 32) | label.id.get() as u64;
        Pauser::new(self.max_pause_nanos, worker_seed(self.run_seed, stream))
    }
}
