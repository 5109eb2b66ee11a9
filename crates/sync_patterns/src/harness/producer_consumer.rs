use std::sync::Arc;

use super::payload::{consume, Item, ProductionCounter};
use super::{join_in_phases, PausePlan, WorkerRoster, WritingPhase};
use crate::channel::{BoundedChannel, ChannelBackend, MonitorChannel, SemaphoreChannel};
use crate::config::Config;
use crate::error::Result;
use crate::worker::WorkerRole;

/// What happened during a producer/consumer run.
#[derive(Clone, Debug)]
pub struct ChannelReport {
    /// Items enqueued by each producer, indexed by identity - 1.
    pub produced: Vec<u64>,

    /// What each consumer dequeued, in the order it dequeued it, indexed by identity - 1.
    pub consumed: Vec<Vec<Item>>,

    /// Items still in the channel once every worker had been joined.
    pub pending_at_end: usize,

    /// Those same items, drained in channel order after the run.
    pub leftover: Vec<Item>,

    /// The most items the channel held at once.
    pub peak_len: usize,

    pub usable_capacity: usize,
}

impl ChannelReport {
    pub fn total_produced(&self) -> u64 {
        self.produced.iter().sum()
    }

    pub fn total_consumed(&self) -> u64 {
        self.consumed.iter().map(|c| c.len() as u64).sum()
    }
}

/// Run producers and consumers through a channel built on `backend`.
///
/// The config is validated first, so a run that would block forever is rejected instead.
pub fn run_producer_consumer(config: &Config, backend: ChannelBackend) -> Result<ChannelReport> {
    config.validate_channel()?;
    log::info!(
        "Producer/consumer run over {backend}: {} producers x {}, {} consumers x {}, capacity {}",
        config.num_producers,
        config.production_limit,
        config.num_consumers,
        config.consumption_limit,
        config.capacity
    );

    match backend {
        ChannelBackend::Condvar => drive_channel(config, MonitorChannel::new(config.capacity)),
        ChannelBackend::Semaphore => drive_channel(config, SemaphoreChannel::new(config.capacity)),
    }
}

/// Run producers and consumers through `channel`.
///
/// Only the config's counts and pauses are used; the channel brings its own capacity, and the counts are validated
/// against it.
///
/// If the consumers can't all be spawned the run fails with [crate::SetupError::Spawn], and producers that are
/// already running are detached.  Those that fill the channel stay blocked, holding it, until the process exits.
pub fn drive_channel<C: BoundedChannel<Item> + 'static>(config: &Config, channel: C) -> Result<ChannelReport> {
    Config {
        capacity: channel.capacity(),
        ..config.clone()
    }
    .validate_channel()?;

    let channel = Arc::new(channel);
    let counter = Arc::new(ProductionCounter::new());
    let phase = WritingPhase::new();
    let pauses = PausePlan::from_config(config);

    let producers = {
        let channel = channel.clone();
        let counter = counter.clone();
        let limit = config.production_limit;
        WorkerRoster::spawn(WorkerRole::Producer, config.num_producers, move |label| {
            let mut pauser = pauses.pauser_for(label);
            for _ in 0..limit {
                channel.enqueue_with(|| counter.produce(label, &mut pauser));
            }
            limit
        })?
    };

    let consumers = {
        let channel = channel.clone();
        let limit = config.consumption_limit;
        WorkerRoster::spawn(WorkerRole::Consumer, config.num_consumers, move |label| {
            let mut pauser = pauses.pauser_for(label);
            (0..limit)
                .map(|_| {
                    let item = channel.dequeue();
                    consume(label, item, &mut pauser);
                    item
                })
                .collect::<Vec<_>>()
        })?
    };

    let (produced, consumed) = join_in_phases(producers, consumers, &phase)?;

    let pending_at_end = channel.len();
    let leftover = std::iter::from_fn(|| channel.try_dequeue()).collect::<Vec<_>>();
    debug_assert_eq!(counter.produced(), produced.iter().sum::<u64>());

    log::info!(
        "Produced {}, consumed {}, {pending_at_end} left in the channel",
        counter.produced(),
        consumed.iter().map(Vec::len).sum::<usize>()
    );

    Ok(ChannelReport {
        produced,
        consumed,
        pending_at_end,
        leftover,
        peak_len: channel.peak_len(),
        usable_capacity: channel.usable_capacity(),
    })
}
