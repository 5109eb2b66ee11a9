use std::sync::Arc;

use super::{join_in_phases, PausePlan, WorkerRoster, WritingPhase};
use crate::config::Config;
use crate::error::Result;
use crate::record::{AccessStats, Observation, RecordAccess, RecordVariant};
use crate::worker::{WorkerLabel, WorkerRole};

/// What happened during a readers/writers run.
#[derive(Clone, Debug)]
pub struct RecordReport {
    /// Whether the record promised consistent reads.
    pub synchronized: bool,

    /// Writes by each writer, indexed by identity - 1.
    pub writes: Vec<u64>,

    /// What each reader saw, in order, indexed by identity - 1.
    pub observations: Vec<Vec<Observation>>,

    pub stats: AccessStats,
}

impl RecordReport {
    pub fn total_reads(&self) -> usize {
        self.observations.iter().map(Vec::len).sum()
    }

    pub fn consistent_reads(&self) -> usize {
        self.total_reads() - self.inconsistent_reads()
    }

    pub fn inconsistent_reads(&self) -> usize {
        self.observations
            .iter()
            .flatten()
            .filter(|o| !o.is_consistent())
            .count()
    }
}

pub fn run_readers_writers(config: &Config, variant: RecordVariant) -> Result<RecordReport> {
    log::info!(
        "Readers/writers run with {variant}: {} writers x {}, {} readers x up to {}",
        config.num_writers,
        config.write_actions,
        config.num_readers,
        config.read_actions
    );
    drive_record(config, Arc::from(variant.new_record()))
}

/// Run writers and readers against `record`.
///
/// Readers stop early once every writer has finished, so a run may see fewer than `read_actions` reads per reader.
pub fn drive_record(config: &Config, record: Arc<dyn RecordAccess>) -> Result<RecordReport> {
    let phase = Arc::new(WritingPhase::new());
    let pauses = PausePlan::from_config(config);
    let synchronized = record.is_synchronized();

    let writers = {
        let record = record.clone();
        let actions = config.write_actions;
        WorkerRoster::spawn(WorkerRole::Writer, config.num_writers, move |label| {
            let mut pauser = pauses.pauser_for(label);
            for _ in 0..actions {
                record.write(label.id, &mut pauser);
            }
            actions
        })?
    };

    let readers = {
        let record = record.clone();
        let phase = phase.clone();
        let actions = config.read_actions;
        WorkerRoster::spawn(WorkerRole::Reader, config.num_readers, move |label| {
            let mut pauser = pauses.pauser_for(label);
            let mut seen = vec![];
            for _ in 0..actions {
                if !phase.is_active() {
                    break;
                }
                let observation = record.read(&mut pauser);
                log_observation(label, observation, synchronized);
                seen.push(observation);
            }
            seen
        })?
    };

    let (writes, observations) = join_in_phases(writers, readers, &phase)?;

    let report = RecordReport {
        synchronized,
        writes,
        observations,
        stats: record.stats(),
    };
    log::info!(
        "{} reads, {} inconsistent; at most {} readers at once",
        report.total_reads(),
        report.inconsistent_reads(),
        report.stats.peak_concurrent_readers
    );
    if report.stats.exclusion_violations > 0 {
        let level = if synchronized {
            log::Level::Error
        } else {
            log::Level::Info
        };
        log::log!(
            level,
            "{} exclusion violations",
            report.stats.exclusion_violations
        );
    }

    Ok(report)
}

fn log_observation(reader: WorkerLabel, observation: Observation, synchronized: bool) {
    match observation {
        Observation::Consistent(value) => {
            log::info!("{reader}: Consistent record containing {value}");
        }
        Observation::Inconsistent { first, second } if synchronized => {
            log::error!("{reader}: Inconsistent record: field 0 = {first}, field 1 = {second}");
        }
        Observation::Inconsistent { first, second } => {
            log::info!("{reader}: Inconsistent record: field 0 = {first}, field 1 = {second}");
        }
    }
}
