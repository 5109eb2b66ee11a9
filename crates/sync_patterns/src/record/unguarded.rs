use super::monitor::{AccessMonitor, AccessStats, GuardState};
use super::{Observation, RecordAccess, SharedRecord};
use crate::pause::Pauser;
use crate::worker::WorkerId;

/// A record with no access policy at all.
///
/// Reads and writes have the same shape as [super::GuardedRecord]'s but nothing keeps them apart, so with more than
/// one writer and pauses between the two stores readers will sooner or later see one writer's first field next to
/// another's second.
pub struct UnguardedRecord {
    record: SharedRecord,
    monitor: AccessMonitor,
}

impl UnguardedRecord {
    pub fn new() -> Self {
        Self {
            record: SharedRecord::new(),
            monitor: AccessMonitor::default(),
        }
    }

    pub fn state(&self) -> GuardState {
        self.monitor.state()
    }
}

impl Default for UnguardedRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordAccess for UnguardedRecord {
    fn write(&self, writer: WorkerId, pauser: &mut Pauser) {
        self.monitor.writer_entered();
        self.record.set(0, writer.get());
        pauser.pause();
        self.record.set(1, writer.get());
        self.monitor.writer_left();
        pauser.pause();
    }

    fn read(&self, pauser: &mut Pauser) -> Observation {
        self.monitor.reader_entered();
        let first = self.record.get(0);
        pauser.pause();
        let second = self.record.get(1);
        self.monitor.reader_left();
        pauser.pause();
        Observation::classify(first, second)
    }

    fn is_synchronized(&self) -> bool {
        false
    }

    fn stats(&self) -> AccessStats {
        self.monitor.stats()
    }
}
