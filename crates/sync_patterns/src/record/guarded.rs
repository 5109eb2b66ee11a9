use super::exclusion::{Exclusion, HandoffLock};
use super::monitor::{AccessMonitor, AccessStats, GuardState};
use super::{Observation, RecordAccess, SharedRecord};
use crate::pause::Pauser;
use crate::semaphore::Semaphore;
use crate::sync::{AtomicUsize, Ordering};
use crate::worker::WorkerId;

/// A record under the readers-preference policy, generic over the exclusion primitive.
///
/// `reader_gate` serializes updates to the reader count.  `writer_gate` is held either by one writer or by the whole
/// reader cohort.
pub struct GuardedRecord<E> {
    record: SharedRecord,
    reader_gate: E,
    writer_gate: E,

    /// Only touched while holding `reader_gate`.
    active_readers: AtomicUsize,

    monitor: AccessMonitor,
}

pub type LockedRecord = GuardedRecord<HandoffLock>;
pub type SemaphoreRecord = GuardedRecord<Semaphore>;

/// Membership in the current reader cohort.  Dropping it leaves the cohort.
pub struct ReadGuard<'a, E: Exclusion> {
    owner: &'a GuardedRecord<E>,
}

/// Exclusive write access.  Dropping it releases the record.
pub struct WriteGuard<'a, E: Exclusion> {
    owner: &'a GuardedRecord<E>,
}

impl<E: Exclusion> GuardedRecord<E> {
    pub fn new() -> Self {
        Self {
            record: SharedRecord::new(),
            reader_gate: E::unlocked(),
            writer_gate: E::unlocked(),
            active_readers: AtomicUsize::new(0),
            monitor: AccessMonitor::default(),
        }
    }

    /// Join the reader cohort, blocking only while a writer is inside.
    pub fn read_guard(&self) -> ReadGuard<'_, E> {
        self.reader_gate.acquire();
        let previous = self.active_readers.load(Ordering::Relaxed);
        self.active_readers.store(previous + 1, Ordering::Relaxed);
        if previous == 0 {
            // First in: take writer exclusion for the whole cohort.  Later readers queue on reader_gate meanwhile.
            self.writer_gate.acquire();
        }
        self.reader_gate.release();

        self.monitor.reader_entered();
        ReadGuard { owner: self }
    }

    /// Take exclusive access, blocking while a writer or any reader is inside.
    pub fn write_guard(&self) -> WriteGuard<'_, E> {
        self.writer_gate.acquire();
        self.monitor.writer_entered();
        WriteGuard { owner: self }
    }

    fn leave_cohort(&self) {
        self.monitor.reader_left();

        self.reader_gate.acquire();
        let remaining = self.active_readers.load(Ordering::Relaxed) - 1;
        self.active_readers.store(remaining, Ordering::Relaxed);
        if remaining == 0 {
            // Last out, possibly on a different thread than the first reader.
            self.writer_gate.release();
        }
        self.reader_gate.release();
    }

    pub fn state(&self) -> GuardState {
        self.monitor.state()
    }
}

impl<E: Exclusion> Default for GuardedRecord<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Exclusion> ReadGuard<'_, E> {
    pub fn field(&self, index: usize) -> u32 {
        self.owner.record.get(index)
    }
}

impl<E: Exclusion> Drop for ReadGuard<'_, E> {
    fn drop(&mut self) {
        self.owner.leave_cohort();
    }
}

impl<E: Exclusion> WriteGuard<'_, E> {
    pub fn field(&self, index: usize) -> u32 {
        self.owner.record.get(index)
    }

    pub fn set_field(&self, index: usize, value: u32) {
        self.owner.record.set(index, value);
    }
}

impl<E: Exclusion> Drop for WriteGuard<'_, E> {
    fn drop(&mut self) {
        self.owner.monitor.writer_left();
        self.owner.writer_gate.release();
    }
}

impl<E: Exclusion> RecordAccess for GuardedRecord<E> {
    fn write(&self, writer: WorkerId, pauser: &mut Pauser) {
        let guard = self.write_guard();
        guard.set_field(0, writer.get());
        pauser.pause();
        guard.set_field(1, writer.get());
        pauser.pause();
    }

    fn read(&self, pauser: &mut Pauser) -> Observation {
        let guard = self.read_guard();
        let first = guard.field(0);
        pauser.pause();
        let second = guard.field(1);
        pauser.pause();
        Observation::classify(first, second)
    }

    fn is_synchronized(&self) -> bool {
        true
    }

    fn stats(&self) -> AccessStats {
        self.monitor.stats()
    }
}
