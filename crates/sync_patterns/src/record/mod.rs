//! A two-field shared record under a readers/writers policy.
//!
//! Writers store their identity into both fields, pausing in between.  Readers read both fields, pausing in between,
//! and report whether they matched.  Under a correct policy a reader can never see a half-finished write, so every
//! read is [Observation::Consistent]; [UnguardedRecord] drops the policy entirely and exists to show what that looks
//! like.
//!
//! The policy is the classic readers-preference one: the first reader into an empty record takes writer exclusion
//! on behalf of every reader that follows, and the last reader out gives it back.  A steady stream of readers can
//! therefore starve writers indefinitely.
mod exclusion;
mod guarded;
mod monitor;
mod unguarded;

pub use exclusion::{Exclusion, HandoffLock};
pub use guarded::{GuardedRecord, LockedRecord, ReadGuard, SemaphoreRecord, WriteGuard};
pub use monitor::{AccessStats, GuardState};
pub use unguarded::UnguardedRecord;

use serde::{Deserialize, Serialize};

use crate::pause::Pauser;
use crate::sync::{AtomicU32, Ordering};
use crate::worker::WorkerId;

/// Which policy protects a record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum RecordVariant {
    /// Readers-preference policy over hand-off locks.
    #[display(fmt = "locks")]
    Lock,

    /// Readers-preference policy over binary semaphores.
    #[display(fmt = "semaphores")]
    Semaphore,

    /// No policy at all.
    #[display(fmt = "no synchronization")]
    Unsynchronized,
}

impl RecordVariant {
    pub fn is_synchronized(self) -> bool {
        !matches!(self, RecordVariant::Unsynchronized)
    }

    pub fn new_record(self) -> Box<dyn RecordAccess> {
        match self {
            RecordVariant::Lock => Box::new(LockedRecord::new()),
            RecordVariant::Semaphore => Box::new(SemaphoreRecord::new()),
            RecordVariant::Unsynchronized => Box::new(UnguardedRecord::new()),
        }
    }
}

/// What a reader saw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Observation {
    /// Both fields held the same writer's identity.
    Consistent(u32),

    /// The fields came from different writes.
    Inconsistent { first: u32, second: u32 },
}

impl Observation {
    pub fn classify(first: u32, second: u32) -> Self {
        if first == second {
            Observation::Consistent(first)
        } else {
            Observation::Inconsistent { first, second }
        }
    }

    pub fn is_consistent(&self) -> bool {
        matches!(self, Observation::Consistent(_))
    }
}

/// The operations every record variant supports.
pub trait RecordAccess: Send + Sync {
    /// Store `writer` into both fields, pausing after each store.
    fn write(&self, writer: WorkerId, pauser: &mut Pauser);

    /// Read both fields with a pause between them and classify the result.
    fn read(&self, pauser: &mut Pauser) -> Observation;

    /// Whether this variant promises consistent reads.
    fn is_synchronized(&self) -> bool;

    fn stats(&self) -> AccessStats;
}

/// The raw two-field storage.
///
/// Fields are atomics so that unsynchronized access is a logic race rather than undefined behavior.  Ordering comes
/// from whatever exclusion the caller holds; the fields themselves are relaxed.
pub(crate) struct SharedRecord {
    fields: [AtomicU32; 2],
}

impl SharedRecord {
    pub(crate) fn new() -> Self {
        // 0 is never a worker identity, so it reads as "never written".
        Self {
            fields: [AtomicU32::new(0), AtomicU32::new(0)],
        }
    }

    pub(crate) fn get(&self, index: usize) -> u32 {
        self.fields[index].load(Ordering::Relaxed)
    }

    pub(crate) fn set(&self, index: usize, value: u32) {
        self.fields[index].store(value, Ordering::Relaxed);
    }
}
