// The monitor uses std atomics even under loom: it only observes what happened and must not add orderings of its own
// that could hide a missing one in the policy being tested.
use std::sync::atomic::{AtomicUsize, Ordering};

/// Where a record's access policy currently stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    WriterActive,
    ReadersActive(usize),
}

/// Counters gathered over a record's lifetime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessStats {
    /// The most readers that were reading at the same moment.
    pub peak_concurrent_readers: usize,

    /// Times a writer was inside alongside a reader or another writer.
    pub exclusion_violations: usize,
}

/// Instrumentation for who is inside a record.
///
/// Entering increments the caller's own count before checking the other side's, so of two racing entries at least
/// one sees the other.
#[derive(Default)]
pub(crate) struct AccessMonitor {
    readers_inside: AtomicUsize,
    writers_inside: AtomicUsize,
    peak_readers: AtomicUsize,
    violations: AtomicUsize,
}

impl AccessMonitor {
    pub(crate) fn reader_entered(&self) {
        let readers = self.readers_inside.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_readers.fetch_max(readers, Ordering::SeqCst);

        if self.writers_inside.load(Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) fn reader_left(&self) {
        self.readers_inside.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn writer_entered(&self) {
        let writers = self.writers_inside.fetch_add(1, Ordering::SeqCst) + 1;
        if writers > 1 || self.readers_inside.load(Ordering::SeqCst) != 0 {
            self.violations.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub(crate) fn writer_left(&self) {
        self.writers_inside.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn state(&self) -> GuardState {
        if self.writers_inside.load(Ordering::SeqCst) != 0 {
            return GuardState::WriterActive;
        }

        match self.readers_inside.load(Ordering::SeqCst) {
            0 => GuardState::Idle,
            n => GuardState::ReadersActive(n),
        }
    }

    pub(crate) fn stats(&self) -> AccessStats {
        AccessStats {
            peak_concurrent_readers: self.peak_readers.load(Ordering::SeqCst),
            exclusion_violations: self.violations.load(Ordering::SeqCst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_state_and_violations() {
        let monitor = AccessMonitor::default();
        assert_eq!(monitor.state(), GuardState::Idle);

        monitor.reader_entered();
        monitor.reader_entered();
        assert_eq!(monitor.state(), GuardState::ReadersActive(2));

        monitor.writer_entered();
        assert_eq!(monitor.state(), GuardState::WriterActive);
        monitor.writer_left();

        monitor.reader_left();
        monitor.reader_left();
        assert_eq!(monitor.state(), GuardState::Idle);

        assert_eq!(
            monitor.stats(),
            AccessStats {
                peak_concurrent_readers: 2,
                exclusion_violations: 1,
            }
        );
    }
}
