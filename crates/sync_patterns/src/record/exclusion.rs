use crate::semaphore::Semaphore;
use crate::sync::{lock, wait, Condvar, Mutex};

/// A mutual exclusion whose release need not happen on the acquiring thread.
///
/// A reader cohort takes writer exclusion on its first reader's thread and returns it on its last reader's thread,
/// which rules out anything guard-scoped like [std::sync::MutexGuard].
pub trait Exclusion: Send + Sync {
    fn unlocked() -> Self
    where
        Self: Sized;

    /// Block until the exclusion is free, then take it.
    fn acquire(&self);

    /// Give the exclusion back.  May be called from any thread, but only while it is held.
    fn release(&self);
}

/// A lock built from a flag and a condition variable, with no owner.
pub struct HandoffLock {
    locked: Mutex<bool>,
    unlocked: Condvar,
}

impl HandoffLock {
    pub fn new() -> Self {
        Self {
            locked: Mutex::new(false),
            unlocked: Condvar::new(),
        }
    }

    pub fn is_locked(&self) -> bool {
        *lock(&self.locked)
    }
}

impl Default for HandoffLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Exclusion for HandoffLock {
    fn unlocked() -> Self {
        Self::new()
    }

    fn acquire(&self) {
        let mut locked = lock(&self.locked);
        while *locked {
            locked = wait(&self.unlocked, locked);
        }
        *locked = true;
    }

    fn release(&self) {
        let mut locked = lock(&self.locked);
        assert!(*locked, "Released a HandoffLock which was not held");
        *locked = false;
        self.unlocked.notify_one();
    }
}

impl Exclusion for Semaphore {
    fn unlocked() -> Self {
        Semaphore::binary()
    }

    fn acquire(&self) {
        Semaphore::acquire(self);
    }

    fn release(&self) {
        Semaphore::release(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sync::{spawn, wrap_test, Arc};

    #[test]
    fn handoff_lock_released_elsewhere() {
        wrap_test(|| {
            let lock = Arc::new(HandoffLock::new());
            lock.acquire();
            assert!(lock.is_locked());

            let releaser = {
                let lock = lock.clone();
                spawn(move || lock.release())
            };

            // Blocks until the other thread gives the lock back.
            lock.acquire();
            releaser.join().unwrap();
            assert!(lock.is_locked());
            lock.release();
            assert!(!lock.is_locked());
        });
    }

    #[test]
    #[should_panic(expected = "not held")]
    fn releasing_unheld_lock_panics() {
        wrap_test(|| HandoffLock::new().release());
    }
}
