//! A counting semaphore.
//!
//! Permits are not tied to threads or guards: any thread may release a permit, including one which never acquired
//! anything.  That is what lets a reader cohort hand writer exclusion from its first member to its last.
use crate::sync::{lock, wait, Condvar, Mutex};

pub struct Semaphore {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// A semaphore with a single permit, usable as a lock that can be released from any thread.
    pub fn binary() -> Self {
        Self::new(1)
    }

    /// Take a permit, blocking until one is available.
    pub fn acquire(&self) {
        let mut permits = lock(&self.permits);
        while *permits == 0 {
            permits = wait(&self.available, permits);
        }
        *permits -= 1;
    }

    /// Take a permit if one is available right now.
    pub fn try_acquire(&self) -> bool {
        let mut permits = lock(&self.permits);
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Return a permit and wake one waiter.
    pub fn release(&self) {
        let mut permits = lock(&self.permits);
        *permits += 1;
        self.available.notify_one();
    }

    /// Snapshot of the free permits.  Stale as soon as it is returned unless the caller otherwise excludes changes.
    pub fn available_permits(&self) -> usize {
        *lock(&self.permits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sync::{spawn, wrap_test, Arc, AtomicUsize, Ordering};

    #[test]
    fn counts_permits() {
        wrap_test(|| {
            let sem = Semaphore::new(2);
            assert!(sem.try_acquire());
            assert!(sem.try_acquire());
            assert!(!sem.try_acquire());
            assert_eq!(sem.available_permits(), 0);

            sem.release();
            assert_eq!(sem.available_permits(), 1);
            sem.acquire();
            assert_eq!(sem.available_permits(), 0);
        });
    }

    /// A permit taken on one thread and released on another unblocks a third.
    #[test]
    fn release_from_another_thread() {
        wrap_test(|| {
            let sem = Arc::new(Semaphore::binary());
            sem.acquire();

            let waiter = {
                let sem = sem.clone();
                spawn(move || {
                    sem.acquire();
                    sem.release();
                })
            };

            let releaser = {
                let sem = sem.clone();
                spawn(move || sem.release())
            };

            releaser.join().unwrap();
            waiter.join().unwrap();
            assert_eq!(sem.available_permits(), 1);
        });
    }

    /// Never more than `permits` holders at once.
    #[test]
    fn bounds_admission() {
        wrap_test(|| {
            let sem = Arc::new(Semaphore::new(1));
            let inside = Arc::new(AtomicUsize::new(0));

            let handles = (0..2)
                .map(|_| {
                    let sem = sem.clone();
                    let inside = inside.clone();
                    spawn(move || {
                        sem.acquire();
                        assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                        inside.fetch_sub(1, Ordering::SeqCst);
                        sem.release();
                    })
                })
                .collect::<Vec<_>>();

            for h in handles {
                h.join().unwrap();
            }
            assert_eq!(sem.available_permits(), 1);
        });
    }
}
