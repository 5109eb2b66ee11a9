#[cfg(not(loom))]
mod not_loom {
    pub use std::sync::atomic::*;
    pub use std::sync::*;
    #[cfg(test)]
    pub use std::thread::spawn;

    #[cfg(test)]
    pub fn wrap_test(what: impl Fn() + Sync + Send + 'static) {
        what()
    }

    #[cfg(test)]
    pub fn wrap_test_bounded(_preemptions: usize, what: impl Fn() + Sync + Send + 'static) {
        what()
    }
}

#[cfg(not(loom))]
pub(crate) use not_loom::*;

#[cfg(loom)]
mod with_loom {
    pub use loom::sync::atomic::*;
    pub use loom::sync::*;
    #[cfg(test)]
    pub use loom::thread::spawn;
    pub use loom::thread::yield_now;

    #[cfg(test)]
    pub fn wrap_test(what: impl Fn() + Sync + Send + 'static) {
        loom::model(what)
    }

    /// Like [wrap_test], but explores only interleavings with at most `preemptions` forced context switches.
    ///
    /// Models with many threads blocking on each other are otherwise too large to finish.
    #[cfg(test)]
    pub fn wrap_test_bounded(preemptions: usize, what: impl Fn() + Sync + Send + 'static) {
        let mut builder = loom::model::Builder::new();
        builder.preemption_bound = Some(preemptions);
        builder.check(what)
    }
}
#[cfg(loom)]
pub(crate) use with_loom::*;

use std::sync::PoisonError;

// Every critical section in this crate leaves its state consistent before it can call out to anything that might
// panic, so a poisoned lock carries no information we care about.

/// Lock a mutex, ignoring poisoning.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Wait on a condition variable, ignoring poisoning.
///
/// Like any condvar wait this may return spuriously; callers loop on their predicate.
pub(crate) fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}
