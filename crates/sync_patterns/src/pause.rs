//! Random pauses used to widen interleaving windows.
//!
//! These are a testing device and never a correctness mechanism: every pattern in this crate is correct with pauses
//! disabled.  Each worker owns its own [Pauser] so that no generator state is shared between threads.
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

pub struct Pauser {
    max_pause_nanos: u64,
    rng: Xoshiro256PlusPlus,
}

impl Pauser {
    pub fn new(max_pause_nanos: u64, seed: u64) -> Self {
        Self {
            max_pause_nanos,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// A pauser which never pauses.
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.max_pause_nanos != 0
    }

    /// Draw the next pause length, in `[0, max_pause_nanos)`.
    pub fn next_duration(&mut self) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }

        Duration::from_nanos(self.rng.gen_range(0..self.max_pause_nanos))
    }

    /// Block the calling thread for a random duration.
    pub fn pause(&mut self) {
        let duration = self.next_duration();
        if duration.is_zero() {
            return;
        }

        #[cfg(not(loom))]
        std::thread::sleep(duration);

        // Loom can't model sleeping, but a yield gives it the same interleaving point.
        #[cfg(loom)]
        crate::sync::yield_now();
    }
}

/// Derive a per-worker seed from a run seed so that workers don't pause in lockstep.
pub fn worker_seed(run_seed: u64, stream: u64) -> u64 {
    // The golden-ratio increment SplitMix64 uses to separate streams.
    run_seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_never_pauses() {
        let mut pauser = Pauser::disabled();
        assert!(!pauser.is_enabled());
        for _ in 0..100 {
            assert_eq!(pauser.next_duration(), Duration::ZERO);
        }
    }

    #[test]
    fn durations_stay_under_max() {
        let mut pauser = Pauser::new(500, 3);
        for _ in 0..10_000 {
            assert!(pauser.next_duration() < Duration::from_nanos(500));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Pauser::new(1_000_000, 99);
        let mut b = Pauser::new(1_000_000, 99);
        let a = (0..32).map(|_| a.next_duration()).collect::<Vec<_>>();
        let b = (0..32).map(|_| b.next_duration()).collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn worker_seeds_differ() {
        assert_ne!(worker_seed(5, 1), worker_seed(5, 2));
        assert_eq!(worker_seed(5, 0), 5);
    }
}
