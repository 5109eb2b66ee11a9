//! What producers make and consumers do with it.
//!
//! Producing is handing out the next value of a counter and consuming is logging it.  Neither matters beyond making
//! the patterns observable.
use std::sync::atomic::{AtomicU64, Ordering};

use crate::pause::Pauser;
use crate::worker::{WorkerId, WorkerLabel};

/// A produced value, tagged with its producer so per-producer order can be checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub producer: WorkerId,
    pub value: u64,
}

/// The value source for one run.
///
/// Channels call [ProductionCounter::produce] inside their exclusion region, so values enter the channel in counter
/// order.
#[derive(Debug, Default)]
pub struct ProductionCounter {
    next: AtomicU64,
}

impl ProductionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn produce(&self, producer: WorkerLabel, pauser: &mut Pauser) -> Item {
        pauser.pause();
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        log::info!("{producer}: produce {value}");
        Item {
            producer: producer.id,
            value,
        }
    }

    /// How many values have been handed out.
    pub fn produced(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

pub fn consume(consumer: WorkerLabel, item: Item, pauser: &mut Pauser) {
    log::info!("{consumer}: consumed {}", item.value);
    pauser.pause();
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::worker::WorkerRole;

    #[test]
    fn counter_hands_out_sequential_values() {
        let counter = ProductionCounter::new();
        let p1 = WorkerLabel::new(WorkerRole::Producer, WorkerId::new(1));
        let p2 = WorkerLabel::new(WorkerRole::Producer, WorkerId::new(2));
        let mut pauser = Pauser::disabled();

        assert_eq!(
            counter.produce(p1, &mut pauser),
            Item {
                producer: WorkerId::new(1),
                value: 0
            }
        );
        assert_eq!(counter.produce(p2, &mut pauser).value, 1);
        assert_eq!(counter.produced(), 2);
    }
}
