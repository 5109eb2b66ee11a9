//! Bounded multi-producer, multi-consumer channels.
//!
//! A channel is a fixed-capacity circular queue.  Producers block while it is full and consumers block while it is
//! empty; nothing is ever overwritten before it is consumed, and nothing is consumed that was never written.  Items
//! come out in the order they went in.  There is no ordering between producers beyond that: which producer's item
//! lands in which slot depends on scheduling.
//!
//! Two backends implement the same contract:
//!
//! - [MonitorChannel]: a mutex and two condition variables.
//! - [SemaphoreChannel]: two counting semaphores and a separate exclusion.
//!
//! Blocking waits are unbounded.  If consumers demand more than producers will ever supply, they block forever; see
//! [crate::Config::validate_channel], which rejects such configurations up front.
mod counting;
mod monitor;
mod ring;

pub use counting::SemaphoreChannel;
pub use monitor::MonitorChannel;

use serde::{Deserialize, Serialize};

/// Which primitive a channel is built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ChannelBackend {
    #[display(fmt = "condition variables")]
    Condvar,

    #[display(fmt = "counting semaphores")]
    Semaphore,
}

pub trait BoundedChannel<T>: Send + Sync {
    /// Block until there is room, then insert the value `make` returns.
    ///
    /// `make` runs inside the exclusion region, so values it produces from shared state (e.g. a counter) enter the
    /// channel in the order they were made.
    fn enqueue_with<F: FnOnce() -> T>(&self, make: F);

    /// Block until there is room, then insert `item`.
    fn enqueue(&self, item: T) {
        self.enqueue_with(move || item);
    }

    /// Insert `item` if there is room right now, otherwise hand it back.
    fn try_enqueue(&self, item: T) -> Result<(), T>;

    /// Block until an item is available, then remove the oldest one.
    fn dequeue(&self) -> T;

    /// Remove the oldest item if there is one right now.
    fn try_dequeue(&self) -> Option<T>;

    /// Items currently in the channel.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots in the ring, including the reserved one.
    fn capacity(&self) -> usize;

    /// The most items the channel can hold at once.
    fn usable_capacity(&self) -> usize {
        self.capacity() - 1
    }

    /// The most items the channel has held at once.
    fn peak_len(&self) -> usize;
}
