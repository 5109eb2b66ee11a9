use super::ring::Ring;
use super::BoundedChannel;
use crate::sync::{lock, wait, Condvar, Mutex};

/// A [BoundedChannel] built as a monitor: one mutex over the ring, and a condition variable for each direction.
///
/// Producers wait on `not_full` and consumers on `not_empty`.  Every successful mutation signals the other side.
pub struct MonitorChannel<T> {
    ring: Mutex<Ring<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> MonitorChannel<T> {
    /// Create a channel with `capacity` slots, of which `capacity - 1` are usable.
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: Mutex::new(Ring::new(capacity)),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }
}

impl<T: Send> BoundedChannel<T> for MonitorChannel<T> {
    fn enqueue_with<F: FnOnce() -> T>(&self, make: F) {
        let mut ring = lock(&self.ring);
        // Re-checked after every wake: wakes may be spurious, and another producer may have taken the slot first.
        while ring.is_full() {
            ring = wait(&self.not_full, ring);
        }

        ring.push(make());
        self.not_empty.notify_one();
    }

    fn try_enqueue(&self, item: T) -> Result<(), T> {
        let mut ring = lock(&self.ring);
        if ring.is_full() {
            return Err(item);
        }

        ring.push(item);
        self.not_empty.notify_one();
        Ok(())
    }

    fn dequeue(&self) -> T {
        let mut ring = lock(&self.ring);
        while ring.is_empty() {
            ring = wait(&self.not_empty, ring);
        }

        let item = ring.pop();
        self.not_full.notify_one();
        item
    }

    fn try_dequeue(&self) -> Option<T> {
        let mut ring = lock(&self.ring);
        if ring.is_empty() {
            return None;
        }

        let item = ring.pop();
        self.not_full.notify_one();
        Some(item)
    }

    fn len(&self) -> usize {
        lock(&self.ring).len()
    }

    fn capacity(&self) -> usize {
        lock(&self.ring).capacity()
    }

    fn peak_len(&self) -> usize {
        lock(&self.ring).peak_len()
    }
}
