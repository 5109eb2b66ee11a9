use super::ring::Ring;
use super::BoundedChannel;
use crate::semaphore::Semaphore;
use crate::sync::{lock, Mutex};

/// A [BoundedChannel] built from two counting semaphores and a separate exclusion over the ring.
///
/// `empty_slots` admits producers and `filled_slots` admits consumers.  An operation always takes its counting
/// permit before the exclusion and returns the complementary permit after releasing it.  Taking the exclusion first
/// would let a producer sleep on a full channel while holding the lock every consumer needs to make room.
pub struct SemaphoreChannel<T> {
    empty_slots: Semaphore,
    filled_slots: Semaphore,
    ring: Mutex<Ring<T>>,
}

impl<T> SemaphoreChannel<T> {
    /// Create a channel with `capacity` slots, of which `capacity - 1` are usable.
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        let ring = Ring::new(capacity);
        Self {
            // The ring reserves a slot, so only the usable slots are handed out as permits.
            empty_slots: Semaphore::new(ring.usable_capacity()),
            filled_slots: Semaphore::new(0),
            ring: Mutex::new(ring),
        }
    }
}

impl<T: Send> BoundedChannel<T> for SemaphoreChannel<T> {
    fn enqueue_with<F: FnOnce() -> T>(&self, make: F) {
        self.empty_slots.acquire();
        {
            let mut ring = lock(&self.ring);
            ring.push(make());
        }
        self.filled_slots.release();
    }

    fn try_enqueue(&self, item: T) -> Result<(), T> {
        if !self.empty_slots.try_acquire() {
            return Err(item);
        }
        lock(&self.ring).push(item);
        self.filled_slots.release();
        Ok(())
    }

    fn dequeue(&self) -> T {
        self.filled_slots.acquire();
        let item = lock(&self.ring).pop();
        self.empty_slots.release();
        item
    }

    fn try_dequeue(&self) -> Option<T> {
        if !self.filled_slots.try_acquire() {
            return None;
        }
        let item = lock(&self.ring).pop();
        self.empty_slots.release();
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
