//! The circular storage shared by both channel backends.
//!
//! This is deliberately not thread-safe; backends wrap it in their exclusion region.

/// A fixed-capacity circular queue using the reserved-slot convention.
///
/// The ring is empty when `write_cursor == read_cursor` and full when advancing `write_cursor` would make it equal
/// `read_cursor`, so a ring with `capacity` slots holds at most `capacity - 1` items.
pub(crate) struct Ring<T> {
    slots: Box<[Option<T>]>,
    write_cursor: usize,
    read_cursor: usize,
    peak_len: usize,
}

impl<T> Ring<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "A ring needs at least one slot");

        Self {
            slots: (0..capacity).map(|_| None).collect(),
            write_cursor: 0,
            read_cursor: 0,
            peak_len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn usable_capacity(&self) -> usize {
        self.capacity() - 1
    }

    pub(crate) fn len(&self) -> usize {
        (self.write_cursor + self.capacity() - self.read_cursor) % self.capacity()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.write_cursor == self.read_cursor
    }

    pub(crate) fn is_full(&self) -> bool {
        self.advance(self.write_cursor) == self.read_cursor
    }

    /// The most items this ring has held at once.
    pub(crate) fn peak_len(&self) -> usize {
        self.peak_len
    }

    fn advance(&self, cursor: usize) -> usize {
        (cursor + 1) % self.capacity()
    }

    /// Insert at the write cursor.
    ///
    /// Panics if full: callers must have waited for space, and writing anyway would overwrite an unconsumed item.
    pub(crate) fn push(&mut self, item: T) {
        assert!(!self.is_full(), "Overflow: pushed to a full ring");
        debug_assert!(self.slots[self.write_cursor].is_none());

        self.slots[self.write_cursor] = Some(item);
        self.write_cursor = self.advance(self.write_cursor);
        self.peak_len = self.peak_len.max(self.len());
    }

    /// Take from the read cursor.
    ///
    /// Panics if empty: callers must have waited for an item.
    pub(crate) fn pop(&mut self) -> T {
        assert!(!self.is_empty(), "Underflow: popped from an empty ring");

        let item = self.slots[self.read_cursor]
            .take()
            .expect("Slots between the cursors are always filled");
        self.read_cursor = self.advance(self.read_cursor);
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use proptest::prelude::*;
    use proptest::proptest;

    #[test]
    fn reserves_one_slot() {
        let mut ring = Ring::new(4);
        assert!(ring.is_empty());
        assert_eq!(ring.usable_capacity(), 3);

        for i in 0..3 {
            assert!(!ring.is_full());
            ring.push(i);
        }
        assert!(ring.is_full());
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn cursors_wrap() {
        let mut ring = Ring::new(3);
        for i in 0..20u32 {
            ring.push(i);
            ring.push(i + 100);
            assert_eq!(ring.pop(), i);
            assert_eq!(ring.pop(), i + 100);
            assert!(ring.is_empty());
        }
        assert_eq!(ring.peak_len(), 2);
    }

    #[test]
    fn single_slot_ring_is_always_full() {
        let ring = Ring::<u8>::new(1);
        assert!(ring.is_empty());
        assert!(ring.is_full());
        assert_eq!(ring.usable_capacity(), 0);
    }

    #[test]
    #[should_panic(expected = "Overflow")]
    fn push_to_full_panics() {
        let mut ring = Ring::new(2);
        ring.push(1);
        ring.push(2);
    }

    #[test]
    #[should_panic(expected = "Underflow")]
    fn pop_from_empty_panics() {
        let mut ring = Ring::<u8>::new(2);
        ring.pop();
    }

    #[test]
    fn leftovers_drop_with_the_ring() {
        let marker = std::sync::Arc::new(());
        {
            let mut ring = Ring::new(5);
            for _ in 0..3 {
                ring.push(marker.clone());
            }
            ring.pop();
            assert_eq!(std::sync::Arc::strong_count(&marker), 3);
        }
        assert_eq!(std::sync::Arc::strong_count(&marker), 1);
    }

    proptest! {
        /// Any sequence of pushes and pops the ring accepts matches a `VecDeque` bounded at `capacity - 1`.
        #[test]
        fn behaves_like_bounded_deque(
            capacity in 1usize..12,
            ops in prop::collection::vec(any::<Option<u16>>(), 0..300),
        ) {
            let mut ring = Ring::new(capacity);
            let mut model = VecDeque::new();

            for op in ops {
                match op {
                    Some(v) if !ring.is_full() => {
                        ring.push(v);
                        model.push_back(v);
                    }
                    Some(_) => prop_assert_eq!(model.len(), capacity - 1),
                    None if !ring.is_empty() => {
                        prop_assert_eq!(Some(ring.pop()), model.pop_front());
                    }
                    None => prop_assert!(model.is_empty()),
                }

                prop_assert_eq!(ring.len(), model.len());
                prop_assert!(ring.len() <= ring.usable_capacity());
            }
        }
    }
}
