//! Fixed-capacity circular queue.
//!
//! `RingBuffer<T>` stores items in a fixed ring of `capacity` slots with
//! wrap-around `front`/`rear` indices. One slot is always sacrificed to
//! disambiguate full from empty:
//!
//! - `front == rear` means empty
//! - `(rear + 1) % capacity == front` means full
//!
//! so a buffer of capacity `C` holds at most `C - 1` live items. Enqueue and
//! dequeue never block and never mutate state on failure.

use crate::error::QueueError;

/// A bounded FIFO ring buffer with wrap-around index arithmetic.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    front: usize,
    rear: usize,
}

impl<T> RingBuffer<T> {
    /// Create a ring with the given slot count.
    ///
    /// Returns `QueueError::InvalidCapacity` for capacities below 2, since a
    /// one-slot ring is permanently full under the sacrificed-slot scheme.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity <= 1 {
            return Err(QueueError::InvalidCapacity { capacity });
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            front: 0,
            rear: 0,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.front == self.rear
    }

    pub fn is_full(&self) -> bool {
        (self.rear + 1) % self.slots.len() == self.front
    }

    /// Number of live items, always in `0..capacity`.
    pub fn len(&self) -> usize {
        let capacity = self.slots.len();
        (self.rear + capacity - self.front) % capacity
    }

    /// Total slot count (one more than the maximum number of live items).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Store an item at the slot after `rear`.
    ///
    /// On a full buffer this reports `CapacityExceeded` and leaves both the
    /// contents and the indices untouched.
    pub fn enqueue(&mut self, item: T) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::CapacityExceeded {
                capacity: self.slots.len(),
            });
        }
        self.rear = (self.rear + 1) % self.slots.len();
        self.slots[self.rear] = Some(item);
        Ok(())
    }

    /// Remove and return the oldest live item.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        self.front = (self.front + 1) % self.slots.len();
        // The slot after front always holds an item when the ring is non-empty.
        self.slots[self.front].take().ok_or(QueueError::Empty)
    }

    /// Iterate the live items from oldest to newest without removing them.
    ///
    /// Visits exactly the slots between `front` (exclusive) and `rear`
    /// (inclusive), wrapping modulo capacity.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            cursor: self.front,
            remaining: self.len(),
        }
    }

    /// Remove every live item, oldest first.
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len());
        while let Ok(item) = self.dequeue() {
            items.push(item);
        }
        items
    }
}

/// Non-destructive front-to-rear iterator over a `RingBuffer`.
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    cursor: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.ring.slots.len();
        self.remaining -= 1;
        self.ring.slots[self.cursor].as_ref()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
