use std::mem;

use super::Buffer::{Position, Ring};

impl<T: Default> Ring<T> {
    /// Create a ring with `capacity` default-initialized slots.
    ///
    /// # Panics
    /// If `capacity` is not a non-zero power of two. Configurations are
    /// validated before any ring is built, so this only fires on misuse.
    pub fn new(capacity: u32) -> Self {
        Self::starting_at(capacity, 0)
    }

    /// Create a ring whose cursors both start at `start` instead of zero.
    pub(crate) fn starting_at(capacity: u32, start: u32) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "ring capacity must be a non-zero power of two, got {capacity}"
        );
        let slots = (0..capacity).map(|_| T::default()).collect::<Vec<_>>();
        Self {
            head: start,
            tail: start,
            capacity,
            mask: capacity - 1,
            slots: slots.into_boxed_slice(),
        }
    }

    /// Consume the oldest position and move its value out, leaving a
    /// default in the slot.
    pub fn pop(&mut self) -> Option<T> {
        let pos = self.try_consume()?;
        Some(mem::take(self.slot_mut(pos)))
    }

    /// Drain every remaining value in FIFO order.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.capacity_used() as usize);
        while let Some(value) = self.pop() {
            out.push(value);
        }
        out
    }
}

impl<T> Ring<T> {
    /// Reserve the next producer position.
    ///
    /// Returns `None` when `tail - head == capacity`. The caller must fill
    /// the slot before releasing the lock that guards this ring.
    #[inline]
    pub fn try_reserve(&mut self) -> Option<Position> {
        if self.capacity_used() >= self.capacity {
            return None;
        }
        let pos = Position(self.tail);
        self.tail = self.tail.wrapping_add(1);
        Some(pos)
    }

    /// Claim the oldest published position.
    #[inline]
    pub fn try_consume(&mut self) -> Option<Position> {
        if self.head == self.tail {
            return None;
        }
        let pos = Position(self.head);
        self.head = self.head.wrapping_add(1);
        Some(pos)
    }

    /// Reserve a position and write `value` into it.
    ///
    /// Hands the value back when the ring is full.
    pub fn push(&mut self, value: T) -> Result<Position, T> {
        match self.try_reserve() {
            Some(pos) => {
                *self.slot_mut(pos) = value;
                Ok(pos)
            }
            None => Err(value),
        }
    }

    #[inline]
    pub fn slot(&self, pos: Position) -> &T {
        debug_assert!(
            (1..=self.capacity).contains(&self.tail.wrapping_sub(pos.0)),
            "position outside the reserved window"
        );
        &self.slots[(pos.0 & self.mask) as usize]
    }

    #[inline]
    pub fn slot_mut(&mut self, pos: Position) -> &mut T {
        debug_assert!(
            (1..=self.capacity).contains(&self.tail.wrapping_sub(pos.0)),
            "position outside the reserved window"
        );
        &mut self.slots[(pos.0 & self.mask) as usize]
    }

    /// `tail - head`, in wrapping arithmetic.
    #[inline]
    pub fn capacity_used(&self) -> u32 {
        self.tail.wrapping_sub(self.head)
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn free(&self) -> u32 {
        self.capacity - self.capacity_used()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.capacity_used() == self.capacity
    }

    /// Current `(head, tail)` cursors.
    #[inline]
    pub fn cursors(&self) -> (u32, u32) {
        (self.head, self.tail)
    }
}
