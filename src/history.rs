// Bounded undo history of full surface snapshots.
// Memory note: one 1280x720 snapshot is ~3.7MB, so depth trades directly against RAM.

use crate::types::Surface;
use std::collections::VecDeque;

pub const DEFAULT_MAX_UNDO: usize = 500;

pub struct UndoStack {
    snapshots: VecDeque<Surface>, // oldest at the front, newest at the back
    capacity: usize,
}

impl UndoStack {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Push a snapshot; when full, the oldest one is dropped.
    /// Returns true if something was evicted.
    pub fn push(&mut self, snapshot: Surface) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let mut evicted = false;
        while self.snapshots.len() >= self.capacity {
            self.snapshots.pop_front();
            evicted = true;
        }
        self.snapshots.push_back(snapshot);
        evicted
    }

    pub fn pop(&mut self) -> Option<Surface> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Bytes currently retained by snapshots.
    pub fn byte_size(&self) -> usize {
        self.snapshots.iter().map(Surface::byte_size).sum()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UNDO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn tagged(n: u8) -> Surface {
        Surface::new(1, 1, Color::rgb(n, 0, 0))
    }

    #[test]
    fn pops_most_recent_first() {
        let mut stack = UndoStack::new(4);
        stack.push(tagged(1));
        stack.push(tagged(2));
        assert_eq!(stack.pop(), Some(tagged(2)));
        assert_eq!(stack.pop(), Some(tagged(1)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn full_stack_evicts_oldest() {
        let mut stack = UndoStack::new(3);
        for n in 1..=3 {
            assert!(!stack.push(tagged(n)));
        }
        assert!(stack.push(tagged(4)));
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(tagged(4)));
        assert_eq!(stack.pop(), Some(tagged(3)));
        assert_eq!(stack.pop(), Some(tagged(2)));
        assert!(stack.is_empty());
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut stack = UndoStack::new(0);
        stack.push(tagged(1));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn clear_and_byte_size() {
        let mut stack = UndoStack::default();
        assert_eq!(stack.capacity(), DEFAULT_MAX_UNDO);
        stack.push(Surface::new(10, 10, Color::BLACK));
        stack.push(Surface::new(10, 10, Color::BLACK));
        assert_eq!(stack.byte_size(), 2 * 10 * 10 * 4);
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.byte_size(), 0);
    }
}
