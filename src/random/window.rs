//! Fixed-capacity FIFO of the most recent generator outputs.

use std::collections::VecDeque;

/// Rotating window over the last `capacity` bytes produced by a generator.
///
/// Pushing into a full window evicts the oldest byte, so the length never
/// exceeds the capacity and the contents are always the latest pushes in
/// arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatingWindow {
    bytes: VecDeque<u8>,
    capacity: usize,
}

impl RotatingWindow {
    /// Creates an empty window holding at most `capacity` bytes.
    ///
    /// A window of capacity 0 discards every push.
    pub fn new(capacity: usize) -> Self {
        RotatingWindow {
            bytes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `byte`, evicting the oldest byte if the window is full.
    pub fn push(&mut self, byte: u8) {
        if self.capacity == 0 {
            return;
        }
        if self.bytes.len() >= self.capacity {
            self.bytes.pop_front();
        }
        self.bytes.push_back(byte);
    }

    /// Returns `true` if the window holds exactly `pattern`, same length and
    /// same order.
    pub fn matches(&self, pattern: &[u8]) -> bool {
        self.bytes.len() == pattern.len() && self.bytes.iter().eq(pattern.iter())
    }

    /// Number of bytes currently held.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if no byte has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Maximum number of bytes held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the oldest to the newest byte.
    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.bytes.iter()
    }

    /// Copies the contents, oldest first.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.iter().copied().collect()
    }
}
