//! Ordered priority frontier
//!
//! Min-priority queue keyed by `(priority, rank)`. Ranks below the frontier's
//! first sequence number are reserved for entries pushed with an explicit
//! rank; every other push takes the next sequence number, so among entries of
//! equal priority the explicitly ranked ones pop first (lowest rank first) and
//! the rest follow in push order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Min-heap of pixel indices with rank tie-break
#[derive(Debug, Clone, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<(i32, u64, usize)>>,
    sequence: u64,
    pushed: u64,
}

impl PriorityFrontier {
    /// Create an empty frontier with no reserved ranks
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frontier reserving ranks `0..first` for
    /// [`push_ranked`](Self::push_ranked)
    pub fn starting_at(first: u64) -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: first,
            pushed: 0,
        }
    }

    /// Push pixel `index` with `priority`, behind every entry of the same
    /// priority already pushed.
    pub fn push(&mut self, index: usize, priority: i32) {
        self.heap.push(Reverse((priority, self.sequence, index)));
        self.sequence += 1;
        self.pushed += 1;
    }

    /// Push pixel `index` with `priority` and an explicit `rank`.
    pub fn push_ranked(&mut self, index: usize, priority: i32, rank: u64) {
        self.heap.push(Reverse((priority, rank, index)));
        self.pushed += 1;
    }

    /// Pop the entry with the lowest `(priority, rank)` as `(priority, index)`.
    pub fn pop(&mut self) -> Option<(i32, usize)> {
        self.heap
            .pop()
            .map(|Reverse((priority, _, index))| (priority, index))
    }

    /// Peek at the lowest entry as `(priority, index)`
    pub fn peek(&self) -> Option<(i32, usize)> {
        self.heap
            .peek()
            .map(|Reverse((priority, _, index))| (*priority, *index))
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when no entries are pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of pushes so far
    pub fn pushed(&self) -> u64 {
        self.pushed
    }
}
