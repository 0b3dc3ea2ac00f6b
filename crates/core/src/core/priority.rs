//! Priority queue for BPE merge candidates.
//!
//! Selection during training must be reproducible: the queue orders
//! candidates by count, and breaks count ties toward the lexicographically
//! smallest `(first, second)` pair, so training twice on the same corpus
//! yields the same merge list regardless of hash-map iteration order.

use crate::core::merges::Pair;
use ahash::AHashMap;
use dary_heap::OctonaryHeap;

/// A merge candidate during BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of token IDs to merge
    pub pair: Pair,
    /// The frequency of this pair
    pub count: u64,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64) -> Self {
        Self { pair, count }
    }
}

impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Higher count wins; equal counts fall back to the smaller pair,
        // inverted here so the max-heap pops it first.
        self.count
            .cmp(&other.count)
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue over pair frequencies with stale-entry detection.
///
/// Counts change as merges rewrite the sequence; rather than rebuilding the
/// heap, updates push a fresh entry and `pop` discards entries whose count
/// no longer matches the current value for their pair.
pub struct PairPriorityQueue {
    /// The heap storing merge candidates (8-ary for cache locality)
    heap: OctonaryHeap<MergeCandidate>,
    /// Current count per pair, used to detect stale heap entries
    current_counts: AHashMap<Pair, u64>,
}

impl PairPriorityQueue {
    /// Create a new empty priority queue.
    pub fn new() -> Self {
        Self {
            heap: OctonaryHeap::new(),
            current_counts: AHashMap::new(),
        }
    }

    /// Create a new priority queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
            current_counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Push a merge candidate onto the queue.
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.current_counts.insert(candidate.pair, candidate.count);
        self.heap.push(candidate);
    }

    /// Pop the highest priority non-stale candidate.
    ///
    /// Returns None once only stale entries remain.
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        while let Some(candidate) = self.heap.pop() {
            if let Some(&current) = self.current_counts.get(&candidate.pair) {
                if current == candidate.count {
                    self.current_counts.remove(&candidate.pair);
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Record a new count for a pair, marking older entries stale.
    pub fn update(&mut self, pair: Pair, new_count: u64) {
        self.current_counts.insert(pair, new_count);
        self.heap.push(MergeCandidate::new(pair, new_count));
    }

    /// Drop a pair whose count reached zero; its heap entries become stale.
    pub fn remove(&mut self, pair: Pair) {
        self.current_counts.remove(&pair);
    }

    /// Number of live (non-stale) pairs tracked by the queue.
    pub fn live_len(&self) -> usize {
        self.current_counts.len()
    }

    /// Check if no live pairs remain.
    pub fn is_empty(&self) -> bool {
        self.current_counts.is_empty()
    }
}

impl Default for PairPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_by_count() {
        let mut queue = PairPriorityQueue::new();
        queue.push(MergeCandidate::new((0, 1), 10));
        queue.push(MergeCandidate::new((1, 2), 20));
        queue.push(MergeCandidate::new((2, 3), 15));

        assert_eq!(queue.pop().unwrap().pair, (1, 2));
        assert_eq!(queue.pop().unwrap().pair, (2, 3));
        assert_eq!(queue.pop().unwrap().pair, (0, 1));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_ties_pop_smallest_pair() {
        let mut queue = PairPriorityQueue::new();
        queue.push(MergeCandidate::new((9, 9), 5));
        queue.push(MergeCandidate::new((1, 7), 5));
        queue.push(MergeCandidate::new((1, 2), 5));
        queue.push(MergeCandidate::new((3, 0), 5));

        assert_eq!(queue.pop().unwrap().pair, (1, 2));
        assert_eq!(queue.pop().unwrap().pair, (1, 7));
        assert_eq!(queue.pop().unwrap().pair, (3, 0));
        assert_eq!(queue.pop().unwrap().pair, (9, 9));
    }

    #[test]
    fn test_stale_entries_skipped() {
        let mut queue = PairPriorityQueue::new();
        queue.push(MergeCandidate::new((0, 1), 30));
        queue.push(MergeCandidate::new((1, 2), 20));

        // (0, 1) drops below (1, 2); the count-30 entry is now stale.
        queue.update((0, 1), 15);

        let first = queue.pop().unwrap();
        assert_eq!(first.pair, (1, 2));
        let second = queue.pop().unwrap();
        assert_eq!(second.pair, (0, 1));
        assert_eq!(second.count, 15);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_remove_invalidates_pair() {
        let mut queue = PairPriorityQueue::new();
        queue.push(MergeCandidate::new((0, 1), 30));
        queue.push(MergeCandidate::new((1, 2), 20));
        queue.remove((0, 1));

        assert_eq!(queue.pop().unwrap().pair, (1, 2));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }
}
