//! Min-priority frontier with lazy deletion

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use graphwalk_core::{NodeId, Weight};

/// Candidate nodes keyed by tentative distance.
///
/// A node may be queued several times; callers drop stale pops themselves.
/// Equal distances pop the smaller node id first.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Reverse<(Weight, NodeId)>>,
}

impl Frontier {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, distance: Weight, node: NodeId) {
        self.heap.push(Reverse((distance, node)));
    }

    /// Entry with the smallest tentative distance
    pub(crate) fn pop(&mut self) -> Option<(Weight, NodeId)> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
