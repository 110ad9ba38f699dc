//! Cost-ordered frontier of candidate states.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use roomsort_core::{Move, State};

use super::node::{NodeId, SearchNode};

/// A state waiting to be popped, with everything needed to finalize it.
#[derive(Debug)]
pub(crate) struct FrontierEntry {
    pub cost: u64,
    seq: u64,
    pub state: State,
    pub depth: usize,
    pub origin: Option<(NodeId, Move, u64)>,
}

impl FrontierEntry {
    /// Converts a popped entry into an arena node.
    pub fn into_node(self) -> SearchNode {
        match self.origin {
            None => SearchNode::root(self.state),
            Some((parent, mv, move_cost)) => SearchNode::child(
                self.state,
                parent,
                self.cost - move_cost,
                self.depth,
                mv,
                move_cost,
            ),
        }
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: lower cost = higher priority, then
        // earlier insertion.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue keyed by accumulated cost.
///
/// Entries with equal cost pop in insertion order, so a search over the
/// same puzzle always finalizes states in the same order.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
    peak: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_root(&mut self, state: State) {
        self.push(state, 0, 0, None);
    }

    pub fn push(&mut self, state: State, cost: u64, depth: usize, origin: Option<(NodeId, Move, u64)>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            cost,
            seq,
            state,
            depth,
            origin,
        });
        self.peak = self.peak.max(self.heap.len());
    }

    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest size the frontier has reached.
    pub fn peak(&self) -> usize {
        self.peak
    }
}
