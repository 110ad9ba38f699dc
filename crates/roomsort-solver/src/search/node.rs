//! Search node storage.
//!
//! Each finalized state lives in an append-only arena. A node links to its
//! parent by index, so the winning path is recovered by walking parents
//! from the terminal node back to the root.

use roomsort_core::{Move, State};

use crate::solution::Step;

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A finalized state together with how it was reached.
#[derive(Debug, Clone)]
pub struct SearchNode {
    state: State,

    /// Cheapest total cost from the initial state.
    cost: u64,

    /// Number of moves from the initial state.
    depth: usize,

    /// Parent node (None for root).
    parent: Option<NodeId>,

    /// The move from the parent and its cost (None for root).
    via: Option<(Move, u64)>,
}

impl SearchNode {
    /// Creates the root node.
    pub fn root(state: State) -> Self {
        Self {
            state,
            cost: 0,
            depth: 0,
            parent: None,
            via: None,
        }
    }

    /// Creates a node reached from `parent` by `mv`.
    pub fn child(state: State, parent: NodeId, parent_cost: u64, depth: usize, mv: Move, move_cost: u64) -> Self {
        Self {
            state,
            cost: parent_cost + move_cost,
            depth,
            parent: Some(parent),
            via: Some((mv, move_cost)),
        }
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn via(&self) -> Option<(Move, u64)> {
        self.via
    }

    pub(crate) fn into_state(self) -> State {
        self.state
    }
}

/// Append-only store of finalized nodes.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `node` and returns its id.
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes from `id` back to the root, newest first.
    pub fn lineage(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| {
            node.parent().map(|p| self.get(p))
        })
    }

    /// Moves from the root to `id` in chronological order.
    pub fn path_to(&self, id: NodeId) -> Vec<Step> {
        let mut steps: Vec<Step> = self
            .lineage(id)
            .filter_map(|node| {
                node.via().map(|(mv, cost)| Step {
                    mv,
                    cost,
                    total: node.cost(),
                })
            })
            .collect();
        steps.reverse();
        steps
    }

    /// Removes and returns the node with the given id, dropping the rest.
    pub(crate) fn take(mut self, id: NodeId) -> SearchNode {
        self.nodes.swap_remove(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomsort_core::{Kind, Puzzle};

    #[test]
    fn test_path_reconstruction() {
        let puzzle = Puzzle::builder_standard(2)
            .unwrap()
            .capacity(1)
            .room_letters("B")
            .room_letters("A")
            .build()
            .unwrap();
        let a = Kind::from_letter('A').unwrap();
        let b = Kind::from_letter('B').unwrap();
        let first = Move::exit(b, 0, 2);
        let second = Move::exit(a, 1, 3);

        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root(puzzle.initial().clone()));
        let s1 = puzzle.initial().apply(&first).unwrap();
        let n1 = arena.push(SearchNode::child(s1.clone(), root, 0, 1, first, 20));
        let s2 = s1.apply(&second).unwrap();
        let n2 = arena.push(SearchNode::child(s2, n1, 20, 2, second, 2));

        assert_eq!(arena.lineage(n2).count(), 3);
        let path = arena.path_to(n2);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].mv, first);
        assert_eq!(path[0].total, 20);
        assert_eq!(path[1].mv, second);
        assert_eq!(path[1].total, 22);
        assert!(arena.path_to(root).is_empty());
    }
}
