//! Move costs.
//!
//! A move costs the token's weight times the number of cells it walks:
//! the vertical steps between its room position and the door, plus the
//! hallway steps between the door and its corridor slot. The same
//! `(depth, distance, kind)` triple comes up many thousands of times during
//! a search, so results are memoized per model instance.

use std::collections::HashMap;

use crate::kind::{Kind, Weights};
use crate::moves::{Direction, Move};
use crate::state::State;
use crate::topology::Topology;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CostKey {
    depth: u8,
    distance: u8,
    kind: Kind,
}

/// Memoizing move-cost calculator.
///
/// # Example
///
/// ```
/// use roomsort_core::{CostModel, Kind, Weights};
///
/// let mut costs = CostModel::new(Weights::powers_of_ten(4));
/// let c = Kind::from_letter('C').unwrap();
///
/// // Two steps up to the door, three along the hallway.
/// assert_eq!(costs.move_cost(c, 2, 3), 500);
/// assert_eq!(costs.move_cost(c, 2, 3), 500);
/// assert_eq!(costs.hits(), 1);
/// assert_eq!(costs.misses(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CostModel {
    weights: Weights,
    cache: HashMap<CostKey, u64>,
    hits: u64,
    misses: u64,
}

impl CostModel {
    pub fn new(weights: Weights) -> Self {
        Self {
            weights,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Cost for a `kind` token to walk `depth` cells between its room
    /// position and the door plus `distance` hallway cells.
    pub fn move_cost(&mut self, kind: Kind, depth: u8, distance: u8) -> u64 {
        let key = CostKey {
            depth,
            distance,
            kind,
        };
        if let Some(&cost) = self.cache.get(&key) {
            self.hits += 1;
            return cost;
        }
        self.misses += 1;
        let cost = self.weights.get(kind) * (u64::from(depth) + u64::from(distance));
        self.cache.insert(key, cost);
        cost
    }

    /// Cost of applying `mv` to `state`.
    ///
    /// A token leaving a room walks up from the position it occupies; a token
    /// entering walks down to the lowest free position.
    pub fn price(&mut self, topology: &Topology, state: &State, mv: &Move) -> u64 {
        let height = state.room(mv.room).len();
        let free_below = match mv.direction {
            Direction::Exit => state.capacity() + 1 - height,
            Direction::Enter => state.capacity() - height,
        };
        self.move_cost(mv.kind, free_below as u8, topology.distance(mv.room, mv.slot))
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that had to be computed.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of distinct triples seen so far.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Puzzle;

    fn kind(letter: char) -> Kind {
        Kind::from_letter(letter).unwrap()
    }

    #[test]
    fn test_weighted_steps() {
        let mut costs = CostModel::new(Weights::powers_of_ten(4));
        assert_eq!(costs.move_cost(kind('A'), 1, 1), 2);
        assert_eq!(costs.move_cost(kind('B'), 1, 1), 20);
        assert_eq!(costs.move_cost(kind('D'), 4, 9), 13_000);
    }

    #[test]
    fn test_cache_distinguishes_kind() {
        let mut costs = CostModel::new(Weights::powers_of_ten(2));
        costs.move_cost(kind('A'), 1, 3);
        costs.move_cost(kind('B'), 1, 3);
        costs.move_cost(kind('A'), 1, 3);
        assert_eq!(costs.misses(), 2);
        assert_eq!(costs.hits(), 1);
        assert_eq!(costs.cached_entries(), 2);
    }

    #[test]
    fn test_price_uses_room_depth() {
        let puzzle = Puzzle::builder_standard(2)
            .unwrap()
            .capacity(2)
            .room_letters("AB")
            .room_letters("BA")
            .build()
            .unwrap();
        let mut costs = puzzle.cost_model();
        let state = puzzle.initial();
        let topology = puzzle.topology();

        // Top of a full room: one step up, one step to slot 2.
        let out = Move::exit(kind('B'), 0, 2);
        assert_eq!(costs.price(topology, state, &out), 20);

        // Into a room holding one token: one step down, three along.
        let moved = state.apply(&out).unwrap();
        let moved = moved.apply(&Move::exit(kind('A'), 1, 3)).unwrap();
        let home = Move::enter(kind('A'), 3, 0);
        assert_eq!(costs.price(topology, &moved, &home), 4);
    }
}
