//! Search results.

use roomsort_core::{Move, Result, State};

use crate::stats::SearchStats;

/// One move of a solution path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub mv: Move,
    /// Cost of this move alone.
    pub cost: u64,
    /// Cost of the path up to and including this move.
    pub total: u64,
}

/// A minimum-cost way to sort a puzzle.
#[derive(Debug, Clone)]
pub struct Solution {
    cost: u64,
    path: Vec<Step>,
    final_state: State,
    stats: SearchStats,
}

impl Solution {
    pub(crate) fn new(cost: u64, path: Vec<Step>, final_state: State, stats: SearchStats) -> Self {
        Self {
            cost,
            path,
            final_state,
            stats,
        }
    }

    /// Minimum total cost.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Moves in chronological order.
    pub fn path(&self) -> &[Step] {
        &self.path
    }

    pub fn move_count(&self) -> usize {
        self.path.len()
    }

    /// The sorted state the path ends in.
    pub fn final_state(&self) -> &State {
        &self.final_state
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Replays the path from `initial`, returning every intermediate state
    /// including `initial` and the final one.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if a step does not apply, which means
    /// `initial` is not the state this solution was found from.
    pub fn states(&self, initial: &State) -> Result<Vec<State>> {
        let mut states = Vec::with_capacity(self.path.len() + 1);
        states.push(initial.clone());
        for step in &self.path {
            let next = states[states.len() - 1].apply(&step.mv)?;
            states.push(next);
        }
        Ok(states)
    }
}
