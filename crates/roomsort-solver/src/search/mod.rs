//! Uniform-cost search over puzzle states.
//!
//! The engine pops the cheapest frontier entry, finalizes it into the node
//! arena the first time its state is seen, and pushes every successor the
//! move generator offers. Because move costs are non-negative, the first
//! pop of a state is its cheapest, so a terminal state popped this way is
//! an optimal answer.

mod frontier;
mod node;

use std::collections::HashSet;
use std::sync::Arc;

use roomsort_config::EnvironmentMode;
use roomsort_core::{CostModel, Puzzle, Result, RoomsortError, State};
use tracing::{debug, info, trace, warn};

use crate::event::{SearchEventListener, SearchEventSupport, SearchOutcome};
use crate::generator::MoveGenerator;
use crate::scope::SearchScope;
use crate::solution::Solution;
use crate::termination::{NoTermination, Termination};

use frontier::Frontier;
pub use node::{NodeArena, NodeId, SearchNode};

/// Expanded states between two `progress` events.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Where a search run stopped.
enum Finish {
    Solved(NodeId),
    Unreachable,
    Terminated,
}

/// Search engine that finds a minimum-cost sorting of a puzzle.
///
/// # Type Parameters
/// * `T` - Termination condition, checked before every pop
///
/// # Example
///
/// ```
/// use roomsort_core::Puzzle;
/// use roomsort_solver::Solver;
///
/// let puzzle = Puzzle::builder_standard(2)
///     .unwrap()
///     .capacity(1)
///     .room_letters("B")
///     .room_letters("A")
///     .build()
///     .unwrap();
///
/// let solution = Solver::new().solve(&puzzle).unwrap();
/// assert_eq!(solution.cost(), 46);
/// assert_eq!(solution.move_count(), 4);
/// ```
#[derive(Debug)]
pub struct Solver<T = NoTermination> {
    termination: T,
    environment_mode: EnvironmentMode,
    progress_interval: u64,
    events: SearchEventSupport,
}

impl Solver<NoTermination> {
    /// Creates a solver that runs until the frontier empties.
    pub fn new() -> Self {
        Solver {
            termination: NoTermination,
            environment_mode: EnvironmentMode::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            events: SearchEventSupport::new(),
        }
    }
}

impl Default for Solver<NoTermination> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Solver<T> {
    /// Replaces the termination condition.
    pub fn with_termination<U: Termination>(self, termination: U) -> Solver<U> {
        Solver {
            termination,
            environment_mode: self.environment_mode,
            progress_interval: self.progress_interval,
            events: self.events,
        }
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets how many expansions pass between `progress` events; 0 disables them.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn SearchEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }
}

impl<T: Termination> Solver<T> {
    /// Finds a minimum-cost solution using the puzzle's own cost model.
    ///
    /// # Errors
    ///
    /// * `Unreachable` if no sorted state can be reached
    /// * `Terminated` if the termination condition fired first
    /// * `InvariantViolation` if an asserted check fails
    pub fn solve(&self, puzzle: &Puzzle) -> Result<Solution> {
        let mut costs = puzzle.cost_model();
        self.solve_with_costs(puzzle, &mut costs)
    }

    /// Returns only the minimum cost.
    pub fn min_cost(&self, puzzle: &Puzzle) -> Result<u64> {
        self.solve(puzzle).map(|solution| solution.cost())
    }

    /// Finds a minimum-cost solution, pricing moves with `costs`.
    ///
    /// Passing the same cost model to several runs keeps its cache warm.
    pub fn solve_with_costs(&self, puzzle: &Puzzle, costs: &mut CostModel) -> Result<Solution> {
        self.run(puzzle, puzzle.initial(), costs)
    }

    /// Finds the cheapest way to finish `puzzle` starting from `start`
    /// instead of its initial state.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if `start` does not have the puzzle's room
    /// count, corridor length and capacity, and otherwise the same errors
    /// as [`Solver::solve`].
    pub fn solve_from(&self, puzzle: &Puzzle, start: &State) -> Result<Solution> {
        let topology = puzzle.topology();
        if start.room_count() != topology.room_count()
            || start.corridor_len() != topology.corridor_len()
            || start.capacity() != puzzle.capacity()
        {
            return Err(RoomsortError::MalformedInput(format!(
                "start state has {} rooms of capacity {} and {} corridor slots, \
                 puzzle has {} rooms of capacity {} and {} corridor slots",
                start.room_count(),
                start.capacity(),
                start.corridor_len(),
                topology.room_count(),
                puzzle.capacity(),
                topology.corridor_len(),
            )));
        }
        let mut costs = puzzle.cost_model();
        self.run(puzzle, start, &mut costs)
    }

    fn run(&self, puzzle: &Puzzle, start: &State, costs: &mut CostModel) -> Result<Solution> {
        let mut scope = SearchScope::new();
        scope.start_solving();
        let (hits_before, misses_before) = (costs.hits(), costs.misses());

        info!(
            event = "solve_start",
            rooms = puzzle.room_count(),
            capacity = puzzle.capacity(),
            corridor_slots = puzzle.topology().corridor_len(),
            environment_mode = ?self.environment_mode,
        );
        self.events.fire_search_started(start);

        let mut frontier = Frontier::new();
        let mut arena = NodeArena::new();
        let finish = self.search(puzzle, start, costs, &mut scope, &mut frontier, &mut arena);

        let stats = scope.stats_mut();
        stats.peak_frontier = frontier.peak();
        stats.cost_cache_hits = costs.hits() - hits_before;
        stats.cost_cache_misses = costs.misses() - misses_before;
        stats.finish();
        let explored = stats.states_expanded;
        let duration_ms = stats.elapsed().as_millis() as u64;

        let result = match finish {
            Ok(Finish::Solved(id)) => self.build_solution(arena, id, scope),
            Ok(Finish::Unreachable) => {
                warn!(event = "unreachable", explored, duration_ms);
                Err(RoomsortError::Unreachable { explored })
            }
            Ok(Finish::Terminated) => {
                warn!(event = "terminated", explored, duration_ms);
                Err(RoomsortError::Terminated { explored })
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(solution) => {
                info!(
                    event = "solve_end",
                    cost = solution.cost(),
                    moves = solution.move_count(),
                    explored,
                    stale = solution.stats().stale_pops,
                    peak_frontier = solution.stats().peak_frontier,
                    duration_ms,
                    speed = solution.stats().states_per_second(),
                );
                self.events.fire_search_ended(SearchOutcome::Solved {
                    cost: solution.cost(),
                });
            }
            Err(RoomsortError::Unreachable { .. }) => {
                self.events.fire_search_ended(SearchOutcome::Unreachable)
            }
            Err(RoomsortError::Terminated { .. }) => {
                self.events.fire_search_ended(SearchOutcome::Terminated)
            }
            Err(e) => {
                warn!(event = "search_failed", error = %e, explored);
                self.events.fire_search_ended(SearchOutcome::Failed);
            }
        }
        result
    }

    fn search(
        &self,
        puzzle: &Puzzle,
        start: &State,
        costs: &mut CostModel,
        scope: &mut SearchScope,
        frontier: &mut Frontier,
        arena: &mut NodeArena,
    ) -> Result<Finish> {
        let generator = MoveGenerator::new(puzzle.topology());
        let full_assert = self.environment_mode.is_fully_asserted();
        let mut visited: HashSet<State> = HashSet::new();

        frontier.push_root(start.clone());

        loop {
            if self.termination.is_terminated(scope) {
                return Ok(Finish::Terminated);
            }
            let Some(entry) = frontier.pop() else {
                return Ok(Finish::Unreachable);
            };
            if visited.contains(&entry.state) {
                scope.stats_mut().record_stale();
                continue;
            }
            visited.insert(entry.state.clone());

            let node = entry.into_node();
            if full_assert {
                node.state().check_census()?;
            }
            let cost = node.cost();
            let depth = node.depth();
            let expanded = scope.record_expanded(cost);
            scope.set_frontier_len(frontier.len());
            self.events.fire_state_expanded(node.state(), cost, depth);

            trace!(
                event = "expand",
                step = expanded,
                cost,
                depth,
                settled = node.state().settled_count(),
            );
            if self.progress_interval > 0 && expanded % self.progress_interval == 0 {
                debug!(
                    event = "progress",
                    steps = expanded,
                    cost,
                    frontier = frontier.len(),
                    visited = visited.len(),
                    speed = scope.stats().states_per_second(),
                );
            }

            let terminal = node.state().is_terminal();
            let id = arena.push(node);
            if terminal {
                return Ok(Finish::Solved(id));
            }

            let state = arena.get(id).state();
            for (mv, move_cost) in generator.moves(state, costs) {
                if full_assert {
                    generator.check(state, &mv)?;
                }
                let next = state.apply(&mv)?;
                let fresh = !visited.contains(&next);
                if fresh {
                    frontier.push(next, cost + move_cost, depth + 1, Some((id, mv, move_cost)));
                }
                scope.stats_mut().record_successor(fresh);
            }
        }
    }

    fn build_solution(&self, arena: NodeArena, id: NodeId, scope: SearchScope) -> Result<Solution> {
        let cost = arena.get(id).cost();
        let path = arena.path_to(id);
        let final_state = arena.take(id).into_state();
        if self.environment_mode.is_asserted() {
            final_state.check_census()?;
        }
        Ok(Solution::new(cost, path, final_state, scope.into_stats()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::StepCountTermination;
    use roomsort_core::Puzzle;

    fn single_slot_swap() -> Puzzle {
        Puzzle::builder_standard(2)
            .unwrap()
            .capacity(1)
            .room_letters("B")
            .room_letters("A")
            .build()
            .unwrap()
    }

    #[test]
    fn test_sorted_initial_state_costs_nothing() {
        let puzzle = Puzzle::builder_standard(2)
            .unwrap()
            .capacity(2)
            .room_letters("AA")
            .room_letters("BB")
            .build()
            .unwrap();
        let solution = Solver::new().solve(&puzzle).unwrap();
        assert_eq!(solution.cost(), 0);
        assert!(solution.path().is_empty());
        assert_eq!(solution.stats().states_expanded, 1);
    }

    #[test]
    fn test_single_slot_swap() {
        let solution = Solver::new().solve(&single_slot_swap()).unwrap();
        assert_eq!(solution.cost(), 46);
        assert!(solution.final_state().is_terminal());
    }

    #[test]
    fn test_zero_step_budget_terminates_immediately() {
        let solver = Solver::new().with_termination(StepCountTermination::new(0));
        match solver.solve(&single_slot_swap()) {
            Err(RoomsortError::Terminated { explored }) => assert_eq!(explored, 0),
            other => panic!("expected termination, got {other:?}"),
        }
    }

    #[test]
    fn test_shared_cost_model_stays_warm() {
        let puzzle = single_slot_swap();
        let mut costs = puzzle.cost_model();
        let solver = Solver::new();
        let first = solver.solve_with_costs(&puzzle, &mut costs).unwrap();
        let second = solver.solve_with_costs(&puzzle, &mut costs).unwrap();
        assert_eq!(first.cost(), second.cost());
        assert!(first.stats().cost_cache_misses > 0);
        assert_eq!(second.stats().cost_cache_misses, 0);
    }
}
