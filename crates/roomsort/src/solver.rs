//! Solve entry points that hide the solver wiring.

use roomsort_config::SolverConfig;
use roomsort_core::{Puzzle, Result};
use roomsort_solver::{Solution, Solver};

use crate::diagram;

/// Solves `puzzle` with default settings.
///
/// # Example
///
/// ```
/// use roomsort::{solve, Puzzle};
///
/// let puzzle = Puzzle::builder_standard(2)
///     .unwrap()
///     .capacity(2)
///     .room_letters("AB")
///     .room_letters("BA")
///     .build()
///     .unwrap();
/// assert_eq!(solve(&puzzle).unwrap().cost(), 46);
/// ```
pub fn solve(puzzle: &Puzzle) -> Result<Solution> {
    solve_with_config(puzzle, &SolverConfig::default())
}

/// Solves `puzzle` with the termination and environment mode from `config`.
pub fn solve_with_config(puzzle: &Puzzle, config: &SolverConfig) -> Result<Solution> {
    #[cfg(feature = "console")]
    roomsort_console::init();

    Solver::from_config(config).solve(puzzle)
}

/// Parses `text` as a diagram, applying the config's layout, and solves it.
///
/// Returns the parsed puzzle alongside its solution so callers can replay
/// the path from the initial state.
pub fn solve_diagram(text: &str, config: &SolverConfig) -> Result<(Puzzle, Solution)> {
    let puzzle = diagram::parse_with(text, config.layout.as_ref())?;
    let solution = solve_with_config(&puzzle, config)?;
    Ok((puzzle, solution))
}
