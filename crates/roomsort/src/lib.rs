//! Roomsort - minimum-cost solver for room and corridor sorting puzzles
//!
//! Tokens of several kinds sit in stack-like rooms joined by a corridor.
//! Every token must end in its own room; moving costs the token's weight
//! per step. Roomsort finds the cheapest sequence of moves.
//!
//! # Example
//!
//! ```
//! use roomsort::prelude::*;
//!
//! let text = "\
//! ##########
//! #.......#
//! ####B#A###
//!   #A#B#
//!   ######
//! ";
//! let (puzzle, solution) = solve_diagram(text, &SolverConfig::default()).unwrap();
//! assert_eq!(solution.cost(), 46);
//!
//! for state in solution.states(puzzle.initial()).unwrap() {
//!     println!("{}", Diagram::new(puzzle.topology(), &state));
//! }
//! ```

pub mod diagram;
mod solver;

pub use solver::{solve, solve_diagram, solve_with_config};

// Core types
pub use roomsort_core::{
    CostModel, Direction, Kind, Location, Move, Puzzle, PuzzleBuilder, Result, RoomStack,
    RoomsortError, State, Topology, Weights,
};

// Configuration
pub use roomsort_config::{ConfigError, EnvironmentMode, LayoutConfig, SolverConfig};

// Search engine
pub use roomsort_solver::{
    CountingEventListener, ExternalTermination, MoveGenerator, SearchEventListener, SearchStats,
    Solution, Solver, Step, StepCountTermination, TimeTermination,
};

#[cfg(feature = "console")]
pub use roomsort_console as console;

pub mod prelude {
    pub use super::diagram::{self, Diagram};
    pub use super::{solve, solve_diagram, solve_with_config};
    pub use super::{EnvironmentMode, Kind, Move, Puzzle, RoomsortError, Solution, SolverConfig};
}
