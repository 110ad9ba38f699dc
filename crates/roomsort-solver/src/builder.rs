//! Builder module for constructing solvers from configuration
//!
//! This module provides the wiring between configuration types and
//! the search engine.

use roomsort_config::SolverConfig;

use crate::search::Solver;
use crate::termination::{OrTermination, StepCountTermination, TimeTermination};

/// Termination assembled from a [`SolverConfig`]: a time limit, an
/// expansion budget, either, or neither.
pub type ConfiguredTermination =
    OrTermination<(Option<TimeTermination>, Option<StepCountTermination>)>;

/// Builds the termination described by `config`.
pub fn termination_from_config(config: &SolverConfig) -> ConfiguredTermination {
    OrTermination((
        config.time_limit().map(TimeTermination::new),
        config.step_limit().map(StepCountTermination::new),
    ))
}

impl Solver<ConfiguredTermination> {
    /// Creates a solver with the termination, environment mode and progress
    /// interval from `config`.
    ///
    /// The layout section is not used here; it shapes the puzzle, not the
    /// search.
    ///
    /// # Example
    ///
    /// ```
    /// use roomsort_config::{EnvironmentMode, SolverConfig};
    /// use roomsort_solver::Solver;
    ///
    /// let config = SolverConfig::new()
    ///     .with_environment_mode(EnvironmentMode::FullAssert)
    ///     .with_step_count_limit(10_000);
    /// let solver = Solver::from_config(&config);
    /// assert_eq!(solver.environment_mode(), EnvironmentMode::FullAssert);
    /// ```
    pub fn from_config(config: &SolverConfig) -> Self {
        let solver = Solver::new()
            .with_termination(termination_from_config(config))
            .with_environment_mode(config.environment_mode);
        match config.progress_interval {
            Some(interval) => solver.with_progress_interval(interval),
            None => solver,
        }
    }
}
