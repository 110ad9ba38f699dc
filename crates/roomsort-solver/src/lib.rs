//! Roomsort Solver Engine
//!
//! This crate provides the search side of the solver:
//! - Move generation over a room/corridor topology
//! - Uniform-cost search with a node arena and path reconstruction
//! - Termination conditions
//! - Event system for monitoring
//! - Configuration wiring (builder module)

pub mod builder;
pub mod event;
pub mod generator;
pub mod scope;
pub mod search;
pub mod solution;
pub mod stats;
pub mod termination;

pub use builder::{termination_from_config, ConfiguredTermination};
pub use event::{CountingEventListener, SearchEventListener, SearchEventSupport, SearchOutcome};
pub use generator::MoveGenerator;
pub use scope::SearchScope;
pub use search::{NodeArena, NodeId, SearchNode, Solver, DEFAULT_PROGRESS_INTERVAL};
pub use solution::{Solution, Step};
pub use stats::SearchStats;
pub use termination::{
    ExternalTermination, NoTermination, OrTermination, StepCountTermination, Termination,
    TimeTermination,
};
