//! Roomsort Core - Core types for the token-sorting solver
//!
//! This crate provides the fundamental building blocks:
//! - Token kinds and movement weights
//! - The room/corridor topology with precomputed blocking sets
//! - Immutable state snapshots and single-token moves
//! - The memoizing cost model
//! - Validated puzzle input

pub mod cost;
pub mod error;
pub mod kind;
pub mod moves;
pub mod puzzle;
pub mod state;
pub mod topology;

pub use cost::CostModel;
pub use error::{Result, RoomsortError};
pub use kind::{Kind, Weights, MAX_WEIGHT};
pub use moves::{Direction, Location, Move};
pub use puzzle::{Puzzle, PuzzleBuilder};
pub use state::{RoomStack, State, MAX_CAPACITY};
pub use topology::{BlockingSet, RoomId, SlotId, Topology, MAX_CORRIDOR, MAX_ROOMS};
