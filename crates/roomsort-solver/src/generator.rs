//! Legal move enumeration.
//!
//! Two kinds of move exist:
//! - **Exit**: the top token of an unsettled room walks to an empty corridor
//!   slot whose blocking set is clear. Settled rooms never give up tokens.
//! - **Enter**: a corridor token walks into its own room once that room is
//!   settled, has space and the blocking set between them is clear.
//!
//! Tokens never move corridor to corridor or room to room.

use roomsort_core::{CostModel, Move, Result, RoomsortError, State, Topology};

/// Enumerates legal moves over a fixed topology.
///
/// Iteration is lazy: moves are produced and priced one at a time.
///
/// # Example
///
/// ```
/// use roomsort_core::Puzzle;
/// use roomsort_solver::MoveGenerator;
///
/// let puzzle = Puzzle::builder_standard(2)
///     .unwrap()
///     .capacity(2)
///     .room_letters("AB")
///     .room_letters("BA")
///     .build()
///     .unwrap();
/// let generator = MoveGenerator::new(puzzle.topology());
///
/// // Both tops may walk to any of the five corridor slots.
/// assert_eq!(generator.exits(puzzle.initial()).count(), 10);
/// assert_eq!(generator.entries(puzzle.initial()).count(), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'t> {
    topology: &'t Topology,
}

impl<'t> MoveGenerator<'t> {
    pub fn new(topology: &'t Topology) -> Self {
        Self { topology }
    }

    pub fn topology(&self) -> &'t Topology {
        self.topology
    }

    /// All legal moves from `state` with their costs, exits first.
    pub fn moves<'a>(
        &'a self,
        state: &'a State,
        costs: &'a mut CostModel,
    ) -> impl Iterator<Item = (Move, u64)> + 'a {
        let topology: &'a Topology = self.topology;
        self.exits(state)
            .chain(self.entries(state))
            .map(move |mv| {
                let cost = costs.price(topology, state, &mv);
                (mv, cost)
            })
    }

    /// Room-to-corridor moves.
    pub fn exits<'a>(&'a self, state: &'a State) -> impl Iterator<Item = Move> + 'a {
        let topology: &'a Topology = self.topology;
        (0..state.room_count())
            .filter(move |&room| !state.is_settled(room))
            .filter_map(move |room| state.room(room).top().map(|kind| (room, kind)))
            .flat_map(move |(room, kind)| {
                (0..topology.corridor_len())
                    .filter(move |&slot| {
                        state.corridor_slot(slot).is_none()
                            && !state.any_occupied(topology.blocking_set(room, slot))
                    })
                    .map(move |slot| Move::exit(kind, room, slot))
            })
    }

    /// Corridor-to-room moves.
    pub fn entries<'a>(&'a self, state: &'a State) -> impl Iterator<Item = Move> + 'a {
        let topology: &'a Topology = self.topology;
        (0..topology.corridor_len()).filter_map(move |slot| {
            let kind = state.corridor_slot(slot)?;
            let room = kind.target_room();
            let open = room < state.room_count()
                && state.is_settled(room)
                && state.room(room).len() < state.capacity()
                && !state.any_occupied(topology.blocking_set(room, slot));
            open.then(|| Move::enter(kind, slot, room))
        })
    }

    /// Verifies that `mv` is one this generator could have produced.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` describing the broken rule.
    pub fn check(&self, state: &State, mv: &Move) -> Result<()> {
        let violation = |rule: &str| {
            Err(RoomsortError::InvariantViolation(format!(
                "move {mv} {rule}"
            )))
        };
        if mv.room >= state.room_count() || mv.slot >= state.corridor_len() {
            return violation("is outside the burrow");
        }
        if state.any_occupied(self.topology.blocking_set(mv.room, mv.slot)) {
            return violation("crosses an occupied corridor slot");
        }
        if mv.is_exit() {
            if state.is_settled(mv.room) {
                return violation("leaves a settled room");
            }
            if state.room(mv.room).top() != Some(mv.kind) {
                return violation("does not take the top token");
            }
            if state.corridor_slot(mv.slot).is_some() {
                return violation("stops on an occupied slot");
            }
        } else {
            if state.corridor_slot(mv.slot) != Some(mv.kind) {
                return violation("does not start from the token's slot");
            }
            if mv.kind.target_room() != mv.room || !state.is_settled(mv.room) {
                return violation("enters a room that is not its settled target");
            }
            if state.room(mv.room).len() >= state.capacity() {
                return violation("enters a full room");
            }
        }
        Ok(())
    }
}
