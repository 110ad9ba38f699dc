//! Validated initial configurations.

use crate::cost::CostModel;
use crate::error::{Result, RoomsortError};
use crate::kind::{Kind, Weights};
use crate::state::{State, MAX_CAPACITY};
use crate::topology::{SlotId, Topology};

/// A solvable-looking starting position: geometry, room capacity, kind
/// weights and the initial contents.
///
/// Only [`PuzzleBuilder::build`] creates one, so a `Puzzle` always satisfies
/// the structural checks (capacity, token counts, known kinds).
#[derive(Debug, Clone)]
pub struct Puzzle {
    topology: Topology,
    capacity: usize,
    weights: Weights,
    initial: State,
}

impl Puzzle {
    /// Starts a builder over `topology`.
    pub fn builder(topology: Topology) -> PuzzleBuilder {
        PuzzleBuilder::new(topology)
    }

    /// Starts a builder over the standard shape with `rooms` rooms.
    pub fn builder_standard(rooms: usize) -> Result<PuzzleBuilder> {
        Ok(PuzzleBuilder::new(Topology::standard(rooms)?))
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn room_count(&self) -> usize {
        self.topology.room_count()
    }

    /// A fresh cost model over this puzzle's weights.
    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.weights.clone())
    }
}

/// Fluent builder for [`Puzzle`].
///
/// Errors from individual calls are kept and reported by `build`.
///
/// # Example
///
/// ```
/// use roomsort_core::Puzzle;
///
/// let puzzle = Puzzle::builder_standard(2)
///     .unwrap()
///     .capacity(2)
///     .room_letters("AB")
///     .room_letters("BA")
///     .build()
///     .unwrap();
///
/// assert_eq!(puzzle.room_count(), 2);
/// assert_eq!(puzzle.initial().room(0).top().unwrap().letter(), 'B');
///
/// let missing = Puzzle::builder_standard(2)
///     .unwrap()
///     .capacity(2)
///     .room_letters("AB")
///     .room_letters("B")
///     .build();
/// assert!(missing.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleBuilder {
    topology: Topology,
    capacity: Option<usize>,
    weights: Option<Weights>,
    rooms: Vec<Vec<Kind>>,
    corridor: Vec<(SlotId, Kind)>,
    error: Option<RoomsortError>,
}

impl PuzzleBuilder {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            capacity: None,
            weights: None,
            rooms: Vec::new(),
            corridor: Vec::new(),
            error: None,
        }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Overrides the default powers-of-ten weights.
    pub fn weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Appends the next room's tokens, bottom first.
    pub fn room(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        self.rooms.push(kinds.into_iter().collect());
        self
    }

    /// Appends the next room's tokens as letters, bottom first.
    pub fn room_letters(mut self, letters: &str) -> Self {
        let parsed: Result<Vec<Kind>> = letters.chars().map(Kind::try_from).collect();
        match parsed {
            Ok(kinds) => self.rooms.push(kinds),
            Err(e) => {
                self.error.get_or_insert(e);
            }
        }
        self
    }

    /// Places a token in a corridor slot at the start.
    pub fn corridor(mut self, slot: SlotId, kind: Kind) -> Self {
        self.corridor.push((slot, kind));
        self
    }

    /// Validates and builds the puzzle.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the capacity is missing or out of range,
    /// the room count differs from the topology, a room is over capacity, a
    /// kind has no room or no weight, a corridor slot is out of range or
    /// used twice, or any kind does not occur exactly `capacity` times.
    pub fn build(self) -> Result<Puzzle> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let capacity = self
            .capacity
            .ok_or_else(|| RoomsortError::malformed("room capacity not set"))?;
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(RoomsortError::malformed(format!(
                "room capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"
            )));
        }

        let room_count = self.topology.room_count();
        if self.rooms.len() != room_count {
            return Err(RoomsortError::malformed(format!(
                "layout has {room_count} rooms but {} were filled",
                self.rooms.len()
            )));
        }
        let weights = self
            .weights
            .unwrap_or_else(|| Weights::powers_of_ten(room_count));
        if weights.len() < room_count {
            return Err(RoomsortError::malformed(format!(
                "{} weights given for {room_count} kinds",
                weights.len()
            )));
        }

        let mut counts = vec![0usize; room_count];
        let mut tally = |kind: Kind| -> Result<()> {
            match counts.get_mut(kind.index()) {
                Some(count) => {
                    *count += 1;
                    Ok(())
                }
                None => Err(RoomsortError::malformed(format!(
                    "kind {kind} has no room in a {room_count}-room layout"
                ))),
            }
        };

        for (room, kinds) in self.rooms.iter().enumerate() {
            if kinds.len() > capacity {
                return Err(RoomsortError::malformed(format!(
                    "room {room} holds {} tokens, capacity is {capacity}",
                    kinds.len()
                )));
            }
            for &kind in kinds {
                tally(kind)?;
            }
        }

        let mut corridor = vec![None; self.topology.corridor_len()];
        for &(slot, kind) in &self.corridor {
            let cell = corridor.get_mut(slot).ok_or_else(|| {
                RoomsortError::malformed(format!("corridor slot {slot} does not exist"))
            })?;
            if cell.replace(kind).is_some() {
                return Err(RoomsortError::malformed(format!(
                    "corridor slot {slot} is occupied twice"
                )));
            }
            tally(kind)?;
        }

        if let Some((index, &count)) = counts.iter().enumerate().find(|&(_, &c)| c != capacity) {
            let letter = Kind::new(index).map_or('?', Kind::letter);
            return Err(RoomsortError::malformed(format!(
                "kind {letter} occurs {count} times, expected {capacity}"
            )));
        }

        let initial = State::from_parts(&self.rooms, &corridor, capacity);
        Ok(Puzzle {
            topology: self.topology,
            capacity,
            weights,
            initial,
        })
    }
}
