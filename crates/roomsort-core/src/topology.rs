//! Room/corridor graph.
//!
//! The corridor is a single row of hallway cells. Each room opens onto one
//! door cell; tokens can pass a door cell but never stop on it. All other
//! hallway cells are corridor slots, numbered left to right.
//!
//! ```text
//! #############
//! #01.2.3.4.56#   corridor slots of the standard 4-room shape
//! ###0#1#2#3###   rooms below door columns 2, 4, 6, 8
//!   # # # # #
//!   #########
//! ```
//!
//! Everything here is computed once in the constructor and only read
//! afterwards.

use smallvec::SmallVec;

use crate::error::{Result, RoomsortError};

/// Maximum number of rooms (and therefore token kinds).
pub const MAX_ROOMS: usize = 8;

/// Maximum number of corridor slots.
pub const MAX_CORRIDOR: usize = 16;

/// Index of a room.
pub type RoomId = usize;

/// Index of a corridor slot.
pub type SlotId = usize;

/// Corridor slots that must be empty for one room/slot route.
pub type BlockingSet = SmallVec<[SlotId; 8]>;

/// Static room/corridor geometry with precomputed routes.
///
/// # Example
///
/// ```
/// use roomsort_core::Topology;
///
/// let topology = Topology::standard(4).unwrap();
/// assert_eq!(topology.corridor_len(), 7);
///
/// // From room 0 to the far left slot, slot 1 is in the way.
/// assert_eq!(topology.blocking_set(0, 0), &[1]);
/// // Room 3 to slot 0 crosses four interior slots.
/// assert_eq!(topology.blocking_set(3, 0), &[1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    hallway_width: usize,
    doors: SmallVec<[usize; MAX_ROOMS]>,
    slot_columns: SmallVec<[usize; MAX_CORRIDOR]>,
    // Flattened `room * corridor_len + slot`.
    blocking: Vec<BlockingSet>,
    distances: Vec<u8>,
}

impl Topology {
    /// Builds the canonical shape for `rooms` rooms: a hallway of
    /// `2 * rooms + 3` cells with doors at columns `2, 4, ..., 2 * rooms`.
    pub fn standard(rooms: usize) -> Result<Self> {
        if rooms == 0 {
            return Err(RoomsortError::malformed("a burrow needs at least one room"));
        }
        let doors: Vec<usize> = (1..=rooms).map(|r| 2 * r).collect();
        Self::new(2 * rooms + 3, &doors)
    }

    /// Builds a custom shape.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if there are no rooms or too many, if the
    /// door columns are not strictly increasing inside the hallway, or if the
    /// number of corridor slots is zero or above [`MAX_CORRIDOR`].
    pub fn new(hallway_width: usize, door_columns: &[usize]) -> Result<Self> {
        if door_columns.is_empty() || door_columns.len() > MAX_ROOMS {
            return Err(RoomsortError::malformed(format!(
                "expected between 1 and {MAX_ROOMS} rooms, got {}",
                door_columns.len()
            )));
        }
        if door_columns.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RoomsortError::malformed(
                "door columns must be strictly increasing",
            ));
        }
        if let Some(&col) = door_columns.iter().find(|&&c| c >= hallway_width) {
            return Err(RoomsortError::malformed(format!(
                "door column {col} lies outside a hallway of width {hallway_width}"
            )));
        }

        let slot_columns: SmallVec<[usize; MAX_CORRIDOR]> = (0..hallway_width)
            .filter(|c| !door_columns.contains(c))
            .collect();
        if slot_columns.is_empty() || slot_columns.len() > MAX_CORRIDOR {
            return Err(RoomsortError::malformed(format!(
                "expected between 1 and {MAX_CORRIDOR} corridor slots, got {}",
                slot_columns.len()
            )));
        }

        let corridor_len = slot_columns.len();
        let mut blocking = Vec::with_capacity(door_columns.len() * corridor_len);
        let mut distances = Vec::with_capacity(door_columns.len() * corridor_len);
        for &door in door_columns {
            for &target in &slot_columns {
                let (lo, hi) = if target < door {
                    (target, door)
                } else {
                    (door, target)
                };
                let between: BlockingSet = slot_columns
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| c > lo && c < hi)
                    .map(|(slot, _)| slot)
                    .collect();
                blocking.push(between);
                distances.push((hi - lo) as u8);
            }
        }

        Ok(Self {
            hallway_width,
            doors: door_columns.iter().copied().collect(),
            slot_columns,
            blocking,
            distances,
        })
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.doors.len()
    }

    /// Number of corridor slots.
    #[inline]
    pub fn corridor_len(&self) -> usize {
        self.slot_columns.len()
    }

    pub fn hallway_width(&self) -> usize {
        self.hallway_width
    }

    pub fn door_column(&self, room: RoomId) -> usize {
        self.doors[room]
    }

    pub fn door_columns(&self) -> &[usize] {
        &self.doors
    }

    pub fn slot_column(&self, slot: SlotId) -> usize {
        self.slot_columns[slot]
    }

    /// Room whose door sits at `column`, if any.
    pub fn room_at(&self, column: usize) -> Option<RoomId> {
        self.doors.iter().position(|&d| d == column)
    }

    /// Corridor slot at `column`, if the column is not a door.
    pub fn slot_at(&self, column: usize) -> Option<SlotId> {
        self.slot_columns.iter().position(|&c| c == column)
    }

    /// Corridor slots that must be empty to travel between `room`'s door and
    /// `slot`, in either direction. The slot itself is not included.
    #[inline]
    pub fn blocking_set(&self, room: RoomId, slot: SlotId) -> &[SlotId] {
        &self.blocking[room * self.corridor_len() + slot]
    }

    /// Hallway steps between `room`'s door and `slot`.
    #[inline]
    pub fn distance(&self, room: RoomId, slot: SlotId) -> u8 {
        self.distances[room * self.corridor_len() + slot]
    }
}
