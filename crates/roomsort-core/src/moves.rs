//! Single-token relocations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::kind::Kind;
use crate::topology::{RoomId, SlotId};

/// A place a token can be moved from or to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Location {
    /// Top of a room's stack.
    Room(RoomId),
    /// A corridor slot.
    Corridor(SlotId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Room(room) => write!(f, "room {room}"),
            Location::Corridor(slot) => write!(f, "slot {slot}"),
        }
    }
}

/// Which way a token travels between its room and corridor slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Direction {
    /// Room to corridor.
    Exit,
    /// Corridor to room.
    Enter,
}

/// Moves one token between a room and a corridor slot.
///
/// There is no room-to-room move; every relocation passes through the
/// corridor, so a move is fully described by its room, its slot and the
/// direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub kind: Kind,
    pub room: RoomId,
    pub slot: SlotId,
    pub direction: Direction,
}

impl Move {
    /// Token leaves `room` for `slot`.
    pub fn exit(kind: Kind, room: RoomId, slot: SlotId) -> Self {
        Self {
            kind,
            room,
            slot,
            direction: Direction::Exit,
        }
    }

    /// Token leaves `slot` for `room`.
    pub fn enter(kind: Kind, slot: SlotId, room: RoomId) -> Self {
        Self {
            kind,
            room,
            slot,
            direction: Direction::Enter,
        }
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        self.direction == Direction::Exit
    }

    pub fn from(&self) -> Location {
        match self.direction {
            Direction::Exit => Location::Room(self.room),
            Direction::Enter => Location::Corridor(self.slot),
        }
    }

    pub fn to(&self) -> Location {
        match self.direction {
            Direction::Exit => Location::Corridor(self.slot),
            Direction::Enter => Location::Room(self.room),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.kind, self.from(), self.to())
    }
}
