//! Snapshots of room and corridor contents.

use std::hash::{Hash, Hasher};

use crate::error::{Result, RoomsortError};
use crate::kind::Kind;
use crate::moves::{Direction, Move};
use crate::topology::{RoomId, SlotId, MAX_CORRIDOR, MAX_ROOMS};

/// Maximum number of tokens a room can hold.
pub const MAX_CAPACITY: usize = 8;

/// A room's tokens, bottom first. Only the top token is accessible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoomStack {
    cells: [Option<Kind>; MAX_CAPACITY],
    len: u8,
}

impl RoomStack {
    pub(crate) fn from_slice(kinds: &[Kind]) -> Self {
        let mut stack = Self::default();
        for &kind in kinds {
            stack.push(kind);
        }
        stack
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn top(&self) -> Option<Kind> {
        self.len
            .checked_sub(1)
            .and_then(|i| self.cells[i as usize])
    }

    /// Tokens from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = Kind> + '_ {
        self.cells[..self.len()].iter().flatten().copied()
    }

    /// Token at `depth` from the bottom, if present.
    pub fn get(&self, depth: usize) -> Option<Kind> {
        self.cells.get(depth).copied().flatten()
    }

    /// Returns true if every token (possibly none) is of `kind`.
    pub fn holds_only(&self, kind: Kind) -> bool {
        self.iter().all(|k| k == kind)
    }

    fn push(&mut self, kind: Kind) {
        self.cells[self.len()] = Some(kind);
        self.len += 1;
    }

    fn pop(&mut self) -> Option<Kind> {
        let top = self.len.checked_sub(1)?;
        self.len = top;
        self.cells[top as usize].take()
    }
}

/// Contents of every room and corridor slot.
///
/// States are values: a move produces a new `State` and leaves the old one
/// untouched. Equality and hashing cover room and corridor contents only,
/// which makes a `State` usable directly as a visited-set key. Accumulated
/// cost and lineage live in the search engine, not here.
///
/// The settled mask (rooms holding only their own kind) is derived from the
/// contents and refreshed whenever a room changes.
#[derive(Debug, Clone)]
pub struct State {
    rooms: [RoomStack; MAX_ROOMS],
    corridor: [Option<Kind>; MAX_CORRIDOR],
    room_count: u8,
    corridor_len: u8,
    capacity: u8,
    settled: u8,
}

impl State {
    /// Builds a state from bottom-to-top room contents and corridor slots.
    ///
    /// Only the shape is checked: room, corridor and capacity limits and
    /// known kinds. Whether every kind occurs `capacity` times is left to
    /// [`State::check_census`].
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if a limit is exceeded, a room is over
    /// capacity, or a token has no room.
    pub fn new(rooms: &[Vec<Kind>], corridor: &[Option<Kind>], capacity: usize) -> Result<Self> {
        if rooms.is_empty() || rooms.len() > MAX_ROOMS {
            return Err(RoomsortError::malformed(format!(
                "expected between 1 and {MAX_ROOMS} rooms, got {}",
                rooms.len()
            )));
        }
        if corridor.len() > MAX_CORRIDOR {
            return Err(RoomsortError::malformed(format!(
                "at most {MAX_CORRIDOR} corridor slots, got {}",
                corridor.len()
            )));
        }
        if capacity == 0 || capacity > MAX_CAPACITY {
            return Err(RoomsortError::malformed(format!(
                "room capacity must be between 1 and {MAX_CAPACITY}, got {capacity}"
            )));
        }
        if let Some(room) = rooms.iter().position(|kinds| kinds.len() > capacity) {
            return Err(RoomsortError::malformed(format!(
                "room {room} holds {} tokens, capacity is {capacity}",
                rooms[room].len()
            )));
        }
        let mut tokens = rooms.iter().flatten().chain(corridor.iter().flatten());
        if let Some(kind) = tokens.find(|kind| kind.index() >= rooms.len()) {
            return Err(RoomsortError::malformed(format!(
                "kind {kind} has no room in a {}-room layout",
                rooms.len()
            )));
        }
        Ok(Self::from_parts(rooms, corridor, capacity))
    }

    /// Builds a state from already validated parts.
    pub(crate) fn from_parts(rooms: &[Vec<Kind>], corridor: &[Option<Kind>], capacity: usize) -> Self {
        let mut state = Self {
            rooms: [RoomStack::default(); MAX_ROOMS],
            corridor: [None; MAX_CORRIDOR],
            room_count: rooms.len() as u8,
            corridor_len: corridor.len() as u8,
            capacity: capacity as u8,
            settled: 0,
        };
        for (room, kinds) in rooms.iter().enumerate() {
            state.rooms[room] = RoomStack::from_slice(kinds);
            state.refresh_settled(room);
        }
        state.corridor[..corridor.len()].copy_from_slice(corridor);
        state
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.room_count as usize
    }

    #[inline]
    pub fn corridor_len(&self) -> usize {
        self.corridor_len as usize
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn rooms(&self) -> &[RoomStack] {
        &self.rooms[..self.room_count()]
    }

    #[inline]
    pub fn room(&self, room: RoomId) -> &RoomStack {
        &self.rooms[room]
    }

    pub fn corridor(&self) -> &[Option<Kind>] {
        &self.corridor[..self.corridor_len()]
    }

    #[inline]
    pub fn corridor_slot(&self, slot: SlotId) -> Option<Kind> {
        self.corridor[slot]
    }

    /// Returns true if any of `slots` holds a token.
    #[inline]
    pub fn any_occupied(&self, slots: &[SlotId]) -> bool {
        slots.iter().any(|&s| self.corridor[s].is_some())
    }

    /// Returns true if `room` holds only tokens of its own kind.
    ///
    /// An empty room is settled.
    #[inline]
    pub fn is_settled(&self, room: RoomId) -> bool {
        self.settled & (1 << room) != 0
    }

    pub fn settled_count(&self) -> usize {
        self.settled.count_ones() as usize
    }

    /// Returns true if every room is settled and full.
    pub fn is_terminal(&self) -> bool {
        let all = ((1u16 << self.room_count) - 1) as u8;
        self.settled == all && self.rooms().iter().all(|r| r.len() == self.capacity())
    }

    /// Applies `mv` to a copy of this state.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if the move does not fit the contents:
    /// wrong token at the source, occupied destination slot or a full room.
    pub fn apply(&self, mv: &Move) -> Result<State> {
        if mv.room >= self.room_count() || mv.slot >= self.corridor_len() {
            return Err(RoomsortError::InvariantViolation(format!(
                "move {mv} is outside the burrow"
            )));
        }

        let mut next = self.clone();
        match mv.direction {
            Direction::Exit => {
                if next.corridor[mv.slot].is_some() {
                    return Err(RoomsortError::InvariantViolation(format!(
                        "move {mv} targets an occupied slot"
                    )));
                }
                if next.rooms[mv.room].pop() != Some(mv.kind) {
                    return Err(RoomsortError::InvariantViolation(format!(
                        "move {mv} does not match the top of the room"
                    )));
                }
                next.corridor[mv.slot] = Some(mv.kind);
            }
            Direction::Enter => {
                if next.corridor[mv.slot].take() != Some(mv.kind) {
                    return Err(RoomsortError::InvariantViolation(format!(
                        "move {mv} does not match the slot contents"
                    )));
                }
                if next.rooms[mv.room].len() >= self.capacity() {
                    return Err(RoomsortError::InvariantViolation(format!(
                        "move {mv} enters a full room"
                    )));
                }
                next.rooms[mv.room].push(mv.kind);
            }
        }
        next.refresh_settled(mv.room);
        Ok(next)
    }

    /// Number of tokens of each kind, indexed by kind.
    pub fn census(&self) -> [usize; MAX_ROOMS] {
        let mut counts = [0; MAX_ROOMS];
        let room_tokens = self.rooms().iter().flat_map(RoomStack::iter);
        let corridor_tokens = self.corridor().iter().flatten().copied();
        for kind in room_tokens.chain(corridor_tokens) {
            counts[kind.index()] += 1;
        }
        counts
    }

    /// Checks that every kind occurs exactly `capacity` times.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` naming the first kind with a wrong count.
    pub fn check_census(&self) -> Result<()> {
        let counts = self.census();
        for (index, &count) in counts.iter().enumerate() {
            let expected = if index < self.room_count() {
                self.capacity()
            } else {
                0
            };
            if count != expected {
                let letter = Kind::new(index).map_or('?', Kind::letter);
                return Err(RoomsortError::InvariantViolation(format!(
                    "kind {letter} occurs {count} times, expected {expected}"
                )));
            }
        }
        Ok(())
    }

    fn refresh_settled(&mut self, room: RoomId) {
        let own = Kind::new(room).is_some_and(|kind| self.rooms[room].holds_only(kind));
        if own {
            self.settled |= 1 << room;
        } else {
            self.settled &= !(1 << room);
        }
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.rooms == other.rooms && self.corridor == other.corridor
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rooms.hash(state);
        self.corridor.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(letters: &str) -> Vec<Kind> {
        letters.chars().map(|c| Kind::from_letter(c).unwrap()).collect()
    }

    fn kind(letter: char) -> Kind {
        Kind::from_letter(letter).unwrap()
    }

    #[test]
    fn test_new_checks_shape_only() {
        // One B too many and no A: accepted here, caught by the census.
        let state = State::new(&[kinds("B"), kinds("B")], &[None; 5], 1).unwrap();
        assert!(matches!(
            state.check_census(),
            Err(RoomsortError::InvariantViolation(_))
        ));
        assert!(state.is_settled(1));

        assert!(State::new(&[kinds("AB")], &[None; 3], 1).is_err());
        assert!(State::new(&[kinds("A"), kinds("C")], &[None; 5], 1).is_err());
        assert!(State::new(&[kinds("A")], &[None; MAX_CORRIDOR + 1], 1).is_err());
        assert!(State::new(&[], &[], 1).is_err());
    }

    fn swapped() -> State {
        State::from_parts(&[kinds("AB"), kinds("BA")], &[None; 5], 2)
    }

    #[test]
    fn test_settled_tracking() {
        let state = State::from_parts(&[kinds("AA"), kinds("B")], &[None, Some(kind('B')), None, None, None], 2);
        assert!(state.is_settled(0));
        assert!(state.is_settled(1));
        assert!(!state.is_terminal());

        let state = swapped();
        assert!(!state.is_settled(0));
        assert!(!state.is_settled(1));
    }

    #[test]
    fn test_apply_exit_and_enter() {
        let state = swapped();
        let out = state.apply(&Move::exit(kind('B'), 0, 2)).unwrap();
        assert_eq!(out.room(0).len(), 1);
        assert_eq!(out.corridor_slot(2), Some(kind('B')));
        assert!(out.is_settled(0));
        // The parent is untouched.
        assert_eq!(state.room(0).top(), Some(kind('B')));

        let out = out.apply(&Move::exit(kind('A'), 1, 3)).unwrap();
        let back = out.apply(&Move::enter(kind('B'), 2, 1)).unwrap();
        let done = back.apply(&Move::enter(kind('A'), 3, 0)).unwrap();
        assert!(done.is_terminal());
        assert!(done.check_census().is_ok());
    }

    #[test]
    fn test_equality_ignores_history() {
        let state = swapped();
        let there = state.apply(&Move::exit(kind('B'), 0, 2)).unwrap();
        let back = there.apply(&Move::exit(kind('A'), 1, 3)).unwrap();
        let other = state
            .apply(&Move::exit(kind('A'), 1, 3))
            .unwrap()
            .apply(&Move::exit(kind('B'), 0, 2))
            .unwrap();
        assert_eq!(back, other);
        assert_ne!(state, there);
    }

    #[test]
    fn test_apply_rejects_inconsistent_moves() {
        let state = swapped();
        assert!(matches!(
            state.apply(&Move::exit(kind('A'), 0, 2)),
            Err(RoomsortError::InvariantViolation(_))
        ));
        assert!(state.apply(&Move::enter(kind('A'), 2, 0)).is_err());
        assert!(state.apply(&Move::exit(kind('B'), 0, 9)).is_err());

        let out = state.apply(&Move::exit(kind('B'), 0, 2)).unwrap();
        assert!(out.apply(&Move::exit(kind('A'), 1, 2)).is_err());
        assert!(out.apply(&Move::enter(kind('B'), 2, 1)).is_err());
    }

    #[test]
    fn test_census() {
        let state = swapped();
        assert_eq!(&state.census()[..2], &[2, 2]);
        assert!(state.check_census().is_ok());

        let lopsided = State::from_parts(&[kinds("AA"), kinds("AB")], &[None; 5], 2);
        let err = lopsided.check_census().unwrap_err();
        assert!(err.to_string().contains("kind A occurs 3 times"));
    }

    #[test]
    fn test_room_stack_access() {
        let stack = RoomStack::from_slice(&kinds("ABC"));
        assert_eq!(stack.top(), Some(kind('C')));
        assert_eq!(stack.get(0), Some(kind('A')));
        assert_eq!(stack.get(3), None);
        assert_eq!(stack.iter().collect::<Vec<_>>(), kinds("ABC"));
        assert!(RoomStack::default().holds_only(kind('A')));
    }
}
