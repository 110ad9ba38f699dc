//! Token kinds and their per-step movement weights.

use std::fmt;
use std::num::NonZeroU8;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, RoomsortError};
use crate::topology::MAX_ROOMS;

/// Largest accepted per-step weight.
///
/// A token moves at most twice and walks at most 32 cells per move, so
/// with at most 64 tokens any path cost stays far below `u64::MAX`.
pub const MAX_WEIGHT: u64 = u32::MAX as u64;

/// The kind of a token.
///
/// Kind `i` belongs in room `i`. Kinds are displayed as capital letters
/// starting at `A`. The value is stored off-by-one in a `NonZeroU8` so that
/// `Option<Kind>` stays a single byte inside the fixed-size state arrays.
///
/// # Example
///
/// ```
/// use roomsort_core::Kind;
///
/// let b = Kind::from_letter('B').unwrap();
/// assert_eq!(b.index(), 1);
/// assert_eq!(b.target_room(), 1);
/// assert_eq!(b.to_string(), "B");
/// assert_eq!(std::mem::size_of::<Option<Kind>>(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "char", try_from = "char")
)]
pub struct Kind(NonZeroU8);

impl Kind {
    /// Returns the kind with the given index, or `None` past the room limit.
    pub fn new(index: usize) -> Option<Self> {
        if index >= MAX_ROOMS {
            return None;
        }
        NonZeroU8::new(index as u8 + 1).map(Kind)
    }

    /// Parses a kind from its display letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_uppercase() {
            Self::new((letter as u8 - b'A') as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Index of the room this kind is sorted into.
    #[inline]
    pub fn target_room(self) -> usize {
        self.index()
    }

    pub fn letter(self) -> char {
        (b'A' + self.index() as u8) as char
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl From<Kind> for char {
    fn from(kind: Kind) -> char {
        kind.letter()
    }
}

impl TryFrom<char> for Kind {
    type Error = RoomsortError;

    fn try_from(letter: char) -> Result<Kind> {
        Kind::from_letter(letter)
            .ok_or_else(|| RoomsortError::malformed(format!("unknown token kind '{letter}'")))
    }
}

/// Movement cost per unit of distance, one entry per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weights(Vec<u64>);

impl Weights {
    /// Weights `1, 10, 100, ...` for the first `kinds` kinds.
    pub fn powers_of_ten(kinds: usize) -> Self {
        Self((0..kinds as u32).map(|i| 10u64.pow(i)).collect())
    }

    /// Creates custom weights.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the list is empty or longer than the room
    /// limit, or if any weight is zero or above [`MAX_WEIGHT`].
    pub fn new(weights: Vec<u64>) -> Result<Self> {
        if weights.is_empty() || weights.len() > MAX_ROOMS {
            return Err(RoomsortError::malformed(format!(
                "expected between 1 and {MAX_ROOMS} weights, got {}",
                weights.len()
            )));
        }
        if let Some(kind) = weights.iter().position(|&w| w == 0) {
            return Err(RoomsortError::malformed(format!(
                "weight for kind {} must be positive",
                Kind::new(kind).map_or('?', Kind::letter)
            )));
        }
        if let Some(kind) = weights.iter().position(|&w| w > MAX_WEIGHT) {
            return Err(RoomsortError::malformed(format!(
                "weight for kind {} exceeds {MAX_WEIGHT}",
                Kind::new(kind).map_or('?', Kind::letter)
            )));
        }
        Ok(Self(weights))
    }

    /// Returns the weight of `kind`.
    ///
    /// Kinds are validated against the weight count when a puzzle is built.
    #[inline]
    pub fn get(&self, kind: Kind) -> u64 {
        self.0[kind.index()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}
