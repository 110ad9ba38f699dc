//! Shared test fixtures for roomsort crates.
//!
//! Every fixture is a validated [`Puzzle`] on the standard shape with
//! power-of-ten weights, together with its known minimum cost where one
//! exists.
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! roomsort-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use roomsort_test::{example, EXAMPLE_COST};
//!
//! let puzzle = example();
//! assert_eq!(puzzle.room_count(), 4);
//! assert_eq!(EXAMPLE_COST, 12521);
//! ```

use roomsort_core::{Kind, Puzzle, PuzzleBuilder};

/// The classic four-room, two-deep burrow.
pub const EXAMPLE_DIAGRAM: &str = "\
#############
#...........#
###B#C#B#D###
  #A#D#C#A#
  #########
";

/// Rows inserted below the first room row to deepen [`EXAMPLE_DIAGRAM`].
pub const UNFOLD_ROWS: [&str; 2] = ["  #D#C#B#A#", "  #D#B#A#C#"];

pub const EXAMPLE_COST: u64 = 12521;
pub const EXAMPLE_UNFOLDED_COST: u64 = 44169;
pub const SWAPPED_PAIR_COST: u64 = 46;
pub const THREE_MOVE_COST: u64 = 43;
pub const SINGLE_SLOT_SWAP_COST: u64 = 46;

fn standard(rooms: usize, capacity: usize) -> PuzzleBuilder {
    Puzzle::builder_standard(rooms)
        .expect("standard shape")
        .capacity(capacity)
}

fn kind(letter: char) -> Kind {
    Kind::from_letter(letter).expect("known kind")
}

/// The four-room example, capacity 2. Minimum cost [`EXAMPLE_COST`].
pub fn example() -> Puzzle {
    standard(4, 2)
        .room_letters("AB")
        .room_letters("DC")
        .room_letters("CB")
        .room_letters("AD")
        .build()
        .expect("valid example")
}

/// [`example`] with [`UNFOLD_ROWS`] inserted, capacity 4.
/// Minimum cost [`EXAMPLE_UNFOLDED_COST`].
pub fn example_unfolded() -> Puzzle {
    standard(4, 4)
        .room_letters("ADDB")
        .room_letters("DBCC")
        .room_letters("CABB")
        .room_letters("ACAD")
        .build()
        .expect("valid unfolded example")
}

/// Two rooms, capacity 2, each with the other's kind on top.
/// Minimum cost [`SWAPPED_PAIR_COST`] in 4 moves.
pub fn swapped_pair() -> Puzzle {
    standard(2, 2)
        .room_letters("AB")
        .room_letters("BA")
        .build()
        .expect("valid swapped pair")
}

/// An `A` waits in corridor slot 0 while room 0 holds a `B` on top of an
/// `A`. Minimum cost [`THREE_MOVE_COST`] in 3 moves.
pub fn three_move() -> Puzzle {
    standard(2, 2)
        .room_letters("AB")
        .room_letters("B")
        .corridor(0, kind('A'))
        .build()
        .expect("valid three-move puzzle")
}

/// Two single-slot rooms holding each other's token.
/// Minimum cost [`SINGLE_SLOT_SWAP_COST`] in 4 moves.
pub fn single_slot_swap() -> Puzzle {
    standard(2, 1)
        .room_letters("B")
        .room_letters("A")
        .build()
        .expect("valid single-slot swap")
}

/// A `C` and an `A` stand in the corridor, each blocking the other's way
/// home, with a `B` walled in between them. No move is legal.
pub fn deadlocked() -> Puzzle {
    standard(3, 1)
        .room_letters("")
        .room_letters("B")
        .room_letters("")
        .corridor(2, kind('C'))
        .corridor(3, kind('A'))
        .build()
        .expect("valid deadlocked puzzle")
}

/// Three rooms already sorted, capacity 3.
pub fn sorted() -> Puzzle {
    standard(3, 3)
        .room_letters("AAA")
        .room_letters("BBB")
        .room_letters("CCC")
        .build()
        .expect("valid sorted puzzle")
}
