//! Text diagrams of a burrow.
//!
//! The format draws walls with `#`, empty cells with `.` and tokens with
//! their kind letter:
//!
//! ```text
//! #############
//! #...........#
//! ###B#C#B#D###
//!   #A#D#C#A#
//!   #########
//! ```
//!
//! The hallway row fixes the hallway width and any initial corridor tokens.
//! Each room row below it contributes one level to every room; the columns
//! of the first room row are the door columns.

use std::collections::BTreeSet;
use std::fmt;

use roomsort_config::{ConfigError, LayoutConfig};
use roomsort_core::{Kind, Puzzle, Result, RoomsortError, State, Topology};

fn malformed(line: usize, message: impl fmt::Display) -> RoomsortError {
    RoomsortError::MalformedInput(format!("line {line}: {message}"))
}

fn config_error(e: ConfigError) -> RoomsortError {
    RoomsortError::Config(e.to_string())
}

fn is_cell(c: char) -> bool {
    c == '.' || c.is_ascii_alphabetic()
}

fn has_cells(line: &str) -> bool {
    line.chars().any(is_cell)
}

fn cell(line: usize, c: char) -> Result<Option<Kind>> {
    match c {
        '.' => Ok(None),
        c => Kind::from_letter(c)
            .map(Some)
            .ok_or_else(|| malformed(line, format!("unknown token kind '{c}'"))),
    }
}

/// A diagram read into rows and columns, before puzzle validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDiagram {
    /// Number of hallway cells.
    pub hallway_width: usize,
    /// Hallway column of each room's door, left to right.
    pub door_columns: Vec<usize>,
    /// Number of room rows.
    pub capacity: usize,
    /// Each room's tokens, bottom first.
    pub rooms: Vec<Vec<Kind>>,
    /// Initial corridor tokens by hallway column.
    pub corridor: Vec<(usize, Kind)>,
}

impl ParsedDiagram {
    /// Reads the rows of a diagram.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput`, naming the offending line, if there is no
    /// hallway or room row, a cell holds an unknown character, the room
    /// rows do not line up, a corridor token stands in a doorway, or a room
    /// has an empty cell below a token.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| has_cells(line));

        let (hall_line, hallway) = rows
            .next()
            .ok_or_else(|| RoomsortError::MalformedInput("diagram has no hallway row".into()))?;
        // Columns are character positions, never byte offsets.
        let hallway: Vec<char> = hallway.chars().collect();
        let left = hallway
            .iter()
            .position(|&c| c == '#')
            .ok_or_else(|| malformed(hall_line, "hallway row has no left wall"))?;
        let right = hallway
            .iter()
            .rposition(|&c| c == '#')
            .filter(|&r| r > left)
            .ok_or_else(|| malformed(hall_line, "hallway row has no right wall"))?;
        let offset = left + 1;

        let mut corridor = Vec::new();
        for (column, &c) in hallway[offset..right].iter().enumerate() {
            if let Some(kind) = cell(hall_line, c)? {
                corridor.push((column, kind));
            }
        }
        let hallway_width = right - offset;

        let mut door_columns: Option<Vec<usize>> = None;
        let mut levels: Vec<Vec<Option<Kind>>> = Vec::new();
        for (line_no, line) in rows {
            let mut columns = Vec::new();
            let mut level = Vec::new();
            for (pos, c) in line.chars().enumerate().filter(|&(_, c)| is_cell(c)) {
                let column = pos
                    .checked_sub(offset)
                    .filter(|&col| col < hallway_width)
                    .ok_or_else(|| malformed(line_no, "room cell lies outside the hallway"))?;
                columns.push(column);
                level.push(cell(line_no, c)?);
            }
            match &door_columns {
                None => door_columns = Some(columns),
                Some(doors) if *doors == columns => {}
                Some(_) => {
                    return Err(malformed(
                        line_no,
                        "room cells do not line up with the first room row",
                    ))
                }
            }
            levels.push(level);
        }
        let door_columns = door_columns
            .ok_or_else(|| RoomsortError::MalformedInput("diagram has no room rows".into()))?;

        let doors: BTreeSet<usize> = door_columns.iter().copied().collect();
        if let Some(&(column, kind)) = corridor.iter().find(|(col, _)| doors.contains(col)) {
            return Err(malformed(
                hall_line,
                format!("token {kind} stands in the doorway at column {column}"),
            ));
        }

        let mut rooms = Vec::with_capacity(door_columns.len());
        for room in 0..door_columns.len() {
            // Levels run top to bottom; rooms fill bottom up.
            let cells: Vec<Option<Kind>> = levels.iter().rev().map(|level| level[room]).collect();
            let height = cells.iter().take_while(|c| c.is_some()).count();
            if cells[height..].iter().any(Option::is_some) {
                return Err(RoomsortError::MalformedInput(format!(
                    "room {room} has an empty cell below a token"
                )));
            }
            rooms.push(cells.into_iter().flatten().collect());
        }

        Ok(Self {
            hallway_width,
            door_columns,
            capacity: levels.len(),
            rooms,
            corridor,
        })
    }

    /// Returns the shape the diagram draws.
    pub fn topology(&self) -> Result<Topology> {
        Topology::new(self.hallway_width, &self.door_columns)
    }

    /// Validates the diagram as a puzzle.
    ///
    /// A layout naming a shape must match the drawn one; layout weights
    /// replace the default weights.
    pub fn into_puzzle(self, layout: Option<&LayoutConfig>) -> Result<Puzzle> {
        let topology = self.topology()?;
        let mut builder = Puzzle::builder(topology.clone()).capacity(self.capacity);

        if let Some(layout) = layout {
            if let Some(configured) = layout.topology().map_err(config_error)? {
                if configured != topology {
                    return Err(RoomsortError::MalformedInput(format!(
                        "diagram draws a hallway of width {} with doors at {:?}, \
                         configured layout has width {} with doors at {:?}",
                        topology.hallway_width(),
                        topology.door_columns(),
                        configured.hallway_width(),
                        configured.door_columns(),
                    )));
                }
            }
            if let Some(weights) = layout.weights().map_err(config_error)? {
                builder = builder.weights(weights);
            }
        }

        for room in self.rooms {
            builder = builder.room(room);
        }
        for (column, kind) in self.corridor {
            let slot = topology.slot_at(column).ok_or_else(|| {
                RoomsortError::MalformedInput(format!("column {column} is not a corridor slot"))
            })?;
            builder = builder.corridor(slot, kind);
        }
        builder.build()
    }
}

/// Parses a diagram into a puzzle with default weights.
///
/// # Example
///
/// ```
/// use roomsort::diagram;
///
/// let puzzle = diagram::parse(
///     "#############\n\
///      #...........#\n\
///      ####B#C#B#D###\n\
///      \x20 #A#D#C#A#\n\
///      \x20 #########\n",
/// )
/// .unwrap();
/// assert_eq!(puzzle.room_count(), 4);
/// assert_eq!(puzzle.capacity(), 2);
/// ```
pub fn parse(text: &str) -> Result<Puzzle> {
    parse_with(text, None)
}

/// Parses a diagram into a puzzle, applying `layout` if given.
pub fn parse_with(text: &str, layout: Option<&LayoutConfig>) -> Result<Puzzle> {
    ParsedDiagram::parse(text)?.into_puzzle(layout)
}

/// Inserts `extra_rows` below the first room row, deepening every room.
///
/// # Errors
///
/// Returns `MalformedInput` if the diagram has no room row.
pub fn unfold(text: &str, extra_rows: &[&str]) -> Result<String> {
    let lines: Vec<&str> = text.lines().collect();
    let first_room_row = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| has_cells(line))
        .nth(1)
        .map(|(i, _)| i)
        .ok_or_else(|| RoomsortError::MalformedInput("diagram has no room rows".into()))?;

    let mut out = String::with_capacity(text.len() + extra_rows.iter().map(|r| r.len() + 1).sum::<usize>());
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        out.push('\n');
        if i == first_room_row {
            for row in extra_rows {
                out.push_str(row);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

/// Draws a state in diagram form.
///
/// ```
/// use roomsort::diagram::Diagram;
/// use roomsort::Puzzle;
///
/// let puzzle = Puzzle::builder_standard(2)
///     .unwrap()
///     .capacity(1)
///     .room_letters("B")
///     .room_letters("A")
///     .build()
///     .unwrap();
/// let drawn = Diagram::initial(&puzzle).to_string();
/// assert_eq!(drawn, "#########\n#.......#\n###B#A###\n  #####\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Diagram<'a> {
    topology: &'a Topology,
    state: &'a State,
}

impl<'a> Diagram<'a> {
    pub fn new(topology: &'a Topology, state: &'a State) -> Self {
        Self { topology, state }
    }

    /// Draws the puzzle's initial state.
    pub fn initial(puzzle: &'a Puzzle) -> Self {
        Self::new(puzzle.topology(), puzzle.initial())
    }
}

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topology = self.topology;
        let state = self.state;
        let width = topology.hallway_width();
        let doors = topology.door_columns();
        let (first, last) = match (doors.first(), doors.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Ok(()),
        };
        // Drawn columns are hallway columns shifted right by the left wall.
        let wall = |col: usize| col >= first && col <= last + 2;
        let letter = |kind: Option<Kind>| kind.map_or('.', Kind::letter);

        writeln!(f, "{}", "#".repeat(width + 2))?;
        let hallway: String = (0..width)
            .map(|col| letter(topology.slot_at(col).and_then(|s| state.corridor_slot(s))))
            .collect();
        writeln!(f, "#{hallway}#")?;

        let capacity = state.capacity();
        for row in 0..capacity {
            let depth = capacity - 1 - row;
            let line: String = (0..width + 2)
                .map(|col| match col.checked_sub(1).and_then(|c| topology.room_at(c)) {
                    Some(room) => letter(state.room(room).get(depth)),
                    None if row == 0 || wall(col) => '#',
                    None => ' ',
                })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }

        let floor: String = (0..width + 2)
            .map(|col| if wall(col) { '#' } else { ' ' })
            .collect();
        writeln!(f, "{}", floor.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomsort_test::{EXAMPLE_DIAGRAM, UNFOLD_ROWS};

    fn message(result: Result<Puzzle>) -> String {
        match result {
            Err(RoomsortError::MalformedInput(msg)) => msg,
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_example() {
        let parsed = ParsedDiagram::parse(EXAMPLE_DIAGRAM).unwrap();
        assert_eq!(parsed.hallway_width, 11);
        assert_eq!(parsed.door_columns, vec![2, 4, 6, 8]);
        assert_eq!(parsed.capacity, 2);
        let letters: Vec<String> = parsed
            .rooms
            .iter()
            .map(|room| room.iter().map(|k| k.letter()).collect())
            .collect();
        assert_eq!(letters, vec!["AB", "DC", "CB", "AD"]);
        assert!(parsed.corridor.is_empty());
    }

    #[test]
    fn test_render_matches_input() {
        let puzzle = parse(EXAMPLE_DIAGRAM).unwrap();
        assert_eq!(Diagram::initial(&puzzle).to_string(), EXAMPLE_DIAGRAM);
    }

    #[test]
    fn test_unfold_inserts_below_first_room_row() {
        let unfolded = unfold(EXAMPLE_DIAGRAM, &UNFOLD_ROWS).unwrap();
        let lines: Vec<&str> = unfolded.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], "###B#C#B#D###");
        assert_eq!(lines[3], UNFOLD_ROWS[0]);
        assert_eq!(lines[4], UNFOLD_ROWS[1]);
        assert_eq!(lines[5], "  #A#D#C#A#");

        let puzzle = parse(&unfolded).unwrap();
        assert_eq!(puzzle.capacity(), 4);
        assert_eq!(puzzle.initial(), roomsort_test::example_unfolded().initial());
    }

    #[test]
    fn test_corridor_tokens() {
        let text = "#########\n#A......#\n###.#B###\n  #A#B#\n  #####\n";
        let puzzle = parse(text).unwrap();
        assert_eq!(puzzle.topology().hallway_width(), 7);
        assert_eq!(puzzle.initial().corridor_slot(0), Kind::from_letter('A'));
        assert_eq!(puzzle.initial().room(0).len(), 1);
        assert_eq!(puzzle.initial().room(1).len(), 2);
        assert_eq!(Diagram::initial(&puzzle).to_string(), text);
    }

    #[test]
    fn test_wide_characters_before_walls() {
        let framed: String = EXAMPLE_DIAGRAM
            .lines()
            .map(|line| format!("│ {line}\n"))
            .collect();
        let plain = ParsedDiagram::parse(EXAMPLE_DIAGRAM).unwrap();
        assert_eq!(ParsedDiagram::parse(&framed).unwrap(), plain);
        assert_eq!(plain.door_columns, vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_rejects_token_in_doorway() {
        let text = "#########\n#..A....#\n###A#B###\n  #B#.#\n  #####\n";
        assert!(message(parse(text)).contains("doorway"));
    }

    #[test]
    fn test_rejects_unknown_letter() {
        let text = EXAMPLE_DIAGRAM.replace("###B#C", "###Z#C");
        assert!(message(parse(&text)).starts_with("line 3:"));
    }

    #[test]
    fn test_rejects_misaligned_rows() {
        let text = EXAMPLE_DIAGRAM.replace("  #A#D#C#A#", " #A#D#C#A#");
        assert!(message(parse(&text)).contains("line up"));
    }

    #[test]
    fn test_rejects_floating_token() {
        let text = EXAMPLE_DIAGRAM.replace("  #A#D#C#A#", "  #.#D#C#A#");
        let text = text.replace("###B#C", "###A#C");
        assert!(message(parse(&text)).contains("empty cell below"));
    }

    #[test]
    fn test_rejects_wrong_census() {
        let text = EXAMPLE_DIAGRAM.replace("###B#C", "###A#C");
        assert!(message(parse(&text)).contains("occurs"));
    }

    #[test]
    fn test_layout_weights_apply() {
        let layout = LayoutConfig {
            weights: Some(vec![2, 20, 200, 2000]),
            ..LayoutConfig::default()
        };
        let puzzle = parse_with(EXAMPLE_DIAGRAM, Some(&layout)).unwrap();
        assert_eq!(puzzle.weights().as_slice(), &[2, 20, 200, 2000]);
    }

    #[test]
    fn test_layout_shape_must_match() {
        let layout = LayoutConfig {
            hallway_width: Some(13),
            door_columns: Some(vec![2, 4, 6, 8]),
            ..LayoutConfig::default()
        };
        assert!(message(parse_with(EXAMPLE_DIAGRAM, Some(&layout))).contains("configured layout"));
    }
}
