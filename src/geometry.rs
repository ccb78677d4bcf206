//! Board coordinates and the four slide directions.
//!
//! Positions address interior cells with `(left, top)` integers; the border
//! frame lives at `-1` and `width`/`height`, so transient out-of-range
//! positions produced during move generation always land on a sentinel cell.

use std::cmp::Ordering;
use std::fmt;

use crate::error::PuzzleError;

/// An interior cell address, anchored at the board's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

impl Position {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// The neighboring position one cell away in `direction`.
    pub fn shifted(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.left + dx, self.top + dy)
    }
}

// Row-major ordering, used when canonicalizing piece lists.
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.top, self.left).cmp(&(other.top, other.left))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.top)
    }
}

/// One of the four unit slides a piece can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All directions, in the order the search tries them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// The `(dx, dy)` cell offset of a unit slide.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Decode point for hosts that supply directions as raw values (the engine
/// itself only ever handles the closed enum). This is the one place an
/// unknown direction can surface as an error.
impl TryFrom<u8> for Direction {
    type Error = PuzzleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Up),
            2 => Ok(Direction::Right),
            3 => Ok(Direction::Down),
            _ => Err(PuzzleError::UnknownDirection { value }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shifted_moves_one_cell() {
        let origin = Position::new(2, 3);
        assert_eq!(origin.shifted(Direction::Left), Position::new(1, 3));
        assert_eq!(origin.shifted(Direction::Up), Position::new(2, 2));
        assert_eq!(origin.shifted(Direction::Right), Position::new(3, 3));
        assert_eq!(origin.shifted(Direction::Down), Position::new(2, 4));
    }

    #[test]
    fn test_ordering_is_row_major() {
        assert!(Position::new(3, 0) < Position::new(0, 1));
        assert!(Position::new(0, 2) < Position::new(1, 2));
        assert_eq!(Position::new(1, 1).cmp(&Position::new(1, 1)), Ordering::Equal);
    }

    #[test]
    fn test_direction_from_raw_value() {
        assert_eq!(Direction::try_from(0), Ok(Direction::Left));
        assert_eq!(Direction::try_from(3), Ok(Direction::Down));
        assert_eq!(
            Direction::try_from(7),
            Err(PuzzleError::UnknownDirection { value: 7 })
        );
    }

    #[test]
    fn test_offsets_are_unit_slides() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }
}
