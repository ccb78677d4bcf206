//! Error types for puzzle construction and move requests.
//!
//! Illegal moves during search are not errors: the engine simply does not
//! generate them. Likewise an absent solution is an `Option::None`, never an
//! error. Everything here fails a construction call or flags a caller bug.

use std::error::Error;
use std::fmt;

/// Errors raised while building a puzzle or decoding a raw direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// Board dimensions must both be at least one cell.
    BadDimensions { width: usize, height: usize },
    /// The success cell does not lie inside the board interior.
    BadExit { left: i32, top: i32 },
    /// The goal piece index does not refer to a piece in the layout.
    BadGoalIndex { index: usize, piece_count: usize },
    /// The layout holds more pieces than a board cell can address.
    TooManyPieces { count: usize },
    /// An initial layout piece collides with the border or another piece.
    Placement { piece_index: usize },
    /// A raw direction value outside the four recognized moves.
    UnknownDirection { value: u8 },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PuzzleError::BadDimensions { width, height } => {
                write!(f, "invalid board dimensions {}x{}", width, height)
            }
            PuzzleError::BadExit { left, top } => {
                write!(f, "exit cell ({}, {}) lies outside the board", left, top)
            }
            PuzzleError::BadGoalIndex { index, piece_count } => {
                write!(
                    f,
                    "goal piece index {} out of range for {} pieces",
                    index, piece_count
                )
            }
            PuzzleError::TooManyPieces { count } => {
                write!(f, "layout has {} pieces, more than a board can hold", count)
            }
            PuzzleError::Placement { piece_index } => {
                write!(f, "piece at index {} cannot be placed on the board", piece_index)
            }
            PuzzleError::UnknownDirection { value } => {
                write!(f, "unknown direction value {}", value)
            }
        }
    }
}

impl Error for PuzzleError {}
