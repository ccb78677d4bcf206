//! Klotski Puzzle Solver Library
//!
//! Provides the core engine for Klotski (Huarong Dao) sliding-block
//! puzzles: board and piece representation, legal-move rules, a
//! state-deduplicated breadth-first search, and solution-path
//! reconstruction. The search runs to completion synchronously or in
//! bounded batches for cooperative hosts.

pub mod board;
pub mod error;
pub mod geometry;
pub mod pieces;
pub mod solver;
pub mod state;

pub use board::{Board, ZobristTable, DEFAULT_ZOBRIST_SEED};
pub use error::PuzzleError;
pub use geometry::{Direction, Position};
pub use pieces::{Piece, PieceType};
pub use solver::{Game, StepOutcome, EXPANSIONS_PER_SLICE};
pub use state::{GamePosition, Move, StateId};
