//! Sentinel-bordered occupancy grid and content hashing.
//!
//! The grid is `(height + 2) x (width + 2)` cells, framed by immovable
//! border sentinels so collision checks never need explicit bounds tests.
//! Every interior cell holds either `Empty` or the index of the piece
//! covering it; a multi-cell piece's index appears in each cell of its
//! footprint.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PuzzleError;
use crate::geometry::{Direction, Position};
use crate::pieces::{Piece, PieceType, NUM_PIECE_TYPES};

/// Cell indices are stored as `u8`, capping the piece count per board.
const MAX_PIECES: usize = u8::MAX as usize;

/// One grid cell: a sentinel or the index of the occupying piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Border,
    Empty,
    Piece(u8),
}

/// The occupancy grid, owning its pieces.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    pieces: Vec<Piece>,
    goal_index: usize,
    target: Position,
}

impl Board {
    /// Creates an empty bordered board with the given success cell.
    ///
    /// Fails with a configuration error when either dimension is zero or
    /// the success cell does not lie inside the interior (degenerate board
    /// sizes put the standard exit on or beyond the frame).
    pub fn new(width: usize, height: usize, target: Position) -> Result<Self, PuzzleError> {
        if width == 0 || height == 0 {
            return Err(PuzzleError::BadDimensions { width, height });
        }
        if target.left < 0
            || target.left >= width as i32
            || target.top < 0
            || target.top >= height as i32
        {
            return Err(PuzzleError::BadExit {
                left: target.left,
                top: target.top,
            });
        }

        let cols = width + 2;
        let rows = height + 2;
        let mut cells = vec![Cell::Empty; cols * rows];
        for row in 0..rows {
            for col in 0..cols {
                if row == 0 || col == 0 || row == rows - 1 || col == cols - 1 {
                    cells[row * cols + col] = Cell::Border;
                }
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            pieces: Vec::new(),
            goal_index: 0,
            target,
        })
    }

    /// The standard exit anchor for a `width x height` board: the cell the
    /// goal cube must reach, centered on the bottom edge. `(1, 3)` for the
    /// traditional 4x5 board.
    pub fn exit_cell(width: usize, height: usize) -> Position {
        Position::new((width as i32 - 2) / 2, height as i32 - 2)
    }

    /// Places the initial layout, validating every piece as it is stamped.
    ///
    /// A collision or out-of-bounds footprint fails with the offending
    /// piece's index. Must be called exactly once, on a fresh board.
    pub fn init_pieces(
        &mut self,
        pieces: Vec<Piece>,
        goal_index: usize,
    ) -> Result<(), PuzzleError> {
        if pieces.len() > MAX_PIECES {
            return Err(PuzzleError::TooManyPieces {
                count: pieces.len(),
            });
        }
        if goal_index >= pieces.len() {
            return Err(PuzzleError::BadGoalIndex {
                index: goal_index,
                piece_count: pieces.len(),
            });
        }

        self.pieces = pieces;
        self.goal_index = goal_index;
        for index in 0..self.pieces.len() {
            if !self.can_place(index, self.pieces[index].position) {
                return Err(PuzzleError::Placement { piece_index: index });
            }
            self.stamp(index, Cell::Piece(index as u8));
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, index: usize) -> &Piece {
        &self.pieces[index]
    }

    pub fn goal_index(&self) -> usize {
        self.goal_index
    }

    /// True when the goal piece's anchor sits on the success cell.
    pub fn is_resolved(&self) -> bool {
        self.pieces[self.goal_index].position == self.target
    }

    /// The occupant type of a cell; positions outside the interior resolve
    /// to `Border`.
    pub fn cell_type(&self, position: Position) -> PieceType {
        match self.cell(position) {
            Cell::Border => PieceType::Border,
            Cell::Empty => PieceType::Empty,
            Cell::Piece(index) => self.pieces[index as usize].kind,
        }
    }

    /// True iff every cell of `piece_index`'s footprint at `at` is empty or
    /// already owned by the same piece. A pure predicate: illegal placement
    /// is a `false`, not an error.
    pub fn can_place(&self, piece_index: usize, at: Position) -> bool {
        let kind = self.pieces[piece_index].kind;
        kind.cell_offsets().iter().all(|&(dx, dy)| {
            match self.cell(Position::new(at.left + dx, at.top + dy)) {
                Cell::Empty => true,
                Cell::Piece(owner) => owner as usize == piece_index,
                Cell::Border => false,
            }
        })
    }

    /// Slides a piece one cell. The caller must have verified `can_place`
    /// for the shifted anchor; the footprint is cleared, the anchor moved,
    /// and the footprint re-stamped with no partially-moved state exposed.
    pub fn move_piece(&mut self, piece_index: usize, direction: Direction) {
        debug_assert!(
            self.can_place(piece_index, self.pieces[piece_index].position.shifted(direction)),
            "move must be validated before it is applied"
        );
        self.stamp(piece_index, Cell::Empty);
        let position = &mut self.pieces[piece_index].position;
        *position = position.shifted(direction);
        self.stamp(piece_index, Cell::Piece(piece_index as u8));
    }

    /// Writes `value` into every cell of the piece's current footprint.
    fn stamp(&mut self, piece_index: usize, value: Cell) {
        let anchor = self.pieces[piece_index].position;
        for &(dx, dy) in self.pieces[piece_index].kind.cell_offsets() {
            let index = self.cell_index(Position::new(anchor.left + dx, anchor.top + dy));
            self.cells[index] = value;
        }
    }

    /// Reads a cell. Positions beyond the stored frame, at any distance,
    /// also read as `Border`, so a far-out or deeply negative anchor fails
    /// placement rather than wrapping into the interior.
    fn cell(&self, position: Position) -> Cell {
        if position.left < -1
            || position.left > self.width as i32
            || position.top < -1
            || position.top > self.height as i32
        {
            return Cell::Border;
        }
        self.cells[self.cell_index(position)]
    }

    /// Maps an interior position onto the bordered grid. Positions down to
    /// `-1` and up to `width`/`height` are valid and land on the frame.
    fn cell_index(&self, position: Position) -> usize {
        debug_assert!(position.left >= -1 && position.left <= self.width as i32);
        debug_assert!(position.top >= -1 && position.top <= self.height as i32);
        (position.top + 1) as usize * (self.width + 2) + (position.left + 1) as usize
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in -1..=self.height as i32 {
            for col in -1..=self.width as i32 {
                if col > -1 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.cell_type(Position::new(col, row)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Seed for reproducible hashes when no explicit seed is supplied.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x6b6c_6f74_736b_6921;

/// Zobrist key table: one random nonzero 64-bit key per
/// `(row, column, occupant type)` triple over the board interior.
///
/// Generation is deterministic for a given seed, so hashes and
/// discovered-solution identity are reproducible across runs.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    width: usize,
    height: usize,
    keys: Vec<u64>,
}

impl ZobristTable {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut keys = Vec::with_capacity(width * height * NUM_PIECE_TYPES);
        for _ in 0..width * height * NUM_PIECE_TYPES {
            let mut key = 0u64;
            while key == 0 {
                key = rng.gen();
            }
            keys.push(key);
        }
        Self {
            width,
            height,
            keys,
        }
    }

    fn key(&self, row: usize, col: usize, kind: PieceType) -> u64 {
        self.keys[(row * self.width + col) * NUM_PIECE_TYPES + kind.key_index()]
    }

    /// Content hash of the board: XOR of the keys for every interior cell's
    /// occupant type. Piece identity does not participate, so two boards
    /// with the same per-cell type layout always hash equal.
    pub fn hash(&self, board: &Board) -> u64 {
        debug_assert_eq!((board.width(), board.height()), (self.width, self.height));
        let mut hash = 0;
        for row in 0..self.height {
            for col in 0..self.width {
                let kind = board.cell_type(Position::new(col as i32, row as i32));
                hash ^= self.key(row, col, kind);
            }
        }
        hash
    }

    /// Hash of the board reflected left-to-right, computed by re-indexing
    /// column `j` as `width - 1 - j` instead of materializing the mirror.
    pub fn mirror_hash(&self, board: &Board) -> u64 {
        debug_assert_eq!((board.width(), board.height()), (self.width, self.height));
        let mut hash = 0;
        for row in 0..self.height {
            for col in 0..self.width {
                let source = Position::new((self.width - 1 - col) as i32, row as i32);
                hash ^= self.key(row, col, board.cell_type(source));
            }
        }
        hash
    }
}
