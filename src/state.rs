//! A reachable configuration plus how it was reached.
//!
//! States live in the search engine's arena; `parent` is an index into that
//! arena rather than a pointer, so provenance chains can never dangle and
//! states are never removed. A state exclusively owns its board: every
//! transition deep-copies the board before mutating it.

use std::fmt;

use crate::board::Board;
use crate::error::PuzzleError;
use crate::geometry::Direction;
use crate::pieces::Piece;

/// Index of a state in the engine's arena.
pub type StateId = usize;

/// The logical move that produced a state.
///
/// `length == 2` is two consecutive same-direction slides of one piece,
/// collapsed into a single displayed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub piece_index: usize,
    pub direction: Direction,
    pub length: u8,
}

/// One board snapshot with its provenance: the arena id of the state it was
/// derived from, the move taken, and the logical move depth from the root.
#[derive(Debug, Clone)]
pub struct GamePosition {
    board: Board,
    parent: Option<StateId>,
    mv: Option<Move>,
    depth: u32,
    /// Content hash, assigned once by the engine when the state is admitted.
    pub(crate) hash: u64,
}

impl GamePosition {
    /// Builds the root state from an initial piece layout.
    ///
    /// Validates dimensions and that every piece can be placed without
    /// collision. The success cell is the standard exit for the board size.
    pub fn new(
        width: usize,
        height: usize,
        pieces: Vec<Piece>,
        goal_index: usize,
    ) -> Result<Self, PuzzleError> {
        let mut board = Board::new(width, height, Board::exit_cell(width, height))?;
        board.init_pieces(pieces, goal_index)?;
        Ok(Self {
            board,
            parent: None,
            mv: None,
            depth: 0,
            hash: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece placements a renderer consumes; ordered by piece id.
    pub fn pieces(&self) -> &[Piece] {
        self.board.pieces()
    }

    pub fn is_resolved(&self) -> bool {
        self.board.is_resolved()
    }

    /// The root state is the unique state with no parent.
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn last_move(&self) -> Option<Move> {
        self.mv
    }

    /// Logical move count from the root along the parent chain.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Attempts a single-cell slide of one piece.
    ///
    /// Returns `None` when the target footprint is blocked; illegal moves
    /// are simply not generated. `self_id` must be this state's own arena
    /// id, recorded as the child's parent.
    pub fn try_move(
        &self,
        self_id: StateId,
        piece_index: usize,
        direction: Direction,
    ) -> Option<GamePosition> {
        let board = self.advanced_board(piece_index, direction)?;
        Some(GamePosition {
            board,
            parent: Some(self_id),
            mv: Some(Move {
                piece_index,
                direction,
                length: 1,
            }),
            depth: self.depth + 1,
            hash: 0,
        })
    }

    /// Extends a fresh single-step state by one more slide in the same
    /// direction, merging the two physical slides into one logical move.
    ///
    /// The result's parent is the state before the first of the two steps
    /// and its depth equals this state's: the pair counts as one unit.
    pub fn try_continue(&self, piece_index: usize, direction: Direction) -> Option<GamePosition> {
        debug_assert!(
            matches!(self.mv, Some(mv) if mv.piece_index == piece_index
                && mv.direction == direction
                && mv.length == 1),
            "continuation must extend the single step that produced this state"
        );
        let board = self.advanced_board(piece_index, direction)?;
        Some(GamePosition {
            board,
            parent: self.parent,
            mv: Some(Move {
                piece_index,
                direction,
                length: 2,
            }),
            depth: self.depth,
            hash: 0,
        })
    }

    /// Clones the board and applies the slide, if it is legal.
    fn advanced_board(&self, piece_index: usize, direction: Direction) -> Option<Board> {
        let target = self.board.piece(piece_index).position.shifted(direction);
        if !self.board.can_place(piece_index, target) {
            return None;
        }
        let mut board = self.board.clone();
        board.move_piece(piece_index, direction);
        Some(board)
    }
}

impl fmt::Display for GamePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}
