//! Breadth-first search over deduplicated board configurations.
//!
//! The engine owns an append-only arena of every discovered state; the
//! arena doubles as the BFS queue via a cursor index. A memo table keyed by
//! 64-bit content hash enforces at-most-one exploration per distinct
//! configuration, with the mirror hash registered alongside so bilaterally
//! symmetric states fold together. Deduplication is first-writer-wins: a
//! configuration is explored via whichever provenance path reached it first
//! in insertion order, and later (possibly shorter) paths are dropped.

use rustc_hash::FxHashMap;

use crate::board::{ZobristTable, DEFAULT_ZOBRIST_SEED};
use crate::geometry::Direction;
use crate::state::{GamePosition, StateId};

/// Default number of expansions per `step` slice, sized to keep one slice
/// short enough for a cooperative host's scheduling turn.
pub const EXPANSIONS_PER_SLICE: usize = 100;

/// Result of one incremental `step` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// At least one state was expanded during this call.
    pub advanced: bool,
    /// At least one solution has been recorded so far.
    pub solution_found: bool,
}

/// The search engine for one puzzle attempt.
///
/// Grows monotonically: states are never removed, and partial progress is
/// valid and resumable at any point. All mutation happens through `expand`
/// and `upsert`; there is no external writer.
pub struct Game {
    arena: Vec<GamePosition>,
    memo: FxHashMap<u64, StateId>,
    solutions: Vec<u64>,
    cursor: usize,
    zobrist: ZobristTable,
}

impl Game {
    /// Creates an engine seeded with one initial state, using the default
    /// Zobrist seed for reproducible hashes.
    pub fn new(initial: GamePosition) -> Self {
        Self::with_seed(initial, DEFAULT_ZOBRIST_SEED)
    }

    /// Creates an engine with an explicit Zobrist seed.
    pub fn with_seed(initial: GamePosition, seed: u64) -> Self {
        let board = initial.board();
        let zobrist = ZobristTable::new(board.width(), board.height(), seed);
        let mut game = Self {
            arena: Vec::new(),
            memo: FxHashMap::default(),
            solutions: Vec::new(),
            cursor: 0,
            zobrist,
        };
        // the root participates in dedup like any other state, so a root
        // that is already resolved can be looked up through the memo
        game.upsert(initial);
        game
    }

    /// Runs expansions until `max_solutions` are found or the search space
    /// is exhausted.
    pub fn run(&mut self, max_solutions: usize) {
        while self.solutions.len() < max_solutions && !self.is_exhausted() {
            self.expand();
        }
    }

    /// Expands up to `batch` states, then yields control back to the host.
    ///
    /// The search is deterministic and keeps no state outside the engine's
    /// own fields, so any batching schedule produces identical results.
    pub fn step(&mut self, batch: usize) -> StepOutcome {
        let before = self.cursor;
        for _ in 0..batch {
            if self.is_exhausted() {
                break;
            }
            self.expand();
        }
        StepOutcome {
            advanced: self.cursor > before,
            solution_found: self.has_solution(),
        }
    }

    pub fn has_solution(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// True when every discovered state has been expanded.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.arena.len()
    }

    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    /// Number of distinct configurations discovered so far.
    pub fn discovered(&self) -> usize {
        self.arena.len()
    }

    /// Number of states expanded so far.
    pub fn explored(&self) -> usize {
        self.cursor
    }

    /// All discovered states, in discovery order.
    pub fn positions(&self) -> impl Iterator<Item = &GamePosition> {
        self.arena.iter()
    }

    /// The move sequence of the `index`-th solution found, as states in
    /// root-to-goal order with the root excluded.
    ///
    /// `None` when fewer than `index + 1` solutions exist — a normal
    /// outcome the caller reports, never an error. A root that starts
    /// resolved yields `Some` of an empty sequence.
    pub fn get_solution(&self, index: usize) -> Option<Vec<&GamePosition>> {
        let hash = self.solutions.get(index)?;
        let mut id = *self.memo.get(hash)?;
        let mut path = Vec::new();
        loop {
            let state = &self.arena[id];
            match state.parent() {
                Some(parent) => {
                    path.push(state);
                    id = parent;
                }
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    /// Expands the state under the cursor: records it if resolved,
    /// otherwise generates every legal single and merged two-step move for
    /// every piece. The cursor advances regardless of outcome.
    fn expand(&mut self) {
        let id = self.cursor;
        self.cursor += 1;

        if self.arena[id].is_resolved() {
            let hash = self.arena[id].hash;
            self.solutions.push(hash);
            return;
        }

        let piece_count = self.arena[id].pieces().len();
        for piece_index in 0..piece_count {
            for direction in Direction::ALL {
                let Some(single) = self.arena[id].try_move(id, piece_index, direction) else {
                    continue;
                };
                // the continuation is derived from the single step even when
                // the single step itself turns out to be a duplicate
                let merged = single.try_continue(piece_index, direction);
                self.upsert(single);
                if let Some(merged) = merged {
                    self.upsert(merged);
                }
            }
        }
    }

    /// Admits a state unless its configuration was already seen.
    ///
    /// First writer wins: a duplicate is discarded entirely, including its
    /// provenance. New states are registered under both their own hash and
    /// their mirror hash, so a mirrored arrival later is recognized too.
    fn upsert(&mut self, mut state: GamePosition) -> bool {
        let hash = self.zobrist.hash(state.board());
        if self.memo.contains_key(&hash) {
            return false;
        }
        let mirror = self.zobrist.mirror_hash(state.board());
        let id = self.arena.len();
        state.hash = hash;
        self.arena.push(state);
        self.memo.insert(hash, id);
        self.memo.entry(mirror).or_insert(id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::pieces::{build_pieces, LayoutPiece, PieceType, CLASSIC, GOAL_PIECE, LAYOUTS};
    use crate::state::Move;

    fn classic_root() -> GamePosition {
        GamePosition::new(4, 5, build_pieces(CLASSIC), GOAL_PIECE).unwrap()
    }

    /// A 2x2 board packed with soldiers: no piece can ever move.
    fn jammed_root() -> GamePosition {
        let layout: [LayoutPiece; 4] = [
            (PieceType::Block, 0, 0, "soldier"),
            (PieceType::Block, 1, 0, "soldier"),
            (PieceType::Block, 0, 1, "soldier"),
            (PieceType::Block, 1, 1, "soldier"),
        ];
        GamePosition::new(2, 2, build_pieces(&layout), 3).unwrap()
    }

    /// Checks that consecutive path states differ by exactly the recorded
    /// move, and that depth increases by one logical unit per step.
    fn assert_path_valid(root: &GamePosition, path: &[&GamePosition]) {
        let mut previous = root;
        for (step, &state) in path.iter().enumerate() {
            assert_eq!(state.depth(), step as u32 + 1);
            let Move {
                piece_index,
                direction,
                length,
            } = state.last_move().expect("non-root states record a move");
            assert!(length == 1 || length == 2);

            let mut expected = previous.pieces()[piece_index].position;
            for _ in 0..length {
                expected = expected.shifted(direction);
            }
            assert_eq!(state.pieces()[piece_index].position, expected);

            // every other piece stays put
            for (index, piece) in state.pieces().iter().enumerate() {
                if index != piece_index {
                    assert_eq!(piece.position, previous.pieces()[index].position);
                }
            }
            previous = state;
        }
    }

    /// Re-derives the occupancy of a state from its piece list and checks
    /// that each interior cell is claimed exactly once, consistent with the
    /// claimed piece's shape.
    fn assert_no_overlap(state: &GamePosition) {
        let board = state.board();
        let mut claimed = vec![false; board.width() * board.height()];
        for piece in state.pieces() {
            for cell in piece.cells() {
                assert_eq!(board.cell_type(cell), piece.kind);
                let index = cell.top as usize * board.width() + cell.left as usize;
                assert!(!claimed[index], "cell {cell} claimed twice");
                claimed[index] = true;
            }
        }
        for top in 0..board.height() as i32 {
            for left in 0..board.width() as i32 {
                let index = top as usize * board.width() + left as usize;
                if !claimed[index] {
                    assert_eq!(
                        board.cell_type(Position::new(left, top)),
                        PieceType::Empty
                    );
                }
            }
        }
    }

    #[test]
    fn test_classic_layout_is_solvable() {
        let mut game = Game::new(classic_root());
        game.run(1);

        assert!(game.has_solution());
        let path = game.get_solution(0).expect("a solution path");
        assert!(path.len() > 10);
        assert!(path.last().unwrap().is_resolved());

        let root = game.positions().next().unwrap();
        assert_eq!(path[0].parent(), Some(0));
        assert_path_valid(root, &path);
    }

    #[test]
    fn test_every_bundled_layout_is_solvable() {
        for (name, layout) in LAYOUTS {
            let root = GamePosition::new(4, 5, build_pieces(layout), GOAL_PIECE).unwrap();
            let mut game = Game::new(root);
            game.run(1);
            assert!(game.has_solution(), "layout {name} should be solvable");
        }
    }

    #[test]
    fn test_no_state_ever_overlaps() {
        let mut game = Game::new(classic_root());
        game.run(1);
        for state in game.positions() {
            assert_no_overlap(state);
        }
    }

    #[test]
    fn test_search_space_is_finite() {
        let mut game = Game::new(classic_root());
        game.run(usize::MAX);

        assert!(game.is_exhausted());
        assert_eq!(game.explored(), game.discovered());
        // bounded grid, fixed pieces: the reachable set stays small
        assert!(game.discovered() < 200_000);
    }

    #[test]
    fn test_resolved_root_yields_empty_path() {
        let layout: [LayoutPiece; 1] = [(PieceType::Cube, 1, 3, "cao cao")];
        let root = GamePosition::new(4, 5, build_pieces(&layout), 0).unwrap();
        assert!(root.is_resolved());

        let mut game = Game::new(root);
        game.run(1);

        assert!(game.has_solution());
        let path = game.get_solution(0).expect("the root itself is a solution");
        assert!(path.is_empty());
    }

    #[test]
    fn test_jammed_board_exhausts_without_solution() {
        let mut game = Game::new(jammed_root());
        game.run(1);

        assert!(game.is_exhausted());
        assert!(!game.has_solution());
        assert!(game.get_solution(0).is_none());
    }

    #[test]
    fn test_get_solution_is_idempotent() {
        let mut game = Game::new(classic_root());
        game.run(1);

        let first = game.get_solution(0).unwrap();
        let second = game.get_solution(0).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.last_move(), b.last_move());
            assert_eq!(a.pieces(), b.pieces());
        }
    }

    #[test]
    fn test_result_is_independent_of_zobrist_seed() {
        let mut a = Game::with_seed(classic_root(), 1);
        let mut b = Game::with_seed(classic_root(), 2);
        a.run(1);
        b.run(1);

        let path_a = a.get_solution(0).unwrap();
        let path_b = b.get_solution(0).unwrap();
        assert_eq!(path_a.len(), path_b.len());
    }

    #[test]
    fn test_batched_stepping_matches_a_full_run() {
        let mut synchronous = Game::new(classic_root());
        synchronous.run(1);

        let mut incremental = Game::new(classic_root());
        loop {
            let outcome = incremental.step(7);
            if outcome.solution_found || !outcome.advanced {
                break;
            }
        }

        assert!(incremental.has_solution());
        let a = synchronous.get_solution(0).unwrap();
        let b = incremental.get_solution(0).unwrap();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.last_move(), y.last_move());
        }
    }

    #[test]
    fn test_step_on_exhausted_engine_does_not_advance() {
        let mut game = Game::new(jammed_root());
        game.run(usize::MAX);
        assert!(game.is_exhausted());

        let outcome = game.step(EXPANSIONS_PER_SLICE);
        assert!(!outcome.advanced);
    }
}
