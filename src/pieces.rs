//! Piece shapes, identities, and the bundled classic opening layouts.
//!
//! The four playable shapes are a closed variant set; each shape fixes the
//! grid cells a piece occupies relative to its anchor (top-left) position.
//! `Empty` and `Border` are board-only sentinels and never belong to a
//! movable piece.

use crate::geometry::Position;

/// Number of distinct cell occupant types, including the two sentinels.
pub const NUM_PIECE_TYPES: usize = 6;

/// The shape of a board occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    /// 1x1 soldier.
    Block,
    /// 1 wide, 2 tall general.
    V2,
    /// 2 wide, 1 tall general.
    H2,
    /// The 2x2 goal piece.
    Cube,
    /// Unoccupied interior cell.
    Empty,
    /// Immovable frame cell.
    Border,
}

impl PieceType {
    /// Cell offsets `(dx, dy)` occupied relative to the anchor.
    ///
    /// Sentinels have no footprint; they are never placed or moved.
    pub const fn cell_offsets(self) -> &'static [(i32, i32)] {
        match self {
            PieceType::Block => &[(0, 0)],
            PieceType::V2 => &[(0, 0), (0, 1)],
            PieceType::H2 => &[(0, 0), (1, 0)],
            PieceType::Cube => &[(0, 0), (1, 0), (0, 1), (1, 1)],
            PieceType::Empty | PieceType::Border => &[],
        }
    }

    /// Width of the footprint in cells, used for mirror re-anchoring.
    pub const fn footprint_width(self) -> i32 {
        match self {
            PieceType::H2 | PieceType::Cube => 2,
            _ => 1,
        }
    }

    /// Stable index into the Zobrist key table.
    pub const fn key_index(self) -> usize {
        match self {
            PieceType::Block => 0,
            PieceType::V2 => 1,
            PieceType::H2 => 2,
            PieceType::Cube => 3,
            PieceType::Empty => 4,
            PieceType::Border => 5,
        }
    }

    /// Two-character cell symbol for board rendering.
    pub const fn symbol(self) -> &'static str {
        match self {
            PieceType::Block => "BL",
            PieceType::V2 => "V2",
            PieceType::H2 => "H2",
            PieceType::Cube => "CB",
            PieceType::Empty => "..",
            PieceType::Border => "##",
        }
    }
}

/// A movable occupant of the board.
///
/// `id` is stable for the piece's lifetime and is the sole basis of piece
/// identity; `name` is a display label with no engine semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: usize,
    pub name: &'static str,
    pub kind: PieceType,
    pub position: Position,
}

impl Piece {
    pub fn new(id: usize, name: &'static str, kind: PieceType, position: Position) -> Self {
        Self {
            id,
            name,
            kind,
            position,
        }
    }

    /// The cells this piece currently occupies.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.kind
            .cell_offsets()
            .iter()
            .map(|&(dx, dy)| Position::new(self.position.left + dx, self.position.top + dy))
    }
}

/// One entry of a bundled starting layout: shape, anchor, display name.
pub type LayoutPiece = (PieceType, i32, i32, &'static str);

/// Index of the goal cube in every bundled layout.
pub const GOAL_PIECE: usize = 1;

/// The classic "escaping general" opening.
pub const CLASSIC: &[LayoutPiece] = &[
    (PieceType::V2, 0, 0, "zhang fei"),
    (PieceType::Cube, 1, 0, "cao cao"),
    (PieceType::V2, 3, 0, "ma chao"),
    (PieceType::V2, 0, 2, "zhao yun"),
    (PieceType::H2, 1, 2, "guan yu"),
    (PieceType::V2, 3, 2, "huang zhong"),
    (PieceType::Block, 0, 4, "soldier"),
    (PieceType::Block, 1, 3, "soldier"),
    (PieceType::Block, 2, 3, "soldier"),
    (PieceType::Block, 3, 4, "soldier"),
];

/// Opening with the soldiers split across the middle rows.
pub const SPLIT_GUARDS: &[LayoutPiece] = &[
    (PieceType::V2, 0, 0, "zhang fei"),
    (PieceType::Cube, 1, 0, "cao cao"),
    (PieceType::V2, 3, 0, "ma chao"),
    (PieceType::Block, 0, 2, "soldier"),
    (PieceType::H2, 1, 2, "guan yu"),
    (PieceType::Block, 3, 2, "soldier"),
    (PieceType::V2, 0, 3, "zhao yun"),
    (PieceType::Block, 1, 3, "soldier"),
    (PieceType::Block, 2, 3, "soldier"),
    (PieceType::V2, 3, 3, "huang zhong"),
];

/// Opening with the cube flanked only by soldiers on the top row.
pub const EXPOSED_GENERAL: &[LayoutPiece] = &[
    (PieceType::Block, 0, 0, "soldier"),
    (PieceType::Cube, 1, 0, "cao cao"),
    (PieceType::Block, 3, 0, "soldier"),
    (PieceType::V2, 0, 1, "zhang fei"),
    (PieceType::H2, 1, 2, "guan yu"),
    (PieceType::V2, 3, 1, "ma chao"),
    (PieceType::V2, 0, 3, "zhao yun"),
    (PieceType::Block, 1, 3, "soldier"),
    (PieceType::Block, 2, 3, "soldier"),
    (PieceType::V2, 3, 3, "huang zhong"),
];

/// Bundled layouts, addressable by name from the CLI.
pub const LAYOUTS: &[(&str, &[LayoutPiece])] = &[
    ("classic", CLASSIC),
    ("split-guards", SPLIT_GUARDS),
    ("exposed-general", EXPOSED_GENERAL),
];

/// Instantiates a layout as pieces with ids matching their layout order.
pub fn build_pieces(layout: &[LayoutPiece]) -> Vec<Piece> {
    layout
        .iter()
        .enumerate()
        .map(|(id, &(kind, left, top, name))| Piece::new(id, name, kind, Position::new(left, top)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_sizes() {
        assert_eq!(PieceType::Block.cell_offsets().len(), 1);
        assert_eq!(PieceType::V2.cell_offsets().len(), 2);
        assert_eq!(PieceType::H2.cell_offsets().len(), 2);
        assert_eq!(PieceType::Cube.cell_offsets().len(), 4);
        assert!(PieceType::Empty.cell_offsets().is_empty());
        assert!(PieceType::Border.cell_offsets().is_empty());
    }

    #[test]
    fn test_piece_cells_follow_anchor() {
        let piece = Piece::new(0, "cao cao", PieceType::Cube, Position::new(1, 2));
        let cells: Vec<Position> = piece.cells().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(1, 3),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_bundled_layouts_have_a_goal_cube() {
        for (name, layout) in LAYOUTS {
            let pieces = build_pieces(layout);
            assert_eq!(pieces.len(), 10, "layout {name} should have 10 pieces");
            assert_eq!(
                pieces[GOAL_PIECE].kind,
                PieceType::Cube,
                "layout {name} goal piece should be the cube"
            );
            // twenty cells total: 18 occupied, 2 free on a 4x5 board
            let occupied: usize = pieces.iter().map(|p| p.kind.cell_offsets().len()).sum();
            assert_eq!(occupied, 18, "layout {name} should cover 18 cells");
        }
    }

    #[test]
    fn test_build_pieces_assigns_sequential_ids() {
        let pieces = build_pieces(CLASSIC);
        for (index, piece) in pieces.iter().enumerate() {
            assert_eq!(piece.id, index);
        }
    }
}
