//! Core board state representation.
//!
//! `GameState` is the central model for the engine. Positions are values:
//! move application clones the parent and returns a new state, so search code
//! can hold on to any number of positions without aliasing concerns.

use crate::errors::FormatError;
use crate::game_state::shogi_rules::STARTING_POSITION;
use crate::game_state::shogi_types::*;
use crate::moves::move_descriptions::MoveDescription;
use crate::search::zobrist::{compute_zobrist_key, ZobristTables};
use crate::utils::position_generator::generate_position;
use crate::utils::position_parser::parse_position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Board ---
    pub cells: [i8; NUM_SQUARES],

    // [color] -> pieces available to drop, in capture order.
    pub reserves: [Vec<PieceKind>; 2],

    pub side_to_move: Color,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Caches ---
    pub king_squares: [Square; 2],
    pub zobrist_key: u64,

    // --- Search annotations ---
    pub last_move: Option<MoveDescription>,
    pub terminal_class: TerminalClass,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            cells: [0; NUM_SQUARES],
            reserves: [Vec::new(), Vec::new()],
            side_to_move: Color::Light,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [0; 2],
            zobrist_key: 0,
            last_move: None,
            terminal_class: TerminalClass::None,
        }
    }
}

impl GameState {
    /// Empty board, no kings. Only useful as a builder starting point.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_position(STARTING_POSITION).expect("starting position should always parse")
    }

    #[inline]
    pub fn from_position_str(text: &str) -> Result<Self, FormatError> {
        parse_position(text)
    }

    #[inline]
    pub fn to_position_string(&self) -> String {
        generate_position(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        decode_cell(self.cells[square as usize])
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square as usize] == 0
    }

    #[inline]
    pub fn reserve(&self, color: Color) -> &[PieceKind] {
        &self.reserves[color.index()]
    }

    /// Cached king square. Trust it only on states that satisfy the one-king invariant.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Scan the board for `color`'s king.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = cell_code(color, PieceKind::King);
        self.cells
            .iter()
            .position(|&cell| cell == king)
            .map(|sq| sq as Square)
    }

    /// True if exactly one king per side is on the board and the caches agree.
    pub fn kings_are_consistent(&self) -> bool {
        [Color::Light, Color::Dark].into_iter().all(|color| {
            let king = cell_code(color, PieceKind::King);
            let count = self.cells.iter().filter(|&&cell| cell == king).count();
            count == 1 && self.cells[self.king_square(color) as usize] == king
        })
    }

    /// Only the two kings remain on the board and both hands are empty.
    pub fn is_material_draw(&self) -> bool {
        self.reserves.iter().all(Vec::is_empty)
            && self.cells.iter().all(|&cell| {
                cell == 0 || cell.abs() == PieceKind::King.code()
            })
    }

    /// Recompute the cached Zobrist key from scratch.
    #[inline]
    pub fn refresh_hash(&mut self, tables: &ZobristTables) {
        self.zobrist_key = compute_zobrist_key(tables, self);
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::game_state::shogi_types::{make_square, Color, PieceKind};

    #[test]
    fn new_game_has_consistent_kings() {
        let game = GameState::new_game();
        assert!(game.kings_are_consistent());
        assert_eq!(game.king_square(Color::Light), make_square(4, 0));
        assert_eq!(game.king_square(Color::Dark), make_square(4, 8));
        assert_eq!(game.piece_at(make_square(1, 1)), Some((Color::Light, PieceKind::Bishop)));
        assert_eq!(game.piece_at(make_square(1, 7)), Some((Color::Dark, PieceKind::Rook)));
        assert!(game.reserve(Color::Light).is_empty());
    }

    #[test]
    fn material_draw_needs_bare_kings_and_empty_hands() {
        let bare = GameState::from_position_str("k8/9/9/9/9/9/9/9/K8[-] w 0 1")
            .expect("position should parse");
        assert!(bare.is_material_draw());

        let with_reserve = GameState::from_position_str("k8/9/9/9/9/9/9/9/K8[P] w 0 1")
            .expect("position should parse");
        assert!(!with_reserve.is_material_draw());

        assert!(!GameState::new_game().is_material_draw());
    }
}
