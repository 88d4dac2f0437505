//! Primitive shogi types: colors, piece kinds, squares and signed cell codes.
//!
//! Board cells are stored as signed small integers: the magnitude is the piece
//! code (`1..=14`), the sign is the owner (positive for Light, negative for
//! Dark) and zero marks an empty square.

pub use crate::game_state::game_state::GameState;

pub const BOARD_WIDTH: u8 = 9;
pub const BOARD_HEIGHT: u8 = 9;
pub const NUM_SQUARES: usize = 81;

/// Board square index (`0..81`), `file + 9 * rank`. Rank 0 is Light's home rank.
pub type Square = u8;

/// Side to move. Light is written `w` and uppercase, Dark `b` and lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Sign applied to piece codes in `GameState::cells`.
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    ProPawn,
    Lance,
    ProLance,
    Knight,
    ProKnight,
    Silver,
    ProSilver,
    Gold,
    Bishop,
    ProBishop,
    Rook,
    ProRook,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 14] = [
    PieceKind::Pawn,
    PieceKind::ProPawn,
    PieceKind::Lance,
    PieceKind::ProLance,
    PieceKind::Knight,
    PieceKind::ProKnight,
    PieceKind::Silver,
    PieceKind::ProSilver,
    PieceKind::Gold,
    PieceKind::Bishop,
    PieceKind::ProBishop,
    PieceKind::Rook,
    PieceKind::ProRook,
    PieceKind::King,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        self.code() as usize - 1
    }

    /// Unsigned cell code, `1..=14`.
    #[inline]
    pub const fn code(self) -> i8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::ProPawn => 2,
            PieceKind::Lance => 3,
            PieceKind::ProLance => 4,
            PieceKind::Knight => 5,
            PieceKind::ProKnight => 6,
            PieceKind::Silver => 7,
            PieceKind::ProSilver => 8,
            PieceKind::Gold => 9,
            PieceKind::Bishop => 10,
            PieceKind::ProBishop => 11,
            PieceKind::Rook => 12,
            PieceKind::ProRook => 13,
            PieceKind::King => 14,
        }
    }

    #[inline]
    pub const fn from_code(code: i8) -> Option<Self> {
        if code < 1 || code > 14 {
            return None;
        }
        Some(ALL_PIECE_KINDS[code as usize - 1])
    }

    /// Promoted form, if this kind can promote.
    #[inline]
    pub const fn promote(self) -> Option<Self> {
        match self {
            PieceKind::Pawn => Some(PieceKind::ProPawn),
            PieceKind::Lance => Some(PieceKind::ProLance),
            PieceKind::Knight => Some(PieceKind::ProKnight),
            PieceKind::Silver => Some(PieceKind::ProSilver),
            PieceKind::Bishop => Some(PieceKind::ProBishop),
            PieceKind::Rook => Some(PieceKind::ProRook),
            _ => None,
        }
    }

    /// Unpromoted form; the kind a captured piece takes in the reserve.
    #[inline]
    pub const fn demote(self) -> Self {
        match self {
            PieceKind::ProPawn => PieceKind::Pawn,
            PieceKind::ProLance => PieceKind::Lance,
            PieceKind::ProKnight => PieceKind::Knight,
            PieceKind::ProSilver => PieceKind::Silver,
            PieceKind::ProBishop => PieceKind::Bishop,
            PieceKind::ProRook => PieceKind::Rook,
            other => other,
        }
    }

    #[inline]
    pub const fn is_promotable(self) -> bool {
        self.promote().is_some()
    }

    #[inline]
    pub const fn is_promoted(self) -> bool {
        matches!(
            self,
            PieceKind::ProPawn
                | PieceKind::ProLance
                | PieceKind::ProKnight
                | PieceKind::ProSilver
                | PieceKind::ProBishop
                | PieceKind::ProRook
        )
    }

    /// True for kinds that may sit in a reserve.
    #[inline]
    pub const fn is_reserve_kind(self) -> bool {
        !self.is_promoted() && !matches!(self, PieceKind::King)
    }

    /// Uppercase letter of the unpromoted kind (`P`, `L`, `N`, `S`, `G`, `B`, `R`, `K`).
    pub const fn letter(self) -> char {
        match self.demote() {
            PieceKind::Pawn => 'P',
            PieceKind::Lance => 'L',
            PieceKind::Knight => 'N',
            PieceKind::Silver => 'S',
            PieceKind::Gold => 'G',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            _ => 'K',
        }
    }

    /// Inverse of [`PieceKind::letter`], case-insensitive, unpromoted kinds only.
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'L' => Some(PieceKind::Lance),
            'N' => Some(PieceKind::Knight),
            'S' => Some(PieceKind::Silver),
            'G' => Some(PieceKind::Gold),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Signed cell code for a piece of `color`.
#[inline]
pub const fn cell_code(color: Color, kind: PieceKind) -> i8 {
    color.sign() * kind.code()
}

/// Decode a signed cell value. Returns `None` for empty or out-of-range cells.
#[inline]
pub const fn decode_cell(cell: i8) -> Option<(Color, PieceKind)> {
    let color = if cell > 0 {
        Color::Light
    } else if cell < 0 {
        Color::Dark
    } else {
        return None;
    };
    match PieceKind::from_code(cell.wrapping_abs()) {
        Some(kind) => Some((color, kind)),
        None => None,
    }
}

#[inline]
pub const fn make_square(file: u8, rank: u8) -> Square {
    file + BOARD_WIDTH * rank
}

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % BOARD_WIDTH
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / BOARD_WIDTH
}

/// Step `square` by `(dx, dy)`, returning `None` off the board.
#[inline]
pub const fn offset_square(square: Square, dx: i8, dy: i8) -> Option<Square> {
    let file = square_file(square) as i8 + dx;
    let rank = square_rank(square) as i8 + dy;
    if file < 0 || file >= BOARD_WIDTH as i8 || rank < 0 || rank >= BOARD_HEIGHT as i8 {
        return None;
    }
    Some(make_square(file as u8, rank as u8))
}

/// Chebyshev distance between two squares.
#[inline]
pub fn square_distance(a: Square, b: Square) -> u8 {
    let df = square_file(a).abs_diff(square_file(b));
    let dr = square_rank(a).abs_diff(square_rank(b));
    df.max(dr)
}

/// Outcome class attached to a position by the game-status layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalClass {
    #[default]
    None,
    Draw,
    Win,
    Loss,
}
