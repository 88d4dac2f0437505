//! Movement tables shared by move generation and attack detection.
//!
//! Offsets are `(file delta, rank delta)` written from Light's point of view
//! (forward is `+rank`). Dark uses the same tables with the rank delta negated,
//! see [`crate::move_generation::side_profile::SideProfile::orient`].

use crate::game_state::shogi_types::PieceKind;

pub type Offset = (i8, i8);

pub const ROOK_DIRECTIONS: [Offset; 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
pub const BISHOP_DIRECTIONS: [Offset; 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const KING_OFFSETS: [Offset; 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];
pub const GOLD_OFFSETS: [Offset; 6] = [(1, 0), (-1, 0), (0, -1), (0, 1), (1, 1), (-1, 1)];
pub const SILVER_OFFSETS: [Offset; 5] = [(-1, -1), (-1, 1), (0, 1), (1, 1), (1, -1)];
pub const KNIGHT_OFFSETS: [Offset; 2] = [(-1, 2), (1, 2)];
pub const PAWN_OFFSETS: [Offset; 1] = [(0, 1)];
pub const LANCE_DIRECTIONS: [Offset; 1] = [(0, 1)];

/// How a piece kind moves: rays it slides along, then single steps it jumps.
#[derive(Debug, Clone, Copy)]
pub struct PieceMovement {
    pub slides: &'static [Offset],
    pub steps: &'static [Offset],
}

const NONE: &[Offset] = &[];

pub const fn piece_movement(kind: PieceKind) -> PieceMovement {
    match kind {
        PieceKind::Pawn => PieceMovement {
            slides: NONE,
            steps: &PAWN_OFFSETS,
        },
        PieceKind::Lance => PieceMovement {
            slides: &LANCE_DIRECTIONS,
            steps: NONE,
        },
        PieceKind::Knight => PieceMovement {
            slides: NONE,
            steps: &KNIGHT_OFFSETS,
        },
        PieceKind::Silver => PieceMovement {
            slides: NONE,
            steps: &SILVER_OFFSETS,
        },
        PieceKind::Gold
        | PieceKind::ProPawn
        | PieceKind::ProLance
        | PieceKind::ProKnight
        | PieceKind::ProSilver => PieceMovement {
            slides: NONE,
            steps: &GOLD_OFFSETS,
        },
        PieceKind::Bishop => PieceMovement {
            slides: &BISHOP_DIRECTIONS,
            steps: NONE,
        },
        PieceKind::ProBishop => PieceMovement {
            slides: &BISHOP_DIRECTIONS,
            steps: &ROOK_DIRECTIONS,
        },
        PieceKind::Rook => PieceMovement {
            slides: &ROOK_DIRECTIONS,
            steps: NONE,
        },
        PieceKind::ProRook => PieceMovement {
            slides: &ROOK_DIRECTIONS,
            steps: &BISHOP_DIRECTIONS,
        },
        PieceKind::King => PieceMovement {
            slides: NONE,
            steps: &KING_OFFSETS,
        },
    }
}
