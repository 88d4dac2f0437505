//! Pluggable board evaluation.
//!
//! Scores are Light-positive in all implementations: a rollout leaf adds the
//! same number no matter which side is to move there.

use crate::game_state::{game_state::GameState, shogi_types::*};

pub trait BoardScorer: Send + Sync {
    /// Light-positive static score.
    fn score(&self, game_state: &GameState) -> f64;
}

/// Factor applied to raw material at rollout leaves.
pub const MATERIAL_SCALE: f64 = 0.01;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    /// Value of a piece standing on the board.
    #[inline]
    pub const fn board_value(kind: PieceKind) -> f64 {
        match kind {
            PieceKind::Pawn => 1.0,
            PieceKind::ProPawn => 4.2,
            PieceKind::Lance => 4.3,
            PieceKind::ProLance => 6.3,
            PieceKind::Knight => 4.5,
            PieceKind::ProKnight => 6.4,
            PieceKind::Silver => 6.4,
            PieceKind::ProSilver => 6.7,
            PieceKind::Gold => 6.9,
            PieceKind::Bishop => 8.9,
            PieceKind::ProBishop => 11.5,
            PieceKind::Rook => 10.4,
            PieceKind::ProRook => 13.0,
            PieceKind::King => 0.0,
        }
    }

    /// Value of a piece held in reserve.
    #[inline]
    pub const fn reserve_value(kind: PieceKind) -> f64 {
        match kind {
            PieceKind::Pawn => 1.15,
            PieceKind::Lance => 4.8,
            PieceKind::Knight => 5.1,
            PieceKind::Silver => 7.2,
            PieceKind::Gold => 7.8,
            PieceKind::Bishop => 11.1,
            PieceKind::Rook => 10.4,
            _ => 0.0,
        }
    }

    /// Raw Light-minus-Dark material over board and reserves.
    pub fn material(game_state: &GameState) -> f64 {
        let mut score = 0.0;

        for &cell in &game_state.cells {
            if let Some((color, kind)) = decode_cell(cell) {
                score += f64::from(color.sign()) * Self::board_value(kind);
            }
        }

        for color in [Color::Light, Color::Dark] {
            let held: f64 = game_state
                .reserve(color)
                .iter()
                .map(|&kind| Self::reserve_value(kind))
                .sum();
            score += f64::from(color.sign()) * held;
        }

        score
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> f64 {
        MATERIAL_SCALE * Self::material(game_state)
    }
}
