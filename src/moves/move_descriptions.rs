//! Move descriptor used to build successor positions and to render notation.

use crate::game_state::shogi_types::{PieceKind, Square};

/// Promotion decision attached to a board move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PromotionState {
    /// The move never offered a promotion choice.
    #[default]
    None,
    /// Promotion was available and declined (`=`).
    Declined,
    /// The piece promoted on arrival (`+`).
    Promoted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveDescription {
    /// Origin square, `None` for drops.
    pub from: Option<Square>,
    pub to: Square,
    /// Dropped piece kind, `None` for board moves.
    pub drop: Option<PieceKind>,
    pub promotion: PromotionState,
}

impl MoveDescription {
    #[inline]
    pub const fn board_move(from: Square, to: Square, promotion: PromotionState) -> Self {
        Self {
            from: Some(from),
            to,
            drop: None,
            promotion,
        }
    }

    #[inline]
    pub const fn drop_move(kind: PieceKind, to: Square) -> Self {
        Self {
            from: None,
            to,
            drop: Some(kind),
            promotion: PromotionState::None,
        }
    }

    #[inline]
    pub const fn is_drop(&self) -> bool {
        self.drop.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion == PromotionState::Promoted
    }
}
