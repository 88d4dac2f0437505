//! Per-side geometry for move generation.
//!
//! Both colors share one generator. `SideProfile` carries everything that
//! differs between them: which way is forward and where the promotion and
//! dead-end ranks are, expressed as relative ranks (0 = own home rank).

use crate::game_state::shogi_rules::PROMOTION_ZONE_DEPTH;
use crate::game_state::shogi_types::*;
use crate::moves::piece_movement::Offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideProfile {
    pub color: Color,
    /// Rank delta of one step forward.
    pub forward: i8,
    /// First relative rank of the promotion zone.
    pub promotion_zone_start: u8,
    /// Relative rank from which pawns and lances have no further move.
    pub last_rank: u8,
    /// First relative rank from which knights have no further move.
    pub knight_dead_start: u8,
}

impl SideProfile {
    pub const LIGHT: SideProfile = SideProfile::new(Color::Light);
    pub const DARK: SideProfile = SideProfile::new(Color::Dark);

    const fn new(color: Color) -> Self {
        Self {
            color,
            forward: color.sign(),
            promotion_zone_start: BOARD_HEIGHT - PROMOTION_ZONE_DEPTH,
            last_rank: BOARD_HEIGHT - 1,
            knight_dead_start: BOARD_HEIGHT - 2,
        }
    }

    #[inline]
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::Light => Self::LIGHT,
            Color::Dark => Self::DARK,
        }
    }

    /// Rank counted from this side's home rank.
    #[inline]
    pub const fn relative_rank(&self, square: Square) -> u8 {
        match self.color {
            Color::Light => square_rank(square),
            Color::Dark => BOARD_HEIGHT - 1 - square_rank(square),
        }
    }

    /// Turn a Light-oriented table offset into this side's orientation.
    #[inline]
    pub const fn orient(&self, offset: Offset) -> Offset {
        (offset.0, offset.1 * self.forward)
    }

    #[inline]
    pub const fn step(&self, square: Square, offset: Offset) -> Option<Square> {
        let (dx, dy) = self.orient(offset);
        offset_square(square, dx, dy)
    }

    /// Square directly in front of `square`.
    #[inline]
    pub const fn forward_square(&self, square: Square) -> Option<Square> {
        offset_square(square, 0, self.forward)
    }

    #[inline]
    pub const fn in_promotion_zone(&self, square: Square) -> bool {
        self.relative_rank(square) >= self.promotion_zone_start
    }

    /// True if a piece of `kind` standing on `square` could never move again.
    /// Such placements are forced promotions for board moves and illegal drops.
    pub const fn is_dead_end(&self, kind: PieceKind, square: Square) -> bool {
        let rank = self.relative_rank(square);
        match kind {
            PieceKind::Pawn | PieceKind::Lance => rank >= self.last_rank,
            PieceKind::Knight => rank >= self.knight_dead_start,
            _ => false,
        }
    }
}
