//! Attack detection.
//!
//! Answers "does `attacker` reach `target`?" by scanning every square of the
//! board and replaying each attacker piece's movement pattern with the same
//! tables the generator uses. No side effects; works on any hypothetical state.

use crate::game_state::{game_state::GameState, shogi_types::*};
use crate::move_generation::side_profile::SideProfile;
use crate::moves::piece_movement::piece_movement;

/// Cached king square, validated against the board. Falls back to a scan if the
/// cache is stale and returns `None` if the king is missing altogether.
#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let cached = game_state.king_square(color);
    if game_state.cells[cached as usize] == cell_code(color, PieceKind::King) {
        Some(cached)
    } else {
        game_state.find_king(color)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite(), true)
}

/// True if any piece of `attacker_color` attacks `target`. With
/// `include_king == false` the attacker's king is ignored.
pub fn is_square_attacked(
    game_state: &GameState,
    target: Square,
    attacker_color: Color,
    include_king: bool,
) -> bool {
    let profile = SideProfile::for_color(attacker_color);

    for from in 0..NUM_SQUARES as Square {
        let Some((color, kind)) = game_state.piece_at(from) else {
            continue;
        };
        if color != attacker_color || (!include_king && kind == PieceKind::King) {
            continue;
        }
        if piece_attacks_square(game_state, &profile, from, kind, target) {
            return true;
        }
    }

    false
}

/// Every `(square, kind)` of `attacker_color` that attacks `target`, king included.
pub fn attackers_to_square(
    game_state: &GameState,
    target: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let profile = SideProfile::for_color(attacker_color);
    let mut attackers = Vec::<(Square, PieceKind)>::new();

    for from in 0..NUM_SQUARES as Square {
        if let Some((color, kind)) = game_state.piece_at(from) {
            if color == attacker_color
                && piece_attacks_square(game_state, &profile, from, kind, target)
            {
                attackers.push((from, kind));
            }
        }
    }

    attackers
}

fn piece_attacks_square(
    game_state: &GameState,
    profile: &SideProfile,
    from: Square,
    kind: PieceKind,
    target: Square,
) -> bool {
    let movement = piece_movement(kind);

    for &offset in movement.steps {
        if profile.step(from, offset) == Some(target) {
            return true;
        }
    }

    for &direction in movement.slides {
        let mut square = from;
        while let Some(next) = profile.step(square, direction) {
            if next == target {
                return true;
            }
            if !game_state.is_empty(next) {
                break;
            }
            square = next;
        }
    }

    false
}
