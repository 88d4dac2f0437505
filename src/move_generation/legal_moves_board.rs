use crate::game_state::{game_state::GameState, shogi_types::*};
use crate::move_generation::side_profile::SideProfile;
use crate::moves::move_descriptions::{MoveDescription, PromotionState};
use crate::moves::piece_movement::piece_movement;

/// Pseudo-legal board moves for `profile.color`, squares ascending, destinations
/// in movement-table order (slides first, then steps).
pub fn generate_board_moves(
    game_state: &GameState,
    profile: &SideProfile,
    out: &mut Vec<MoveDescription>,
) {
    for from in 0..NUM_SQUARES as Square {
        let Some((color, kind)) = game_state.piece_at(from) else {
            continue;
        };
        if color != profile.color {
            continue;
        }

        let movement = piece_movement(kind);

        for &direction in movement.slides {
            let mut square = from;
            while let Some(to) = profile.step(square, direction) {
                match game_state.piece_at(to) {
                    None => push_with_promotion(profile, kind, from, to, out),
                    Some((target_color, _)) => {
                        if target_color != profile.color {
                            push_with_promotion(profile, kind, from, to, out);
                        }
                        break;
                    }
                }
                square = to;
            }
        }

        for &offset in movement.steps {
            let Some(to) = profile.step(from, offset) else {
                continue;
            };
            if matches!(game_state.piece_at(to), Some((target_color, _)) if target_color == profile.color)
            {
                continue;
            }
            push_with_promotion(profile, kind, from, to, out);
        }
    }
}

fn push_with_promotion(
    profile: &SideProfile,
    kind: PieceKind,
    from: Square,
    to: Square,
    out: &mut Vec<MoveDescription>,
) {
    if !kind.is_promotable() {
        out.push(MoveDescription::board_move(from, to, PromotionState::None));
        return;
    }

    if profile.is_dead_end(kind, to) {
        out.push(MoveDescription::board_move(from, to, PromotionState::Promoted));
        return;
    }

    if profile.in_promotion_zone(from) || profile.in_promotion_zone(to) {
        out.push(MoveDescription::board_move(from, to, PromotionState::Declined));
        out.push(MoveDescription::board_move(from, to, PromotionState::Promoted));
    } else {
        out.push(MoveDescription::board_move(from, to, PromotionState::None));
    }
}
