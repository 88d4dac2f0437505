//! Drop generation and the drop-pawn-mate restriction.

use crate::game_state::{game_state::GameState, shogi_types::*};
use crate::move_generation::legal_move_checks::{attackers_to_square, is_square_attacked};
use crate::move_generation::side_profile::SideProfile;
use crate::moves::move_descriptions::MoveDescription;
use crate::moves::piece_movement::KING_OFFSETS;

/// Pseudo-legal drops for `profile.color`. Distinct reserve kinds are visited in
/// first-occurrence order, target squares ascending. The drop-pawn-mate rule
/// needs the post-drop board and is applied by the legal generator.
pub fn generate_drop_moves(
    game_state: &GameState,
    profile: &SideProfile,
    out: &mut Vec<MoveDescription>,
) {
    let reserve = game_state.reserve(profile.color);
    let mut seen = [false; ALL_PIECE_KINDS.len()];

    for &kind in reserve {
        if seen[kind.index()] {
            continue;
        }
        seen[kind.index()] = true;

        let pawn_files = if kind == PieceKind::Pawn {
            files_with_pawn(game_state, profile.color)
        } else {
            [false; BOARD_WIDTH as usize]
        };

        for to in 0..NUM_SQUARES as Square {
            if !game_state.is_empty(to) || profile.is_dead_end(kind, to) {
                continue;
            }
            if pawn_files[square_file(to) as usize] {
                continue;
            }
            out.push(MoveDescription::drop_move(kind, to));
        }
    }
}

fn files_with_pawn(game_state: &GameState, color: Color) -> [bool; BOARD_WIDTH as usize] {
    let pawn = cell_code(color, PieceKind::Pawn);
    let mut files = [false; BOARD_WIDTH as usize];
    for (square, &cell) in game_state.cells.iter().enumerate() {
        if cell == pawn {
            files[square_file(square as Square) as usize] = true;
        }
    }
    files
}

/// True if the pawn just dropped on `to` (already on `next`'s board) mates.
///
/// Evaluated on the post-drop position: the enemy king must stand directly in
/// front of the pawn, no enemy piece other than the king may attack the pawn,
/// and every square around the king must be off-board, held by the king's own
/// pieces or attacked by the dropping side (its king ignored). Pins on the
/// defenders and lines opened by the king stepping away are not modelled.
pub fn is_pawn_drop_mate(next: &GameState, to: Square, profile: &SideProfile) -> bool {
    let defender = profile.color.opposite();

    let Some(front) = profile.forward_square(to) else {
        return false;
    };
    if next.piece_at(front) != Some((defender, PieceKind::King)) {
        return false;
    }

    let pawn_defended = attackers_to_square(next, to, defender)
        .iter()
        .any(|&(_, kind)| kind != PieceKind::King);
    if pawn_defended {
        return false;
    }

    for (dx, dy) in KING_OFFSETS {
        let Some(escape) = offset_square(front, dx, dy) else {
            continue;
        };
        if matches!(next.piece_at(escape), Some((color, _)) if color == defender) {
            continue;
        }
        if !is_square_attacked(next, escape, profile.color, false) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::apply_drop;

    fn drops_for(text: &str) -> (GameState, Vec<MoveDescription>) {
        let game = GameState::from_position_str(text).expect("position should parse");
        let mut out = Vec::new();
        generate_drop_moves(&game, &SideProfile::for_color(game.side_to_move), &mut out);
        (game, out)
    }

    #[test]
    fn nifu_excludes_files_with_own_unpromoted_pawn() {
        let (_, drops) = drops_for("k8/9/9/9/9/9/4P4/9/K8[P] w 0 1");
        assert!(drops.iter().all(|mv| square_file(mv.to) != 4));

        let (_, tokin) = drops_for("k8/9/9/9/9/9/4+P4/9/K8[P] w 0 1");
        assert!(tokin.iter().any(|mv| square_file(mv.to) == 4));
    }

    #[test]
    fn duplicate_reserve_kinds_are_generated_once() {
        let (game, drops) = drops_for("k8/9/9/9/9/9/9/9/K8[PPPl] w 0 1");
        let empty_below_last_rank = (0..72u8).filter(|&sq| game.is_empty(sq)).count();
        assert_eq!(drops.len(), empty_below_last_rank);
    }

    #[test]
    fn knight_and_lance_avoid_dead_ranks_for_dark() {
        let (_, drops) = drops_for("k8/9/9/9/9/9/9/9/K8[nl] b 0 1");
        let relative = |sq: Square| SideProfile::DARK.relative_rank(sq);
        assert!(drops
            .iter()
            .filter(|mv| mv.drop == Some(PieceKind::Knight))
            .all(|mv| relative(mv.to) < 7));
        assert!(drops
            .iter()
            .filter(|mv| mv.drop == Some(PieceKind::Lance))
            .all(|mv| relative(mv.to) < 8));
        assert_eq!(drops.first().map(|mv| mv.drop), Some(Some(PieceKind::Knight)));
    }

    #[test]
    fn supported_pawn_drop_in_front_of_boxed_king_is_mate() {
        // Knight and pawn box the king in, the gold guards the dropped pawn.
        let game = GameState::from_position_str("kn7/1p7/G8/9/9/9/9/9/K8[P] w 0 1")
            .expect("position should parse");
        let to = make_square(0, 7);
        let next = apply_drop(&game, PieceKind::Pawn, to).expect("drop should apply");
        assert!(is_pawn_drop_mate(&next, to, &SideProfile::LIGHT));
    }

    #[test]
    fn unsupported_pawn_drop_is_not_mate() {
        let game = GameState::from_position_str("kn7/1p7/9/9/9/9/9/9/K8[P] w 0 1")
            .expect("position should parse");
        let to = make_square(0, 7);
        let next = apply_drop(&game, PieceKind::Pawn, to).expect("drop should apply");
        assert!(!is_pawn_drop_mate(&next, to, &SideProfile::LIGHT));
    }
}
