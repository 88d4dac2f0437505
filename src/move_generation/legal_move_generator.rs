//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal board moves and drops for the side to move, applies
//! each candidate, drops outcomes that leave the mover's king attacked or
//! mate with a dropped pawn, and optionally annotates the survivors.

use crate::game_state::game_state::GameState;
use crate::game_state::shogi_types::PieceKind;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::legal_moves_board::generate_board_moves;
use crate::move_generation::legal_moves_drops::{generate_drop_moves, is_pawn_drop_mate};
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerationError, MoveGenerator,
};
use crate::move_generation::side_profile::SideProfile;
use crate::moves::move_descriptions::MoveDescription;

pub struct LegalMoveGenerator;
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_legal_moves_internal(game_state, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_legal_moves_internal(game_state, false)
    }
}

fn generate_legal_moves_internal(
    game_state: &GameState,
    annotate: bool,
) -> MoveGenResult<Vec<GeneratedMove>> {
    let mover = game_state.side_to_move;
    if king_square(game_state, mover).is_none() {
        return Err(MoveGenerationError::InvalidState(format!(
            "{mover:?} has no king on the board"
        )));
    }

    let profile = SideProfile::for_color(mover);
    let mut pseudo = Vec::<MoveDescription>::with_capacity(128);
    generate_board_moves(game_state, &profile, &mut pseudo);
    generate_drop_moves(game_state, &profile, &mut pseudo);

    let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
    for mv in pseudo {
        let next = apply_move(game_state, &mv)?;

        // Illegal if own king is in check after move.
        if is_king_in_check(&next, mover) {
            continue;
        }

        if mv.drop == Some(PieceKind::Pawn) && is_pawn_drop_mate(&next, mv.to, &profile) {
            continue;
        }

        let annotations = if annotate {
            MoveAnnotations {
                gives_check: is_king_in_check(&next, next.side_to_move),
                is_capture: !mv.is_drop() && !game_state.is_empty(mv.to),
                is_drop: mv.is_drop(),
                is_promotion: mv.is_promotion(),
            }
        } else {
            MoveAnnotations::default()
        };

        legal.push(GeneratedMove {
            move_description: mv,
            game_after_move: next,
            annotations,
        });
    }

    Ok(legal)
}

#[cfg(test)]
mod tests {
    use super::{FastLegalMoveGenerator, LegalMoveGenerator};
    use crate::game_state::game_state::GameState;
    use crate::game_state::shogi_types::{make_square, Color, PieceKind};
    use crate::move_generation::legal_move_checks::is_king_in_check;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::moves::move_descriptions::MoveDescription;

    #[test]
    fn fast_generator_matches_legal_move_count_on_startpos() {
        let game = GameState::new_game();
        let annotated = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("annotated move generation should succeed");
        let fast = FastLegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("fast move generation should succeed");
        assert_eq!(annotated.len(), fast.len());
        assert_eq!(fast.len(), 30);
    }

    #[test]
    fn no_generated_move_leaves_own_king_attacked() {
        let game = GameState::from_position_str("4k4/9/9/9/4r4/9/9/9/4K4[Gb] w 0 1")
            .expect("position should parse");
        let moves = FastLegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        assert!(!moves.is_empty());
        for generated in &moves {
            assert!(!is_king_in_check(&generated.game_after_move, Color::Light));
        }
        // Only king steps off the file or interpositions on the file survive.
        assert!(moves.iter().all(|generated| {
            let mv = generated.move_description;
            mv.from == Some(make_square(4, 0)) || mv.drop == Some(PieceKind::Gold)
        }));
    }

    #[test]
    fn drop_pawn_mate_is_filtered_but_other_drops_remain() {
        let game = GameState::from_position_str("kn7/1p7/G8/9/9/9/9/9/K8[P] w 0 1")
            .expect("position should parse");
        let moves = FastLegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        let mating_drop = MoveDescription::drop_move(PieceKind::Pawn, make_square(0, 7));
        assert!(!moves.iter().any(|generated| generated.move_description == mating_drop));
        assert!(moves
            .iter()
            .any(|generated| generated.move_description.drop == Some(PieceKind::Pawn)));
    }

    #[test]
    fn annotations_flag_checks_and_drops() {
        let game = GameState::from_position_str("4k4/9/9/9/9/9/9/9/4K4[G] w 0 1")
            .expect("position should parse");
        let moves = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed");
        let check_drop = moves
            .iter()
            .find(|generated| {
                generated.move_description == MoveDescription::drop_move(PieceKind::Gold, make_square(4, 7))
            })
            .expect("gold drop in front of the king should be legal");
        assert!(check_drop.annotations.gives_check);
        assert!(check_drop.annotations.is_drop);
        assert!(!check_drop.annotations.is_capture);
    }

    #[test]
    fn missing_king_is_an_invariant_error() {
        let game = GameState::new_empty();
        assert!(FastLegalMoveGenerator.generate_legal_moves(&game).is_err());
    }
}
