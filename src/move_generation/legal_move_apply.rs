//! Builds successor positions.
//!
//! Every function here clones the parent state and returns the new one; the
//! parent is never touched. Invariant violations (no piece to move, capturing
//! a king, dropping a piece that is not in the reserve) are reported as
//! `InvalidState` so callers abort instead of carrying a corrupt position.

use crate::game_state::{game_state::GameState, shogi_types::*};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::{MoveDescription, PromotionState};

pub fn apply_move(
    game_state: &GameState,
    move_description: &MoveDescription,
) -> MoveGenResult<GameState> {
    match (move_description.from, move_description.drop) {
        (Some(from), None) => apply_board_move(
            game_state,
            from,
            move_description.to,
            move_description.promotion,
        ),
        (None, Some(kind)) => apply_drop(game_state, kind, move_description.to),
        _ => Err(MoveGenerationError::InvalidState(format!(
            "malformed move description {move_description:?}"
        ))),
    }
}

pub fn apply_board_move(
    game_state: &GameState,
    from: Square,
    to: Square,
    promotion: PromotionState,
) -> MoveGenResult<GameState> {
    let moving_color = game_state.side_to_move;

    let moved_piece = match game_state.piece_at(from) {
        Some((color, kind)) if color == moving_color => kind,
        Some(_) => {
            return Err(MoveGenerationError::InvalidState(format!(
                "piece on {from} does not belong to side to move"
            )))
        }
        None => {
            return Err(MoveGenerationError::InvalidState(format!(
                "no piece on from-square {from}"
            )))
        }
    };

    let placed_piece = if promotion == PromotionState::Promoted {
        moved_piece.promote().ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("{moved_piece:?} cannot promote"))
        })?
    } else {
        moved_piece
    };

    let mut next = game_state.clone();

    // Handle captures.
    if let Some((captured_color, captured)) = game_state.piece_at(to) {
        if captured_color == moving_color {
            return Err(MoveGenerationError::InvalidState(format!(
                "move onto own piece at {to}"
            )));
        }
        if captured == PieceKind::King {
            return Err(MoveGenerationError::InvalidState(
                "king capture generated".to_owned(),
            ));
        }
        next.reserves[moving_color.index()].push(captured.demote());
    }

    next.cells[from as usize] = 0;
    next.cells[to as usize] = cell_code(moving_color, placed_piece);

    if moved_piece == PieceKind::King {
        next.king_squares[moving_color.index()] = to;
    }

    if matches!(
        placed_piece,
        PieceKind::Pawn | PieceKind::Lance | PieceKind::Knight
    ) {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }

    finish_move(
        &mut next,
        MoveDescription::board_move(from, to, promotion),
    );
    Ok(next)
}

pub fn apply_drop(game_state: &GameState, kind: PieceKind, to: Square) -> MoveGenResult<GameState> {
    let moving_color = game_state.side_to_move;

    if !game_state.is_empty(to) {
        return Err(MoveGenerationError::InvalidState(format!(
            "drop target {to} is occupied"
        )));
    }

    let mut next = game_state.clone();
    let reserve = &mut next.reserves[moving_color.index()];
    let slot = reserve.iter().position(|&held| held == kind).ok_or_else(|| {
        MoveGenerationError::InvalidState(format!("{kind:?} is not in the reserve"))
    })?;
    reserve.remove(slot);

    next.cells[to as usize] = cell_code(moving_color, kind);
    next.halfmove_clock = next.halfmove_clock.saturating_add(1);

    finish_move(&mut next, MoveDescription::drop_move(kind, to));
    Ok(next)
}

fn finish_move(next: &mut GameState, move_description: MoveDescription) {
    if next.side_to_move == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.side_to_move = next.side_to_move.opposite();
    next.last_move = Some(move_description);
    next.terminal_class = TerminalClass::None;
    // Stale until the next `refresh_hash`.
    next.zobrist_key = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(file: u8, rank: u8) -> Square {
        make_square(file, rank)
    }

    #[test]
    fn capture_demotes_into_reserve() {
        let game = GameState::from_position_str("k8/9/9/9/9/4+r4/4P4/9/K8[-] w 0 1")
            .expect("position should parse");
        let next = apply_board_move(&game, sq(4, 2), sq(4, 3), PromotionState::None)
            .expect("capture should apply");
        assert_eq!(next.reserve(Color::Light), &[PieceKind::Rook]);
        assert_eq!(next.piece_at(sq(4, 3)), Some((Color::Light, PieceKind::Pawn)));
        assert!(next.is_empty(sq(4, 2)));
        assert_eq!(next.side_to_move, Color::Dark);
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
        // Parent untouched.
        assert_eq!(game.piece_at(sq(4, 3)), Some((Color::Dark, PieceKind::ProRook)));
    }

    #[test]
    fn drop_consumes_one_reserve_instance() {
        let game = GameState::from_position_str("k8/9/9/9/9/9/9/9/K8[PPg] b 3 7")
            .expect("position should parse");
        let next = apply_drop(&game, PieceKind::Gold, sq(4, 4)).expect("drop should apply");
        assert_eq!(next.reserve(Color::Dark), &[] as &[PieceKind]);
        assert_eq!(next.reserve(Color::Light), &[PieceKind::Pawn, PieceKind::Pawn]);
        assert_eq!(next.piece_at(sq(4, 4)), Some((Color::Dark, PieceKind::Gold)));
        assert_eq!(next.fullmove_number, 8);
        assert_eq!(next.halfmove_clock, 4);
        assert_eq!(next.last_move, Some(MoveDescription::drop_move(PieceKind::Gold, sq(4, 4))));
    }

    #[test]
    fn king_moves_update_cache_and_promotion_applies() {
        let game = GameState::from_position_str("k8/9/2S6/9/9/9/9/9/K8[-] w 0 1")
            .expect("position should parse");
        let promoted = apply_board_move(&game, sq(2, 6), sq(2, 7), PromotionState::Promoted)
            .expect("promotion should apply");
        assert_eq!(promoted.piece_at(sq(2, 7)), Some((Color::Light, PieceKind::ProSilver)));

        let king_step = apply_board_move(&game, sq(0, 0), sq(1, 1), PromotionState::None)
            .expect("king move should apply");
        assert_eq!(king_step.king_square(Color::Light), sq(1, 1));
        assert!(king_step.kings_are_consistent());
    }

    #[test]
    fn invariant_violations_are_errors() {
        let game = GameState::from_position_str("k8/K8/9/9/9/9/9/9/9[-] w 0 1")
            .expect("position should parse");
        assert!(apply_board_move(&game, sq(0, 7), sq(0, 8), PromotionState::None).is_err());
        assert!(apply_board_move(&game, sq(4, 4), sq(4, 5), PromotionState::None).is_err());
        assert!(apply_drop(&game, PieceKind::Pawn, sq(4, 4)).is_err());
        assert!(apply_board_move(&game, sq(0, 7), sq(1, 7), PromotionState::Promoted).is_err());
    }
}
