//! Game-over detection: impasse, move limit, repetition, mate and bare kings.

use std::fmt;

use crate::game_state::shogi_rules::{
    IMPASSE_WIN_POINTS, MAX_FULLMOVES, STRICT_REPETITION_THRESHOLD,
};
use crate::game_state::{game_state::GameState, shogi_types::*};
use crate::move_generation::legal_move_checks::{is_king_in_check, king_square};
use crate::move_generation::side_profile::SideProfile;
use crate::search::history::History;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    NoLegalMoves,
    Repetition,
    MoveLimit,
    Material,
    Impasse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Mate { winner: Color },
    Draw(DrawReason),
    ImpasseWin { winner: Color },
}

impl GameStatus {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Terminal class from the point of view of `color`.
    pub fn terminal_class_for(&self, color: Color) -> TerminalClass {
        match *self {
            GameStatus::Ongoing => TerminalClass::None,
            GameStatus::Draw(_) => TerminalClass::Draw,
            GameStatus::Mate { winner } | GameStatus::ImpasseWin { winner } => {
                if winner == color {
                    TerminalClass::Win
                } else {
                    TerminalClass::Loss
                }
            }
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Light => "Light",
        Color::Dark => "Dark",
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Mate { winner } => write!(f, "{} mates", color_name(*winner)),
            GameStatus::ImpasseWin { winner } => {
                write!(f, "{} wins by impasse", color_name(*winner))
            }
            GameStatus::Draw(DrawReason::NoLegalMoves) => write!(f, "draw by no legal moves"),
            GameStatus::Draw(DrawReason::Repetition) => write!(f, "draw by repetition"),
            GameStatus::Draw(DrawReason::MoveLimit) => write!(f, "draw by move limit"),
            GameStatus::Draw(DrawReason::Material) => write!(f, "draw by material"),
            GameStatus::Draw(DrawReason::Impasse) => write!(f, "draw by impasse"),
        }
    }
}

/// Status of `game_state` given its legal move count. Checks run in order:
/// impasse, move limit, repetition under `strict_threshold`, no legal moves,
/// bare kings.
pub fn classify(
    game_state: &GameState,
    legal_move_count: usize,
    history: &History,
    strict_threshold: usize,
) -> GameStatus {
    if let Some(status) = impasse_status(game_state) {
        return status;
    }

    if game_state.fullmove_number > MAX_FULLMOVES || history.is_too_long() {
        return GameStatus::Draw(DrawReason::MoveLimit);
    }

    if history.is_draw(game_state, strict_threshold) {
        return GameStatus::Draw(DrawReason::Repetition);
    }

    if legal_move_count == 0 {
        let mover = game_state.side_to_move;
        return if is_king_in_check(game_state, mover) {
            GameStatus::Mate {
                winner: mover.opposite(),
            }
        } else {
            GameStatus::Draw(DrawReason::NoLegalMoves)
        };
    }

    if game_state.is_material_draw() {
        return GameStatus::Draw(DrawReason::Material);
    }

    GameStatus::Ongoing
}

/// [`classify`] with the standard strict repetition threshold.
#[inline]
pub fn classify_default(
    game_state: &GameState,
    legal_move_count: usize,
    history: &History,
) -> GameStatus {
    classify(game_state, legal_move_count, history, STRICT_REPETITION_THRESHOLD)
}

/// Impasse result once both kings have entered the opposing camp with enough
/// support around them.
pub fn impasse_status(game_state: &GameState) -> Option<GameStatus> {
    if !impasse_reached(game_state) {
        return None;
    }

    let light = impasse_points(game_state, Color::Light);
    let dark = impasse_points(game_state, Color::Dark);
    let status = match (light >= IMPASSE_WIN_POINTS, dark >= IMPASSE_WIN_POINTS) {
        (true, false) => GameStatus::ImpasseWin {
            winner: Color::Light,
        },
        (false, true) => GameStatus::ImpasseWin {
            winner: Color::Dark,
        },
        _ => GameStatus::Draw(DrawReason::Impasse),
    };
    Some(status)
}

fn impasse_reached(game_state: &GameState) -> bool {
    [Color::Light, Color::Dark].into_iter().all(|color| {
        let Some(king) = king_square(game_state, color) else {
            return false;
        };
        SideProfile::for_color(color).in_promotion_zone(king) && king_is_supported(game_state, color, king)
    })
}

// More than five own pieces (king included) within distance two.
fn king_is_supported(game_state: &GameState, color: Color, king: Square) -> bool {
    let nearby = (0..NUM_SQUARES as Square)
        .filter(|&sq| square_distance(sq, king) <= 2)
        .filter(|&sq| matches!(game_state.piece_at(sq), Some((owner, _)) if owner == color))
        .count();
    nearby > 5
}

/// Impasse points on the board: 5 per unpromoted rook or bishop, 1 per other
/// non-king piece.
pub fn impasse_points(game_state: &GameState, color: Color) -> u32 {
    game_state
        .cells
        .iter()
        .filter_map(|&cell| decode_cell(cell))
        .filter(|&(owner, _)| owner == color)
        .map(|(_, kind)| match kind {
            PieceKind::Rook | PieceKind::Bishop => 5,
            PieceKind::King => 0,
            _ => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::search::zobrist::ZobristTables;

    fn empty_history() -> History {
        History::new(Arc::new(ZobristTables::standard().clone()))
    }

    fn status_of(text: &str) -> GameStatus {
        let game = GameState::from_position_str(text).expect("position should parse");
        let count = FastLegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed")
            .len();
        classify_default(&game, count, &empty_history())
    }

    #[test]
    fn start_position_is_ongoing() {
        let game = GameState::new_game();
        assert_eq!(classify_default(&game, 30, &empty_history()), GameStatus::Ongoing);
    }

    #[test]
    fn checkmate_awards_the_other_side() {
        let status = status_of("9/9/9/9/9/9/4K4/5R3/R5k2[-] b 0 1");
        assert_eq!(status, GameStatus::Mate { winner: Color::Light });
        assert!(status.is_over());
    }

    #[test]
    fn bare_kings_are_a_material_draw() {
        assert_eq!(status_of("k8/9/9/9/9/9/9/9/K8[-] w 0 1"), GameStatus::Draw(DrawReason::Material));
        assert_eq!(status_of("k8/9/9/9/9/9/9/9/K8[P] w 0 1"), GameStatus::Ongoing);
        assert_eq!(status_of("4k4/9/4K4/9/9/9/9/9/9[G] w 0 1"), GameStatus::Ongoing);
    }

    #[test]
    fn move_limit_ends_the_game() {
        assert_eq!(
            status_of("k8/9/9/9/9/9/9/9/K8[-] w 0 451"),
            GameStatus::Draw(DrawReason::MoveLimit)
        );
    }

    #[test]
    fn repetition_uses_strict_threshold() {
        let game = GameState::new_game();
        let mut history = empty_history();
        for _ in 0..3 {
            history.record(&game);
        }
        assert_eq!(classify_default(&game, 30, &history), GameStatus::Draw(DrawReason::Repetition));
        assert_eq!(classify(&game, 30, &history, 4), GameStatus::Ongoing);
    }

    #[test]
    fn impasse_with_weak_sides_is_a_draw() {
        let text = "GGKGG4/RBSS5/9/9/9/9/9/ggg6/kgg6[-] w 0 1";
        let game = GameState::from_position_str(text).expect("position should parse");
        assert_eq!(impasse_points(&game, Color::Light), 16);
        assert_eq!(impasse_points(&game, Color::Dark), 5);
        assert_eq!(impasse_status(&game), Some(GameStatus::Draw(DrawReason::Impasse)));
    }

    #[test]
    fn impasse_with_enough_points_wins() {
        let text = "LNSGKGSNL/1R5B1/PPPPPP3/9/9/9/9/ggg6/kgg6[-] w 0 1";
        let game = GameState::from_position_str(text).expect("position should parse");
        assert_eq!(impasse_points(&game, Color::Light), 24);
        let status = impasse_status(&game);
        assert_eq!(status, Some(GameStatus::ImpasseWin { winner: Color::Light }));
        assert_eq!(
            GameStatus::ImpasseWin { winner: Color::Light }.terminal_class_for(Color::Dark),
            TerminalClass::Loss
        );
    }

    #[test]
    fn kings_outside_the_camp_are_not_impasse() {
        assert_eq!(impasse_status(&GameState::new_game()), None);
    }
}
