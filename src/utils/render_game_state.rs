//! Terminal-oriented ASCII board renderer.
//!
//! Draws the board with Dark's home rank on top, then both reserves, for
//! debugging, tests and engine diagnostics.

use crate::game_state::{game_state::GameState, shogi_types::*};

/// Render the board to a string for terminal output.
///
/// Each cell is three characters wide: `+` for promoted pieces, then the piece
/// letter (uppercase Light, lowercase Dark), or ` . ` for an empty square.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str(&file_header());

    for rank in (0..BOARD_HEIGHT).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..BOARD_WIDTH {
            match game_state.piece_at(make_square(file, rank)) {
                Some((color, kind)) => {
                    out.push(if kind.is_promoted() { '+' } else { ' ' });
                    out.push(piece_char(color, kind));
                    out.push(' ');
                }
                None => out.push_str(" . "),
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str(&file_header());
    out.push_str(&format!(
        "Light hand: {}\nDark hand:  {}\n{} to move",
        reserve_text(game_state, Color::Light),
        reserve_text(game_state, Color::Dark),
        match game_state.side_to_move {
            Color::Light => "Light",
            Color::Dark => "Dark",
        }
    ));

    out
}

fn file_header() -> String {
    let mut header = String::from("  ");
    for file in 0..BOARD_WIDTH {
        header.push(' ');
        header.push(char::from(b'a' + file));
        header.push(' ');
    }
    header.push('\n');
    header
}

fn reserve_text(game_state: &GameState, color: Color) -> String {
    let reserve = game_state.reserve(color);
    if reserve.is_empty() {
        return "-".to_owned();
    }
    reserve.iter().map(|&kind| piece_char(color, kind)).collect()
}

fn piece_char(color: Color, kind: PieceKind) -> char {
    match color {
        Color::Light => kind.letter(),
        Color::Dark => kind.letter().to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::game_state::GameState;

    #[test]
    fn renders_every_rank_and_both_hands() {
        let game = GameState::from_position_str("k8/9/9/9/4+r4/9/9/9/K8[Pg] b 0 1")
            .expect("position should parse");
        let text = render_game_state(&game);
        assert_eq!(text.lines().count(), 9 + 2 + 3);
        assert!(text.contains("+r"));
        assert!(text.contains("Light hand: P"));
        assert!(text.contains("Dark hand:  g"));
        assert!(text.ends_with("Dark to move"));
    }
}
