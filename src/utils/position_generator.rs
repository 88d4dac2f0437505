use crate::game_state::{game_state::GameState, shogi_types::*};

pub fn generate_position(game_state: &GameState) -> String {
    let board = generate_board_field(game_state);
    let reserve = generate_reserve_field(game_state);
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };

    format!(
        "{}[{}] {} {} {}",
        board, reserve, side_to_move, game_state.halfmove_clock, game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..BOARD_HEIGHT).rev() {
        let mut empty_count = 0u8;

        for file in 0..BOARD_WIDTH {
            match game_state.piece_at(make_square(file, rank)) {
                Some((color, kind)) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    if kind.is_promoted() {
                        out.push('+');
                    }
                    out.push(piece_char(color, kind));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_reserve_field(game_state: &GameState) -> String {
    let mut out = String::new();
    for color in [Color::Light, Color::Dark] {
        for &kind in game_state.reserve(color) {
            out.push(piece_char(color, kind));
        }
    }

    if out.is_empty() {
        out.push('-');
    }
    out
}

fn piece_char(color: Color, kind: PieceKind) -> char {
    match color {
        Color::Light => kind.letter(),
        Color::Dark => kind.letter().to_ascii_lowercase(),
    }
}
