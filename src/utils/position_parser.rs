//! Position-text to `GameState` parser.
//!
//! Accepts `<board>[<reserve>] <side> <halfmove> [<fullmove>]`, validates every
//! field and fills in the king-square cache and the Zobrist key.

use crate::errors::FormatError;
use crate::game_state::{game_state::GameState, shogi_types::*};
use crate::search::zobrist::ZobristTables;

pub fn parse_position(text: &str) -> Result<GameState, FormatError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(FormatError::MissingFields(parts.len()));
    }

    let (board_part, reserve_part) = split_reserve(parts[0])?;

    let mut game_state = GameState::new_empty();
    parse_board(board_part, &mut game_state)?;
    parse_reserve(reserve_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(parts[1])?;
    game_state.halfmove_clock = parse_counter(parts[2])?;
    game_state.fullmove_number = match parts.get(3) {
        Some(field) => parse_counter(field)?,
        None => 1,
    };

    for color in [Color::Light, Color::Dark] {
        game_state.king_squares[color.index()] =
            game_state.find_king(color).ok_or(FormatError::KingCount)?;
    }
    if !game_state.kings_are_consistent() {
        return Err(FormatError::KingCount);
    }

    game_state.refresh_hash(ZobristTables::standard());
    Ok(game_state)
}

fn split_reserve(field: &str) -> Result<(&str, &str), FormatError> {
    let open = field.find('[').ok_or(FormatError::MissingReserve)?;
    let reserve = field[open + 1..]
        .strip_suffix(']')
        .ok_or(FormatError::MissingReserve)?;
    Ok((&field[..open], reserve))
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), FormatError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != BOARD_HEIGHT as usize {
        return Err(FormatError::RankCount(ranks.len()));
    }

    for (text_rank_idx, rank_str) in ranks.iter().enumerate() {
        // Text lists Dark's home rank first; internal rank 0 is Light's.
        let board_rank = (BOARD_HEIGHT as usize - 1) - text_rank_idx;
        let mut file = 0usize;
        let mut promoted = false;

        for ch in rank_str.chars() {
            if ch == '+' {
                if promoted {
                    return Err(FormatError::InvalidPromotion);
                }
                promoted = true;
                continue;
            }

            if let Some(empty_count) = ch.to_digit(10) {
                if promoted {
                    return Err(FormatError::InvalidPromotion);
                }
                if empty_count == 0 {
                    return Err(FormatError::InvalidPiece(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, kind) = piece_from_char(ch).ok_or(FormatError::InvalidPiece(ch))?;
            let kind = if promoted {
                promoted = false;
                kind.promote().ok_or(FormatError::InvalidPromotion)?
            } else {
                kind
            };

            if file >= BOARD_WIDTH as usize {
                return Err(FormatError::RankWidth { rank: board_rank });
            }

            let sq = make_square(file as u8, board_rank as u8);
            game_state.cells[sq as usize] = cell_code(color, kind);
            file += 1;
        }

        if promoted {
            return Err(FormatError::InvalidPromotion);
        }
        if file != BOARD_WIDTH as usize {
            return Err(FormatError::RankWidth { rank: board_rank });
        }
    }

    Ok(())
}

fn parse_reserve(reserve_part: &str, game_state: &mut GameState) -> Result<(), FormatError> {
    if reserve_part == "-" {
        return Ok(());
    }

    for ch in reserve_part.chars() {
        let (color, kind) = piece_from_char(ch).ok_or(FormatError::InvalidReserve(ch))?;
        if !kind.is_reserve_kind() {
            return Err(FormatError::InvalidReserve(ch));
        }
        game_state.reserves[color.index()].push(kind);
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FormatError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FormatError::InvalidSide(side_part.to_owned())),
    }
}

fn parse_counter(field: &str) -> Result<u16, FormatError> {
    field
        .parse::<u16>()
        .map_err(|_| FormatError::InvalidCounter(field.to_owned()))
}

fn piece_from_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    PieceKind::from_letter(ch).map(|kind| (color, kind))
}
