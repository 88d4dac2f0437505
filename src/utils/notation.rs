//! Move notation.
//!
//! Board moves read `<from><to>` plus `+` when the piece promotes or `=` when
//! an offered promotion is declined, e.g. `b5c7=`. Drops read `<letter>@<to>`,
//! e.g. `G@e8`. Squares are a file letter `a..i` and a rank digit `1..9`, rank 1
//! being Light's home rank.

use crate::errors::IllegalMoveError;
use crate::game_state::shogi_types::*;
use crate::moves::move_descriptions::{MoveDescription, PromotionState};

pub fn square_to_notation(square: Square) -> String {
    let file = char::from(b'a' + square_file(square));
    let rank = char::from(b'1' + square_rank(square));
    format!("{file}{rank}")
}

pub fn notation_to_square(text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }

    let file = bytes[0].checked_sub(b'a')?;
    let rank = bytes[1].checked_sub(b'1')?;
    if file >= BOARD_WIDTH || rank >= BOARD_HEIGHT {
        return None;
    }

    Some(make_square(file, rank))
}

pub fn move_to_notation(move_description: &MoveDescription) -> String {
    let to = square_to_notation(move_description.to);

    if let Some(kind) = move_description.drop {
        return format!("{}@{}", kind.letter(), to);
    }

    let from = move_description
        .from
        .map(square_to_notation)
        .unwrap_or_default();
    let suffix = match move_description.promotion {
        PromotionState::None => "",
        PromotionState::Declined => "=",
        PromotionState::Promoted => "+",
    };

    format!("{from}{to}{suffix}")
}

/// Parse notation into a move descriptor. Only the syntax is checked; whether
/// the move is legal is decided by matching against generated moves.
pub fn notation_to_move(text: &str) -> Result<MoveDescription, IllegalMoveError> {
    let illegal = || IllegalMoveError {
        notation: text.to_owned(),
    };

    if let Some((piece, target)) = text.split_once('@') {
        let mut letters = piece.chars();
        let kind = match (letters.next(), letters.next()) {
            (Some(ch), None) if ch.is_ascii_uppercase() => {
                PieceKind::from_letter(ch).ok_or_else(illegal)?
            }
            _ => return Err(illegal()),
        };
        if !kind.is_reserve_kind() {
            return Err(illegal());
        }
        let to = notation_to_square(target).ok_or_else(illegal)?;
        return Ok(MoveDescription::drop_move(kind, to));
    }

    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(illegal());
    }

    let from = notation_to_square(&text[0..2]).ok_or_else(illegal)?;
    let to = notation_to_square(&text[2..4]).ok_or_else(illegal)?;
    let promotion = match &text[4..] {
        "" => PromotionState::None,
        "=" => PromotionState::Declined,
        "+" => PromotionState::Promoted,
        _ => return Err(illegal()),
    };

    Ok(MoveDescription::board_move(from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_use_file_letter_and_rank_digit() {
        assert_eq!(square_to_notation(make_square(0, 0)), "a1");
        assert_eq!(square_to_notation(make_square(8, 8)), "i9");
        assert_eq!(notation_to_square("e8"), Some(make_square(4, 7)));
        assert_eq!(notation_to_square("j1"), None);
        assert_eq!(notation_to_square("a0"), None);
    }

    #[test]
    fn board_moves_carry_promotion_suffix() {
        let declined = MoveDescription::board_move(make_square(1, 4), make_square(2, 6), PromotionState::Declined);
        assert_eq!(move_to_notation(&declined), "b5c7=");
        assert_eq!(notation_to_move("b5c7="), Ok(declined));

        let promoted = MoveDescription::board_move(make_square(1, 4), make_square(2, 6), PromotionState::Promoted);
        assert_eq!(move_to_notation(&promoted), "b5c7+");

        let plain = MoveDescription::board_move(make_square(0, 1), make_square(0, 0), PromotionState::None);
        assert_eq!(move_to_notation(&plain), "a2a1");
    }

    #[test]
    fn drops_use_uppercase_letter() {
        let drop = MoveDescription::drop_move(PieceKind::Gold, make_square(4, 7));
        assert_eq!(move_to_notation(&drop), "G@e8");
        assert_eq!(notation_to_move("G@e8"), Ok(drop));
    }

    #[test]
    fn malformed_notation_is_rejected() {
        for text in ["", "a1", "a1a2x", "K@e5", "g@e5", "GG@e5", "G@z9", "a1a2++"] {
            assert!(notation_to_move(text).is_err(), "{text}");
        }
    }
}
