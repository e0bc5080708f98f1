//! Long algebraic move text.
//!
//! `move_to_string` renders a packed move (`e2e4`, `e7e8q`; castling is the
//! king's two-square move). `match_move_string` resolves user input the
//! other way: it generates the pseudo-legal moves for the position and
//! returns the one whose from/to/promotion match, so the caller never has
//! to reconstruct flags itself and bad strings never reach `make_move`.

use crate::errors::MoveParseError;
use crate::game_state::chess_types::*;
use crate::move_generation::generator::generate_moves;
use crate::moves::move_descriptions::{move_from, move_promotion_piece, move_to, Move};
use crate::moves::move_list::MoveList;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_string(mv: Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(move_from(mv)));
    out.push_str(&square_to_algebraic(move_to(mv)));

    if let Some(promotion) = move_promotion_piece(mv) {
        out.push(promotion_to_char(promotion));
    }

    out
}

pub fn match_move_string(
    game_state: &GameState,
    move_str: &str,
) -> Result<Move, MoveParseError> {
    let bytes = move_str.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(MoveParseError::BadSyntax(move_str.to_owned()));
    }

    let from = algebraic_to_square(&move_str[0..2])
        .map_err(|_| MoveParseError::BadSquare(move_str[0..2].to_owned()))?;
    let to = algebraic_to_square(&move_str[2..4])
        .map_err(|_| MoveParseError::BadSquare(move_str[2..4].to_owned()))?;

    let requested_promotion = if bytes.len() == 5 {
        Some(char_to_promotion(bytes[4] as char)?)
    } else {
        None
    };

    let mut list = MoveList::new();
    generate_moves(game_state, &mut list);

    for &mv in list.as_slice() {
        if move_from(mv) != from || move_to(mv) != to {
            continue;
        }
        if move_promotion_piece(mv) != requested_promotion {
            continue;
        }
        return Ok(mv);
    }

    Err(MoveParseError::NoMatchingMove(move_str.to_owned()))
}

fn promotion_to_char(piece_kind: PieceKind) -> char {
    match piece_kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        // The generator only ever packs the four kinds above.
        PieceKind::Pawn | PieceKind::King => unreachable!("invalid promotion piece"),
    }
}

fn char_to_promotion(ch: char) -> Result<PieceKind, MoveParseError> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(MoveParseError::BadPromotionChar(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{
        move_is_castling, move_is_double_pawn_push, move_is_en_passant,
    };

    #[test]
    fn simple_move_round_trips_through_text() {
        let game_state = GameState::new_game();
        let mv = match_move_string(&game_state, "e2e4").expect("move should match");

        assert!(move_is_double_pawn_push(mv));
        assert_eq!(move_to_string(mv), "e2e4");
    }

    #[test]
    fn promotion_letter_selects_among_the_four_packed_moves() {
        let game_state =
            GameState::from_fen("8/P6k/8/8/8/8/7K/8 w - - 0 1").expect("FEN should parse");

        let queen = match_move_string(&game_state, "a7a8q").expect("move should match");
        let knight = match_move_string(&game_state, "a7a8n").expect("move should match");

        assert_eq!(move_promotion_piece(queen), Some(PieceKind::Queen));
        assert_eq!(move_promotion_piece(knight), Some(PieceKind::Knight));
        assert_eq!(move_to_string(knight), "a7a8n");

        assert!(matches!(
            match_move_string(&game_state, "a7a8f"),
            Err(MoveParseError::BadPromotionChar('f'))
        ));
        assert!(matches!(
            match_move_string(&game_state, "a7a8"),
            Err(MoveParseError::NoMatchingMove(_))
        ));
    }

    #[test]
    fn castling_and_en_passant_flags_come_from_the_generator() {
        let castle_state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = match_move_string(&castle_state, "e1g1").expect("move should match");
        assert!(move_is_castling(castle));

        let en_passant_state =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let en_passant =
            match_move_string(&en_passant_state, "e5d6").expect("move should match");
        assert!(move_is_en_passant(en_passant));
    }

    #[test]
    fn unmatched_moves_are_rejected_without_touching_the_board() {
        let game_state = GameState::new_game();

        assert!(matches!(
            match_move_string(&game_state, "e2e5"),
            Err(MoveParseError::NoMatchingMove(_))
        ));
        assert!(matches!(
            match_move_string(&game_state, "e2"),
            Err(MoveParseError::BadSyntax(_))
        ));
        assert!(matches!(
            match_move_string(&game_state, "z2e4"),
            Err(MoveParseError::BadSquare(_))
        ));
    }
}
