//! GameState-to-FEN rendering, the inverse of `fen_parser`.
//!
//! Always emits the six-field normalized form with `0 1` counters, since
//! the clocks do not affect engine state.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        let mut empty_run = 0u8;

        for file in 0..8u8 {
            let square = row * 8 + file;
            match game_state.piece_on_square(square) {
                Some((color, piece)) => {
                    if empty_run > 0 {
                        out.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    out.push(piece_to_fen_char(color, piece));
                }
                None => empty_run += 1,
            }
        }

        if empty_run > 0 {
            out.push((b'0' + empty_run) as char);
        }
        if row != 7 {
            out.push('/');
        }
    }

    out.push(' ');
    out.push(match game_state.side_to_move {
        Color::Light => 'w',
        Color::Dark => 'b',
    });

    out.push(' ');
    if game_state.castling_rights == 0 {
        out.push('-');
    } else {
        if game_state.castling_rights & CASTLE_LIGHT_KINGSIDE != 0 {
            out.push('K');
        }
        if game_state.castling_rights & CASTLE_LIGHT_QUEENSIDE != 0 {
            out.push('Q');
        }
        if game_state.castling_rights & CASTLE_DARK_KINGSIDE != 0 {
            out.push('k');
        }
        if game_state.castling_rights & CASTLE_DARK_QUEENSIDE != 0 {
            out.push('q');
        }
    }

    out.push(' ');
    match game_state.en_passant_square {
        Some(square) => out.push_str(&square_to_algebraic(square)),
        None => out.push('-'),
    }

    out.push_str(" 0 1");
    out
}

fn piece_to_fen_char(color: Color, piece: PieceKind) -> char {
    let lower = match piece {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match color {
        Color::Light => lower.to_ascii_uppercase(),
        Color::Dark => lower,
    }
}
