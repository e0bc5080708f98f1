//! ASCII board rendering for the `print` command and the play shell.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    for row in 0..8u8 {
        out.push_str(&format!("  {} ", 8 - row));

        for file in 0..8u8 {
            let square = row * 8 + file;
            let glyph = match game_state.piece_on_square(square) {
                Some((color, piece)) => piece_glyph(color, piece),
                None => '.',
            };
            out.push(' ');
            out.push(glyph);
        }
        out.push('\n');
    }

    out.push_str("\n     a b c d e f g h\n\n");
    out.push_str(&format!(
        "     side: {}   castling: {}   en passant: {}\n",
        match game_state.side_to_move {
            Color::Light => "white",
            Color::Dark => "black",
        },
        castling_text(game_state.castling_rights),
        match game_state.en_passant_square {
            Some(square) => square_to_algebraic(square),
            None => "-".to_owned(),
        }
    ));

    out
}

fn piece_glyph(color: Color, piece: PieceKind) -> char {
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

fn castling_text(rights: CastlingRights) -> String {
    let mut out = String::with_capacity(4);
    out.push(if rights & CASTLE_LIGHT_KINGSIDE != 0 { 'K' } else { '-' });
    out.push(if rights & CASTLE_LIGHT_QUEENSIDE != 0 { 'Q' } else { '-' });
    out.push(if rights & CASTLE_DARK_KINGSIDE != 0 { 'k' } else { '-' });
    out.push(if rights & CASTLE_DARK_QUEENSIDE != 0 { 'q' } else { '-' });
    out
}
