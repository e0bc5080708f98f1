//! Static evaluation: material plus piece-square tables.
//!
//! Scores are centipawns from the side-to-move's perspective. Tables are
//! laid out square 0 = a8 for the light side; dark pieces read through the
//! vertical mirror (`square ^ 56`). The queen has no positional table, its
//! mobility being priced into the material value.

use crate::game_state::chess_types::*;

pub const MATERIAL_VALUES: [i32; 6] = [100, 300, 350, 500, 1000, 10_000];

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
    90,  90,  90,  90,  90,  90,  90,  90,
    30,  30,  30,  40,  40,  30,  30,  30,
    20,  20,  20,  30,  30,  30,  20,  20,
    10,  10,  10,  20,  20,  10,  10,  10,
     5,   5,  10,  20,  20,   5,   5,   5,
     0,   0,   0,   5,   5,   0,   0,   0,
     0,   0,   0, -10, -10,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,  10,  10,   0,   0,  -5,
    -5,   5,  20,  20,  20,  20,   5,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,  10,  20,  30,  30,  20,  10,  -5,
    -5,   5,  20,  10,  10,  20,   5,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5, -10,   0,   0,   0,   0, -10,  -5,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   0,  10,  10,   0,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,  10,   0,   0,   0,   0,  10,   0,
     0,  30,   0,   0,   0,   0,  30,   0,
     0,   0, -10,   0,   0, -10,   0,   0,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
    50,  50,  50,  50,  50,  50,  50,  50,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,  10,  20,  20,  10,   0,   0,
     0,   0,   0,  20,  20,   0,   0,   0,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     0,   0,   5,   5,   5,   5,   0,   0,
     0,   5,   5,  10,  10,   5,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   5,  10,  20,  20,  10,   5,   0,
     0,   0,   5,  10,  10,   5,   0,   0,
     0,   5,   5,  -5,  -5,   0,   5,   0,
     0,   0,   5,   0, -15,   0,  10,   0,
];

const ZERO_TABLE: [i32; 64] = [0; 64];

#[inline]
fn position_table(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &ZERO_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

pub fn evaluate(game_state: &GameState) -> i32 {
    let mut score = 0i32;

    for color in [Color::Light, Color::Dark] {
        let sign = match color {
            Color::Light => 1,
            Color::Dark => -1,
        };

        for kind in ALL_PIECE_KINDS {
            let table = position_table(kind);
            let mut pieces = game_state.pieces[color.index()][kind.index()];

            while pieces != 0 {
                let square = pieces.trailing_zeros() as usize;
                let table_square = match color {
                    Color::Light => square,
                    Color::Dark => square ^ 56,
                };

                score += sign * (MATERIAL_VALUES[kind.index()] + table[table_square]);
                pieces &= pieces - 1;
            }
        }
    }

    match game_state.side_to_move {
        Color::Light => score,
        Color::Dark => -score,
    }
}
