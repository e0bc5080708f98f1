//! Move ordering for the alpha-beta search.
//!
//! Captures first by most-valuable-victim / least-valuable-attacker, then
//! the two killer moves recorded at this ply, then quiet moves by their
//! history score. Better ordering means earlier cutoffs, not different
//! results.

use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{
    move_captured_piece, move_is_capture, move_moved_piece, move_to, Move,
};
use crate::moves::move_list::MoveList;
use crate::search::context::SearchContext;

pub const CAPTURE_BASE_SCORE: i32 = 10_000;
pub const FIRST_KILLER_SCORE: i32 = 9_000;
pub const SECOND_KILLER_SCORE: i32 = 8_000;

/// Rows are the attacker kind, columns the victim kind: higher victims and
/// lighter attackers sort first.
#[rustfmt::skip]
pub const MVV_LVA: [[i32; 6]; 6] = [
    [105, 205, 305, 405, 505, 605],
    [104, 204, 304, 404, 504, 604],
    [103, 203, 303, 403, 503, 603],
    [102, 202, 302, 402, 502, 602],
    [101, 201, 301, 401, 501, 601],
    [100, 200, 300, 400, 500, 600],
];

// Stable sort: equal-scored moves keep their generation order, which makes
// tie-breaks at the root reproducible.
pub fn order_moves(list: &mut MoveList, game_state: &GameState, ctx: &SearchContext, ply: usize) {
    let side = game_state.side_to_move;
    list.as_mut_slice()
        .sort_by_key(|&mv| -score_move(mv, side, ctx, ply));
}

pub fn score_move(mv: Move, side: Color, ctx: &SearchContext, ply: usize) -> i32 {
    if move_is_capture(mv) {
        let attacker = move_moved_piece(mv);
        // En-passant moves always carry pawn as the victim.
        let victim = move_captured_piece(mv).unwrap_or(PieceKind::Pawn);
        return MVV_LVA[attacker.index()][victim.index()] + CAPTURE_BASE_SCORE;
    }

    if let Some(killers) = ctx.killers_at(ply) {
        if mv == killers[0] {
            return FIRST_KILLER_SCORE;
        }
        if mv == killers[1] {
            return SECOND_KILLER_SCORE;
        }
    }

    ctx.history[side.index()][move_moved_piece(mv).index()][move_to(mv) as usize]
}
