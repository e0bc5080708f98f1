//! Square-attack and check queries.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// True when `square` is attacked by any piece of `attacker_color`. Pawn
/// attackers are found by looking up the opposite color's attack table from
/// the target square; sliders run against the full occupancy.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacker = attacker_color.index();

    let attacker_pawns = game_state.pieces[attacker][PieceKind::Pawn.index()];
    if pawn_attacks(attacker_color.opposite(), square) & attacker_pawns != 0 {
        return true;
    }

    let attacker_knights = game_state.pieces[attacker][PieceKind::Knight.index()];
    if knight_attacks(square) & attacker_knights != 0 {
        return true;
    }

    let bishops_queens = game_state.pieces[attacker][PieceKind::Bishop.index()]
        | game_state.pieces[attacker][PieceKind::Queen.index()];
    if bishop_attacks(square, game_state.occupancy_all) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = game_state.pieces[attacker][PieceKind::Rook.index()]
        | game_state.pieces[attacker][PieceKind::Queen.index()];
    if rook_attacks(square, game_state.occupancy_all) & rooks_queens != 0 {
        return true;
    }

    let attacker_kings = game_state.pieces[attacker][PieceKind::King.index()];
    king_attacks(square) & attacker_kings != 0
}
