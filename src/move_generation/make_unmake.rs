//! Applying and reverting moves.
//!
//! `make_move` commits a pseudo-legal move and then tests the mover's king;
//! a move that leaves it attacked is fully rolled back before the error is
//! returned, so the board is valid either way. Every recursive caller keeps
//! its `UndoState` on its own stack frame.

use crate::errors::IllegalMove;
use crate::game_state::chess_types::*;
use crate::move_generation::attack_checks::is_king_in_check;
use crate::moves::move_descriptions::{
    move_captured_piece, move_from, move_is_capture, move_is_castling, move_is_double_pawn_push,
    move_is_en_passant, move_moved_piece, move_promotion_piece, move_to, Move,
};

pub fn make_move(game_state: &mut GameState, mv: Move) -> Result<UndoState, IllegalMove> {
    let side = game_state.side_to_move;
    let enemy = side.opposite();

    let from = move_from(mv);
    let to = move_to(mv);
    let moved = move_moved_piece(mv);

    let undo = UndoState {
        mv,
        captured_piece: if move_is_capture(mv) {
            move_captured_piece(mv)
        } else {
            None
        },
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
    };

    game_state.pieces[side.index()][moved.index()] &= !(1u64 << from);
    game_state.pieces[side.index()][moved.index()] |= 1u64 << to;

    if move_is_en_passant(mv) {
        let captured_square = en_passant_victim_square(side, to);
        game_state.pieces[enemy.index()][PieceKind::Pawn.index()] &= !(1u64 << captured_square);
    } else if let Some(captured) = undo.captured_piece {
        game_state.pieces[enemy.index()][captured.index()] &= !(1u64 << to);
    }

    if let Some(promotion) = move_promotion_piece(mv) {
        game_state.pieces[side.index()][PieceKind::Pawn.index()] &= !(1u64 << to);
        game_state.pieces[side.index()][promotion.index()] |= 1u64 << to;
    }

    if move_is_castling(mv) {
        let (rook_from, rook_to) = castling_rook_squares(to);
        game_state.pieces[side.index()][PieceKind::Rook.index()] &= !(1u64 << rook_from);
        game_state.pieces[side.index()][PieceKind::Rook.index()] |= 1u64 << rook_to;
    }

    game_state.castling_rights &=
        CASTLING_RIGHTS_MASK[from as usize] & CASTLING_RIGHTS_MASK[to as usize];

    game_state.en_passant_square = if move_is_double_pawn_push(mv) {
        Some(en_passant_skipped_square(side, from))
    } else {
        None
    };

    game_state.side_to_move = enemy;
    game_state.move_counter += 1;
    game_state.refresh_occupancies();

    if is_king_in_check(game_state, side) {
        unmake_move(game_state, &undo);
        return Err(IllegalMove);
    }

    Ok(undo)
}

pub fn unmake_move(game_state: &mut GameState, undo: &UndoState) {
    let side = game_state.side_to_move.opposite();
    let enemy = side.opposite();

    let mv = undo.mv;
    let from = move_from(mv);
    let to = move_to(mv);
    let moved = move_moved_piece(mv);

    if let Some(promotion) = move_promotion_piece(mv) {
        game_state.pieces[side.index()][promotion.index()] &= !(1u64 << to);
    } else {
        game_state.pieces[side.index()][moved.index()] &= !(1u64 << to);
    }
    game_state.pieces[side.index()][moved.index()] |= 1u64 << from;

    if move_is_en_passant(mv) {
        let captured_square = en_passant_victim_square(side, to);
        game_state.pieces[enemy.index()][PieceKind::Pawn.index()] |= 1u64 << captured_square;
    } else if let Some(captured) = undo.captured_piece {
        game_state.pieces[enemy.index()][captured.index()] |= 1u64 << to;
    }

    if move_is_castling(mv) {
        let (rook_from, rook_to) = castling_rook_squares(to);
        game_state.pieces[side.index()][PieceKind::Rook.index()] &= !(1u64 << rook_to);
        game_state.pieces[side.index()][PieceKind::Rook.index()] |= 1u64 << rook_from;
    }

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.side_to_move = side;
    game_state.move_counter -= 1;
    game_state.refresh_occupancies();
}

/// Square of the pawn removed by an en-passant capture: directly behind the
/// landing square from the mover's point of view.
#[inline]
fn en_passant_victim_square(mover: Color, to: Square) -> Square {
    match mover {
        Color::Light => to + 8,
        Color::Dark => to - 8,
    }
}

/// Square a double push skipped over, which becomes the en-passant target.
#[inline]
fn en_passant_skipped_square(mover: Color, from: Square) -> Square {
    match mover {
        Color::Light => from - 8,
        Color::Dark => from + 8,
    }
}

/// Rook shuttle for a castling move, keyed by the king's landing square.
#[inline]
fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        62 => (63, 61), // light king-side: h1 -> f1
        58 => (56, 59), // light queen-side: a1 -> d1
        6 => (7, 5),    // dark king-side: h8 -> f8
        2 => (0, 3),    // dark queen-side: a8 -> d8
        _ => unreachable!("castling move with non-castling destination"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::generator::generate_moves;
    use crate::moves::move_list::MoveList;
    use crate::utils::long_algebraic::match_move_string;

    fn assert_identity_after_round_trip(fen: &str) {
        let mut game_state = GameState::from_fen(fen).expect("FEN should parse");
        let before = game_state.clone();

        let mut list = MoveList::new();
        generate_moves(&game_state, &mut list);

        for &mv in list.as_slice() {
            if let Ok(undo) = make_move(&mut game_state, mv) {
                unmake_move(&mut game_state, &undo);
            }
            assert_eq!(game_state, before, "state diverged after {mv:#x} in {fen}");
        }
    }

    #[test]
    fn make_then_unmake_restores_assorted_positions() {
        for fen in [
            STARTING_POSITION_FEN,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1",
            "8/P6k/8/8/8/8/7K/8 w - - 0 1",
        ] {
            assert_identity_after_round_trip(fen);
        }
    }

    #[test]
    fn make_unmake_identity_holds_across_a_depth_three_enumeration() {
        fn walk(game_state: &mut GameState, depth: u8) {
            if depth == 0 {
                return;
            }

            let before = game_state.clone();
            let mut list = MoveList::new();
            generate_moves(game_state, &mut list);

            for &mv in list.as_slice() {
                let Ok(undo) = make_move(game_state, mv) else {
                    assert_eq!(*game_state, before, "illegal move must leave no trace");
                    continue;
                };

                assert_eq!(
                    game_state.occupancy_all,
                    game_state.occupancy_by_color[0] | game_state.occupancy_by_color[1]
                );
                let piece_bits: u32 = game_state
                    .pieces
                    .iter()
                    .flatten()
                    .map(|bb| bb.count_ones())
                    .sum();
                assert_eq!(game_state.occupancy_all.count_ones(), piece_bits);

                walk(game_state, depth - 1);
                unmake_move(game_state, &undo);
                assert_eq!(*game_state, before);
            }
        }

        let mut game_state = GameState::new_game();
        walk(&mut game_state, 3);
    }

    #[test]
    fn illegal_move_is_reverted_and_reported() {
        // The e-file pin: the e2 knight may not leave the line between the
        // light king and the e8 rook.
        let mut game_state =
            GameState::from_fen("4r3/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let before = game_state.clone();

        let mv = match_move_string(&game_state, "e2c3").expect("move should match");
        assert_eq!(make_move(&mut game_state, mv), Err(IllegalMove));
        assert_eq!(game_state, before);
    }

    #[test]
    fn double_push_sets_and_clears_the_en_passant_target() {
        let mut game_state =
            GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");

        let double = match_move_string(&game_state, "e2e4").expect("move should match");
        make_move(&mut game_state, double).expect("double push is legal");
        assert_eq!(game_state.en_passant_square, Some(44)); // e3

        let reply = match_move_string(&game_state, "e8e7").expect("move should match");
        make_move(&mut game_state, reply).expect("king step is legal");
        assert_eq!(game_state.en_passant_square, None);
    }

    #[test]
    fn en_passant_capture_removes_the_bypassed_pawn() {
        let mut game_state =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");

        let capture = match_move_string(&game_state, "e5d6").expect("move should match");
        make_move(&mut game_state, capture).expect("en passant is legal");

        // The d5 pawn is gone; the capturing pawn stands on d6.
        assert_eq!(game_state.piece_on_square(27), None);
        assert_eq!(
            game_state.piece_on_square(19),
            Some((Color::Light, PieceKind::Pawn))
        );
    }

    #[test]
    fn castling_moves_the_rook_and_burns_the_rights() {
        let mut game_state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");

        let castle = match_move_string(&game_state, "e1g1").expect("move should match");
        let undo = make_move(&mut game_state, castle).expect("castling is legal");

        assert_eq!(
            game_state.piece_on_square(61),
            Some((Color::Light, PieceKind::Rook))
        );
        assert_eq!(game_state.piece_on_square(63), None);
        assert_eq!(
            game_state.castling_rights & (CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            0
        );

        unmake_move(&mut game_state, &undo);
        assert_eq!(
            game_state.piece_on_square(63),
            Some((Color::Light, PieceKind::Rook))
        );
        assert_ne!(game_state.castling_rights & CASTLE_LIGHT_KINGSIDE, 0);
    }

    #[test]
    fn rook_capture_on_the_home_square_clears_the_matching_right() {
        let mut game_state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");

        let capture = match_move_string(&game_state, "a1a8").expect("move should match");
        make_move(&mut game_state, capture).expect("capture is legal");

        assert_eq!(game_state.castling_rights & CASTLE_DARK_QUEENSIDE, 0);
        assert_ne!(game_state.castling_rights & CASTLE_DARK_KINGSIDE, 0);
        assert_eq!(game_state.castling_rights & CASTLE_LIGHT_QUEENSIDE, 0);
    }

    #[test]
    fn seeded_random_walks_keep_every_field_reversible() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x5EED);

        for _ in 0..24 {
            let mut game_state = GameState::new_game();
            let mut trail: Vec<(GameState, UndoState)> = Vec::new();

            for _ in 0..40 {
                let mut list = MoveList::new();
                generate_moves(&game_state, &mut list);
                if list.is_empty() {
                    break;
                }

                let mv = list.as_slice()[rng.random_range(0..list.len())];
                let before = game_state.clone();
                let Ok(undo) = make_move(&mut game_state, mv) else {
                    assert_eq!(game_state, before);
                    continue;
                };
                trail.push((before, undo));
            }

            while let Some((before, undo)) = trail.pop() {
                unmake_move(&mut game_state, &undo);
                assert_eq!(game_state, before);
            }
            assert_eq!(game_state, GameState::new_game());
        }
    }

    #[test]
    fn promotion_replaces_the_pawn_and_unmake_restores_it() {
        let mut game_state =
            GameState::from_fen("8/P6k/8/8/8/8/7K/8 w - - 0 1").expect("FEN should parse");

        let promote = match_move_string(&game_state, "a7a8q").expect("move should match");
        let undo = make_move(&mut game_state, promote).expect("promotion is legal");
        assert_eq!(
            game_state.piece_on_square(0),
            Some((Color::Light, PieceKind::Queen))
        );
        assert_eq!(
            game_state.pieces[Color::Light.index()][PieceKind::Pawn.index()],
            0
        );

        unmake_move(&mut game_state, &undo);
        assert_eq!(
            game_state.piece_on_square(8),
            Some((Color::Light, PieceKind::Pawn))
        );
        assert_eq!(
            game_state.pieces[Color::Light.index()][PieceKind::Queen.index()],
            0
        );
    }
}
