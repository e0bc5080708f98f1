//! Pseudo-legal move generation.
//!
//! One pass per piece kind in a fixed order (pawns, king with castling,
//! knights, bishops, rooks, queens) so the buffer contents are reproducible.
//! Legality against own-king checks is enforced later by `make_move`.

use crate::game_state::chess_types::*;
use crate::move_generation::attack_checks::is_square_attacked;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::{
    pack_move, Move, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::move_list::MoveList;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Fills `out` with every pseudo-legal move for the side to move.
pub fn generate_moves(game_state: &GameState, out: &mut MoveList) {
    out.clear();

    generate_pawn_moves(game_state, out);
    generate_king_moves(game_state, out);
    generate_piece_moves(game_state, PieceKind::Knight, out);
    generate_piece_moves(game_state, PieceKind::Bishop, out);
    generate_piece_moves(game_state, PieceKind::Rook, out);
    generate_piece_moves(game_state, PieceKind::Queen, out);
}

fn generate_pawn_moves(game_state: &GameState, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let enemy_occ = game_state.occupancy_by_color[enemy.index()];
    let empty = !game_state.occupancy_all;

    // Light pawns advance toward rank 8 (lower indices).
    let (push_step, start_row, promotion_row) = match side {
        Color::Light => (-8i8, 6u8, 0u8),
        Color::Dark => (8i8, 1u8, 7u8),
    };

    let mut pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        let one_step = (from as i8 + push_step) as Square;

        if (1u64 << one_step) & empty != 0 {
            if one_step / 8 == promotion_row {
                for promotion in PROMOTION_KINDS {
                    out.push(pack_move(from, one_step, PieceKind::Pawn, None, Some(promotion), 0));
                }
            } else {
                out.push(pack_move(from, one_step, PieceKind::Pawn, None, None, 0));

                if from / 8 == start_row {
                    let two_step = (one_step as i8 + push_step) as Square;
                    if (1u64 << two_step) & empty != 0 {
                        out.push(pack_move(
                            from,
                            two_step,
                            PieceKind::Pawn,
                            None,
                            None,
                            FLAG_DOUBLE_PAWN_PUSH,
                        ));
                    }
                }
            }
        }

        let mut captures = pawn_attacks(side, from) & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            let captured = game_state.piece_on_square_for_color(enemy, to);

            if to / 8 == promotion_row {
                for promotion in PROMOTION_KINDS {
                    out.push(pack_move(
                        from,
                        to,
                        PieceKind::Pawn,
                        captured,
                        Some(promotion),
                        FLAG_CAPTURE,
                    ));
                }
            } else {
                out.push(pack_move(from, to, PieceKind::Pawn, captured, None, FLAG_CAPTURE));
            }

            captures &= captures - 1;
        }

        if let Some(en_passant) = game_state.en_passant_square {
            if pawn_attacks(side, from) & (1u64 << en_passant) != 0 {
                out.push(pack_move(
                    from,
                    en_passant,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }

        pawns &= pawns - 1;
    }
}

fn generate_king_moves(game_state: &GameState, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[enemy.index()];

    let mut kings = game_state.pieces[side.index()][PieceKind::King.index()];
    while kings != 0 {
        let from = kings.trailing_zeros() as Square;

        let mut attacks = king_attacks(from) & !own_occ;
        while attacks != 0 {
            let to = attacks.trailing_zeros() as Square;

            if (1u64 << to) & enemy_occ != 0 {
                let captured = game_state.piece_on_square_for_color(enemy, to);
                out.push(pack_move(from, to, PieceKind::King, captured, None, FLAG_CAPTURE));
            } else {
                out.push(pack_move(from, to, PieceKind::King, None, None, 0));
            }

            attacks &= attacks - 1;
        }

        kings &= kings - 1;
    }

    generate_castling_moves(game_state, out);
}

fn generate_castling_moves(game_state: &GameState, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let occupied = game_state.occupancy_all;

    // King start / crossed / destination squares and the queen-side b-file
    // square that must be empty (but is not attack-checked).
    let (kingside_right, queenside_right, king_from) = match side {
        Color::Light => (CASTLE_LIGHT_KINGSIDE, CASTLE_LIGHT_QUEENSIDE, 60u8),
        Color::Dark => (CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, 4u8),
    };

    if game_state.castling_rights & kingside_right != 0 {
        let crossed = king_from + 1;
        let destination = king_from + 2;

        let between_empty = (1u64 << crossed) | (1u64 << destination);
        if occupied & between_empty == 0
            && !is_square_attacked(game_state, king_from, enemy)
            && !is_square_attacked(game_state, crossed, enemy)
            && !is_square_attacked(game_state, destination, enemy)
        {
            out.push(pack_move(king_from, destination, PieceKind::King, None, None, FLAG_CASTLING));
        }
    }

    if game_state.castling_rights & queenside_right != 0 {
        let crossed = king_from - 1;
        let destination = king_from - 2;
        let rook_neighbor = king_from - 3;

        let between_empty = (1u64 << crossed) | (1u64 << destination) | (1u64 << rook_neighbor);
        if occupied & between_empty == 0
            && !is_square_attacked(game_state, king_from, enemy)
            && !is_square_attacked(game_state, crossed, enemy)
            && !is_square_attacked(game_state, destination, enemy)
        {
            out.push(pack_move(king_from, destination, PieceKind::King, None, None, FLAG_CASTLING));
        }
    }
}

fn generate_piece_moves(game_state: &GameState, kind: PieceKind, out: &mut MoveList) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let own_occ = game_state.occupancy_by_color[side.index()];
    let enemy_occ = game_state.occupancy_by_color[enemy.index()];

    let mut pieces = game_state.pieces[side.index()][kind.index()];
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;

        let targets = match kind {
            PieceKind::Knight => knight_attacks(from),
            PieceKind::Bishop => bishop_attacks(from, game_state.occupancy_all),
            PieceKind::Rook => rook_attacks(from, game_state.occupancy_all),
            PieceKind::Queen => queen_attacks(from, game_state.occupancy_all),
            PieceKind::Pawn | PieceKind::King => unreachable!("handled by dedicated passes"),
        };

        let mut attacks = targets & !own_occ;
        while attacks != 0 {
            let to = attacks.trailing_zeros() as Square;

            if (1u64 << to) & enemy_occ != 0 {
                let captured = game_state.piece_on_square_for_color(enemy, to);
                out.push(pack_move(from, to, kind, captured, None, FLAG_CAPTURE));
            } else {
                out.push(pack_move(from, to, kind, None, None, 0));
            }

            attacks &= attacks - 1;
        }

        pieces &= pieces - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{move_from, move_is_en_passant, move_to};
    use crate::utils::algebraic::square_to_algebraic;

    fn move_names(game_state: &GameState) -> Vec<String> {
        let mut list = MoveList::new();
        generate_moves(game_state, &mut list);
        list.iter()
            .map(|&mv| {
                format!(
                    "{}{}",
                    square_to_algebraic(move_from(mv)),
                    square_to_algebraic(move_to(mv))
                )
            })
            .collect()
    }

    #[test]
    fn start_position_has_twenty_pseudo_legal_moves() {
        let game_state = GameState::new_game();
        let mut list = MoveList::new();
        generate_moves(&game_state, &mut list);
        assert_eq!(list.len(), 20);
    }

    #[test]
    fn king_and_rooks_position_offers_both_castles() {
        let game_state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let names = move_names(&game_state);

        for expected in ["e1g1", "e1c1", "e1d1", "e1f1", "e1e2", "e1d2", "e1f2"] {
            assert!(names.contains(&expected.to_owned()), "missing {expected}");
        }
    }

    #[test]
    fn castling_is_rejected_when_a_crossed_or_destination_square_is_attacked() {
        // Dark rook on f8 covers f1; g-file rook covers g1.
        let crossed_hit =
            GameState::from_fen("5r2/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        assert!(!move_names(&crossed_hit).contains(&"e1g1".to_owned()));

        let destination_hit =
            GameState::from_fen("6r1/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        assert!(!move_names(&destination_hit).contains(&"e1g1".to_owned()));
    }

    #[test]
    fn queenside_castle_requires_the_b_file_square_empty_but_not_safe() {
        // Knight on b1 blocks queen-side castling even though the king
        // never crosses b1.
        let blocked =
            GameState::from_fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").expect("FEN should parse");
        assert!(!move_names(&blocked).contains(&"e1c1".to_owned()));

        // A rook covering only b1 does not stop it.
        let b_file_attacked =
            GameState::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").expect("FEN should parse");
        assert!(move_names(&b_file_attacked).contains(&"e1c1".to_owned()));
    }

    #[test]
    fn promotions_come_in_four_kinds() {
        let game_state =
            GameState::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").expect("FEN should parse");
        let mut list = MoveList::new();
        generate_moves(&game_state, &mut list);

        let promotions = list
            .iter()
            .filter(|&&mv| move_from(mv) == 8 && move_to(mv) == 0)
            .count();
        assert_eq!(promotions, 4);
    }

    #[test]
    fn en_passant_capture_is_emitted_only_for_the_eligible_pawn() {
        let game_state =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let mut list = MoveList::new();
        generate_moves(&game_state, &mut list);

        let en_passant_moves: Vec<_> = list
            .iter()
            .copied()
            .filter(|&mv| move_is_en_passant(mv))
            .collect();
        assert_eq!(en_passant_moves.len(), 1);
        assert_eq!(move_from(en_passant_moves[0]), 28); // e5
        assert_eq!(move_to(en_passant_moves[0]), 19); // d6
    }

    #[test]
    fn en_passant_target_is_never_usable_by_the_side_that_created_it() {
        // After a light double push the target sits behind the light pawn;
        // light's own pawn attacks point the other way.
        let game_state =
            GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1").expect("FEN should parse");
        let mut list = MoveList::new();
        generate_moves(&game_state, &mut list);
        assert!(list.iter().all(|&mv| !move_is_en_passant(mv)));
    }
}
