//! Perft node counting.
//!
//! Counts leaf positions reachable through legal moves at an exact depth.
//! This is the only cheap oracle for the generator and make/unmake, so the
//! reference tables below are ground truth: any deviation is a bug in one
//! of those two layers.

use std::time::Instant;

use crate::game_state::chess_types::GameState;
use crate::move_generation::generator::generate_moves;
use crate::move_generation::make_unmake::{make_move, unmake_move};
use crate::moves::move_list::MoveList;
use crate::utils::long_algebraic::move_to_string;

pub fn perft(game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut list = MoveList::new();
    generate_moves(game_state, &mut list);

    let mut nodes = 0u64;
    for &mv in list.as_slice() {
        let Ok(undo) = make_move(game_state, mv) else {
            continue;
        };
        nodes += perft(game_state, depth - 1);
        unmake_move(game_state, &undo);
    }

    nodes
}

/// Per-root-move subtree counts plus the grand total, for `go perft` output
/// and for pinpointing which root move diverges from a reference engine.
#[derive(Debug, Clone)]
pub struct PerftDivide {
    pub depth: u8,
    pub splits: Vec<(String, u64)>,
    pub total: u64,
    pub elapsed_ms: u64,
}

pub fn perft_divide(game_state: &mut GameState, depth: u8) -> PerftDivide {
    let started_at = Instant::now();

    let mut list = MoveList::new();
    generate_moves(game_state, &mut list);

    let mut splits = Vec::with_capacity(list.len());
    let mut total = 0u64;

    for &mv in list.as_slice() {
        let Ok(undo) = make_move(game_state, mv) else {
            continue;
        };
        let nodes = if depth == 0 {
            1
        } else {
            perft(game_state, depth - 1)
        };
        unmake_move(game_state, &undo);

        splits.push((move_to_string(mv), nodes));
        total += nodes;
    }

    PerftDivide {
        depth,
        splits,
        total,
        elapsed_ms: started_at.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_perft_sequence(fen: &str, expected: &[u64]) {
        let mut game_state = GameState::from_fen(fen).expect("FEN should parse");

        for (idx, target_nodes) in expected.iter().enumerate() {
            let depth = (idx + 1) as u8;
            assert_eq!(
                perft(&mut game_state, depth),
                *target_nodes,
                "node mismatch at depth {depth} for {fen}"
            );
        }
    }

    #[test]
    fn perft_depth_zero_counts_one_node() {
        let mut game_state = GameState::new_game();
        assert_eq!(perft(&mut game_state, 0), 1);
    }

    #[test]
    fn perft_start_position_depth_1_to_5() {
        assert_perft_sequence(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            &[20, 400, 8902, 197_281, 4_865_609],
        );
    }

    #[test]
    fn perft_kiwipete_depth_1_to_4() {
        assert_perft_sequence(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            &[48, 2039, 97_862, 4_085_603],
        );
    }

    #[test]
    fn perft_endgame_position_depth_1_to_5() {
        assert_perft_sequence(
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            &[14, 191, 2812, 43_238, 674_624],
        );
    }

    #[test]
    fn perft_promotion_position_depth_1_to_4() {
        assert_perft_sequence(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
            &[44, 1486, 62_379, 2_103_487],
        );
    }

    #[test]
    fn perft_divide_splits_sum_to_the_total() {
        let mut game_state = GameState::new_game();
        let divide = perft_divide(&mut game_state, 3);

        assert_eq!(divide.depth, 3);
        assert_eq!(divide.splits.len(), 20);
        assert_eq!(divide.splits.iter().map(|(_, n)| n).sum::<u64>(), 8902);
        assert_eq!(divide.total, 8902);
    }

    #[test]
    fn perft_divide_leaves_the_position_untouched() {
        let mut game_state = GameState::new_game();
        let before = game_state.clone();
        perft_divide(&mut game_state, 2);
        assert_eq!(game_state, before);
    }
}
