//! Iterative-deepening negamax search with alpha-beta pruning.
//!
//! Each depth runs inside an aspiration window of ±50 centipawns around
//! the previous score; a score landing outside the window reopens to the
//! full window and repeats the same depth. The timer is polled at the top
//! of every move iteration, and a frame that notices the timeout returns
//! its current alpha at once — the driver then discards that partial depth
//! and keeps the principal variation of the last completed one.

use crate::game_state::chess_types::*;
use crate::move_generation::attack_checks::is_king_in_check;
use crate::move_generation::generator::generate_moves;
use crate::move_generation::make_unmake::{make_move, unmake_move};
use crate::moves::move_descriptions::{move_is_capture, Move};
use crate::moves::move_list::MoveList;
use crate::search::board_scoring::evaluate;
use crate::search::context::{SearchContext, MAX_PLY};
use crate::search::ordering::order_moves;
use crate::search::time_control::SearchTimer;
use crate::utils::long_algebraic::move_to_string;

pub const INFINITY: i32 = 50_000;
pub const MATE_SCORE: i32 = 49_000;
pub const ASPIRATION_WINDOW: i32 = 50;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub timer: SearchTimer,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            timer: SearchTimer::unlimited(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_line: Vec<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    /// One `info` line per completed iteration, in protocol format.
    pub info_lines: Vec<String>,
}

/// Searches the position and returns the best move of the deepest fully
/// completed iteration. The board is left exactly as it was passed in.
pub fn search_position(game_state: &mut GameState, config: SearchConfig) -> SearchResult {
    let mut ctx = SearchContext::new(config.timer);
    let mut result = SearchResult::default();

    let mut alpha = -INFINITY;
    let mut beta = INFINITY;

    for depth in 1..=config.max_depth {
        if ctx.timer.is_timed_out() {
            break;
        }

        let mut score = negamax(game_state, &mut ctx, alpha, beta, depth, 0);
        if ctx.timer.is_timed_out() {
            break;
        }

        // Fell outside the aspiration window: reopen fully and repeat the
        // same depth.
        if score <= alpha || score >= beta {
            score = negamax(game_state, &mut ctx, -INFINITY, INFINITY, depth, 0);
            if ctx.timer.is_timed_out() {
                break;
            }
        }

        alpha = score - ASPIRATION_WINDOW;
        beta = score + ASPIRATION_WINDOW;

        result.best_line = ctx.principal_variation().to_vec();
        result.best_move = result.best_line.first().copied();
        result.best_score = score;
        result.reached_depth = depth;

        let mut info = format!(
            "info score cp {score} depth {depth} nodes {} pv",
            ctx.nodes
        );
        for &mv in &result.best_line {
            info.push(' ');
            info.push_str(&move_to_string(mv));
        }
        result.info_lines.push(info);
    }

    result.nodes = ctx.nodes;
    result
}

fn negamax(
    game_state: &mut GameState,
    ctx: &mut SearchContext,
    mut alpha: i32,
    beta: i32,
    mut depth: u8,
    ply: usize,
) -> i32 {
    ctx.pv_length[ply] = ply;

    if depth == 0 {
        return quiescence(game_state, ctx, alpha, beta, ply);
    }
    if ply >= MAX_PLY - 1 {
        return evaluate(game_state);
    }

    ctx.nodes += 1;

    let side = game_state.side_to_move;
    let in_check = is_king_in_check(game_state, side);
    if in_check {
        depth += 1;
    }

    let mut list = MoveList::new();
    generate_moves(game_state, &mut list);
    order_moves(&mut list, game_state, ctx, ply);

    let mut legal_moves = 0u32;

    for &mv in list.as_slice() {
        if ctx.timer.is_timed_out() {
            return alpha;
        }

        let Ok(undo) = make_move(game_state, mv) else {
            continue;
        };
        legal_moves += 1;

        let score = -negamax(game_state, ctx, -beta, -alpha, depth - 1, ply + 1);
        unmake_move(game_state, &undo);

        if score >= beta {
            if !move_is_capture(mv) {
                ctx.record_killer(ply, mv);
            }
            return beta;
        }

        if score > alpha {
            if !move_is_capture(mv) {
                ctx.record_history(side, mv, depth);
            }
            alpha = score;
            ctx.update_pv(ply, mv);
        }
    }

    if legal_moves == 0 {
        // Mates further from the root score closer to zero, so the loser
        // prefers the longest defense.
        return if in_check { -MATE_SCORE + ply as i32 } else { 0 };
    }

    alpha
}

fn quiescence(
    game_state: &mut GameState,
    ctx: &mut SearchContext,
    mut alpha: i32,
    beta: i32,
    ply: usize,
) -> i32 {
    ctx.nodes += 1;

    let stand_pat = evaluate(game_state);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut list = MoveList::new();
    generate_moves(game_state, &mut list);
    order_moves(&mut list, game_state, ctx, ply);

    for &mv in list.as_slice() {
        if ctx.timer.is_timed_out() {
            return alpha;
        }
        if !move_is_capture(mv) {
            continue;
        }

        let Ok(undo) = make_move(game_state, mv) else {
            continue;
        };
        let score = -quiescence(game_state, ctx, -beta, -alpha, ply + 1);
        unmake_move(game_state, &undo);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
