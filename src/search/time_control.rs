//! Per-move thinking budget.
//!
//! The engine spends 1/20th of its remaining clock, but never less than
//! the increment. A fixed `movetime` is expressed by passing it as both
//! remaining time and increment, which makes the budget exactly that
//! value. Depth-bounded searches use the unlimited sentinel.

use std::time::{Duration, Instant};

use crate::game_state::chess_types::Color;

/// Effectively unlimited remaining time (about 24 days).
pub const UNLIMITED_TIME_MS: u64 = i32::MAX as u64;

const THINKING_TIME_RATIO: u64 = 20;

#[derive(Debug, Clone, Copy)]
pub struct SearchTimer {
    budget: Duration,
    started_at: Instant,
}

impl SearchTimer {
    pub fn start(remaining_ms: u64, increment_ms: u64) -> Self {
        let budget_ms = (remaining_ms / THINKING_TIME_RATIO).max(increment_ms);
        Self {
            budget: Duration::from_millis(budget_ms),
            started_at: Instant::now(),
        }
    }

    pub fn unlimited() -> Self {
        Self::start(UNLIMITED_TIME_MS, 0)
    }

    /// Cheap enough to poll inside the inner search loops.
    #[inline]
    pub fn is_timed_out(&self) -> bool {
        self.started_at.elapsed() > self.budget
    }

    #[inline]
    pub fn budget_ms(&self) -> u64 {
        self.budget.as_millis() as u64
    }
}

/// Raw `go` arguments as parsed by the UCI layer.
#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub perft_depth: Option<u8>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
}

/// Turns the raw clock fields into a running timer for the side to move.
pub fn resolve_timer(params: &GoParams, side: Color) -> SearchTimer {
    if let Some(movetime) = params.movetime_ms {
        return SearchTimer::start(movetime, movetime);
    }

    let (remaining, increment) = match side {
        Color::Light => (params.wtime_ms, params.winc_ms),
        Color::Dark => (params.btime_ms, params.binc_ms),
    };

    match remaining {
        Some(remaining_ms) => SearchTimer::start(remaining_ms, increment.unwrap_or(0)),
        None => SearchTimer::unlimited(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_is_a_twentieth_of_the_clock_but_at_least_the_increment() {
        assert_eq!(SearchTimer::start(60_000, 0).budget_ms(), 3_000);
        assert_eq!(SearchTimer::start(60_000, 5_000).budget_ms(), 5_000);
        assert_eq!(SearchTimer::start(100, 0).budget_ms(), 5);
    }

    #[test]
    fn movetime_resolves_to_exactly_itself() {
        let params = GoParams {
            movetime_ms: Some(250),
            ..GoParams::default()
        };
        assert_eq!(resolve_timer(&params, Color::Light).budget_ms(), 250);
    }

    #[test]
    fn clock_fields_follow_the_side_to_move() {
        let params = GoParams {
            wtime_ms: Some(40_000),
            btime_ms: Some(20_000),
            winc_ms: Some(0),
            binc_ms: Some(0),
            ..GoParams::default()
        };
        assert_eq!(resolve_timer(&params, Color::Light).budget_ms(), 2_000);
        assert_eq!(resolve_timer(&params, Color::Dark).budget_ms(), 1_000);
    }

    #[test]
    fn missing_clock_means_effectively_unlimited() {
        let timer = resolve_timer(&GoParams::default(), Color::Light);
        assert!(!timer.is_timed_out());
        assert_eq!(timer.budget_ms(), UNLIMITED_TIME_MS / 20);
    }

    #[test]
    fn short_budgets_actually_elapse() {
        let timer = SearchTimer::start(0, 0);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(timer.is_timed_out());
    }
}
