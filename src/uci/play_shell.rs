//! Interactive text-mode game against the engine.
//!
//! Entered with the `play` command: pick a color and a depth or movetime,
//! then alternate long-algebraic moves with engine replies. `board` prints
//! the position, `quit` returns to the UCI loop.

use std::io::{self, Write};

use crate::game_state::chess_types::{Color, GameState};
use crate::move_generation::attack_checks::is_king_in_check;
use crate::move_generation::generator::generate_moves;
use crate::move_generation::make_unmake::{make_move, unmake_move};
use crate::moves::move_list::MoveList;
use crate::search::iterative_deepening::{search_position, SearchConfig};
use crate::search::time_control::SearchTimer;
use crate::utils::long_algebraic::{match_move_string, move_to_string};
use crate::utils::render_game_state::render_game_state;

#[derive(Clone, Copy)]
enum ShellStage {
    ChoosingColor,
    ChoosingLimit { user_color: Color },
    Playing,
}

pub struct PlayShell {
    game_state: GameState,
    stage: ShellStage,
    user_color: Color,
    engine_depth: u8,
    engine_movetime_ms: Option<u64>,
}

impl PlayShell {
    pub fn new(game_state: GameState) -> Self {
        Self {
            game_state,
            stage: ShellStage::ChoosingColor,
            user_color: Color::Light,
            engine_depth: 5,
            engine_movetime_ms: None,
        }
    }

    pub fn greet(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "play mode: moves in long algebraic (e2e4, e7e8q)")?;
        writeln!(out, "which color do you play? (white/black)")
    }

    /// Handles one line. Returns `Ok(true)` when the shell is done.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        if line == "quit" {
            return Ok(true);
        }

        match self.stage {
            ShellStage::ChoosingColor => self.choose_color(line, out),
            ShellStage::ChoosingLimit { user_color } => self.choose_limit(line, user_color, out),
            ShellStage::Playing => self.play_turn(line, out),
        }
    }

    fn choose_color(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let user_color = match line {
            "white" => Color::Light,
            "black" => Color::Dark,
            _ => {
                writeln!(out, "please answer 'white' or 'black'")?;
                return Ok(false);
            }
        };

        self.stage = ShellStage::ChoosingLimit { user_color };
        writeln!(out, "engine limit? ('depth N' or 'movetime MS')")?;
        Ok(false)
    }

    fn choose_limit(
        &mut self,
        line: &str,
        user_color: Color,
        out: &mut impl Write,
    ) -> io::Result<bool> {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next().and_then(|v| v.parse::<u64>().ok())) {
            (Some("depth"), Some(depth)) if (1..=64).contains(&depth) => {
                self.engine_depth = depth as u8;
                self.engine_movetime_ms = None;
            }
            (Some("movetime"), Some(ms)) if ms > 0 => {
                self.engine_movetime_ms = Some(ms);
                self.engine_depth = 64;
            }
            _ => {
                writeln!(out, "please answer 'depth N' (1-64) or 'movetime MS'")?;
                return Ok(false);
            }
        }

        self.user_color = user_color;
        self.stage = ShellStage::Playing;
        write!(out, "{}", render_game_state(&self.game_state))?;

        if self.game_state.side_to_move != self.user_color {
            return self.engine_turn(out);
        }

        writeln!(out, "your turn:")?;
        Ok(false)
    }

    fn play_turn(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        if line == "board" {
            write!(out, "{}", render_game_state(&self.game_state))?;
            return Ok(false);
        }

        if self.game_state.side_to_move != self.user_color {
            writeln!(out, "the engine is to move; 'board' or 'quit'")?;
            return Ok(false);
        }

        let mv = match match_move_string(&self.game_state, line) {
            Ok(mv) => mv,
            Err(err) => {
                writeln!(out, "rejected: {err}")?;
                return Ok(false);
            }
        };

        if make_move(&mut self.game_state, mv).is_err() {
            writeln!(out, "rejected: that move leaves your king in check")?;
            return Ok(false);
        }

        if self.announce_game_end(out)? {
            return Ok(true);
        }

        self.engine_turn(out)
    }

    fn engine_turn(&mut self, out: &mut impl Write) -> io::Result<bool> {
        let timer = match self.engine_movetime_ms {
            Some(ms) => SearchTimer::start(ms, ms),
            None => SearchTimer::unlimited(),
        };

        let result = search_position(
            &mut self.game_state,
            SearchConfig {
                max_depth: self.engine_depth,
                timer,
            },
        );

        let Some(mv) = result.best_move else {
            // No legal reply; the game-end announcement below covers it.
            return self.announce_game_end(out);
        };

        // The PV move is known legal.
        let _ = make_move(&mut self.game_state, mv);
        writeln!(out, "engine plays {}", move_to_string(mv))?;
        write!(out, "{}", render_game_state(&self.game_state))?;

        if self.announce_game_end(out)? {
            return Ok(true);
        }

        writeln!(out, "your turn:")?;
        Ok(false)
    }

    /// Reports mate or stalemate for the side to move. Returns `Ok(true)`
    /// when the game is over.
    fn announce_game_end(&mut self, out: &mut impl Write) -> io::Result<bool> {
        if has_legal_move(&mut self.game_state) {
            return Ok(false);
        }

        if is_king_in_check(&self.game_state, self.game_state.side_to_move) {
            writeln!(out, "checkmate")?;
        } else {
            writeln!(out, "stalemate")?;
        }
        Ok(true)
    }
}

fn has_legal_move(game_state: &mut GameState) -> bool {
    let mut list = MoveList::new();
    generate_moves(game_state, &mut list);

    for &mv in list.as_slice() {
        if let Ok(undo) = make_move(game_state, mv) {
            unmake_move(game_state, &undo);
            return true;
        }
    }

    false
}
