//! UCI protocol front end and command loop.
//!
//! Parses commands from stdin, maintains the current position, routes `go`
//! requests into the search or perft, and emits protocol-compliant output.
//! Malformed input never crashes the loop: errors become `info string`
//! lines and the engine keeps reading.

use std::io::{self, BufRead, Write};

use crate::game_state::chess_types::GameState;
use crate::move_generation::make_unmake::make_move;
use crate::move_generation::perft::perft_divide;
use crate::search::iterative_deepening::{search_position, SearchConfig};
use crate::search::time_control::{resolve_timer, GoParams};
use crate::uci::play_shell::PlayShell;
use crate::utils::long_algebraic::{match_move_string, move_to_string};
use crate::utils::render_game_state::render_game_state;

const UCI_ENGINE_NAME: &str = "Rowan Chess";
const UCI_ENGINE_AUTHOR: &str = "the rowan_chess authors";

const DEFAULT_SEARCH_DEPTH: u8 = 20;

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut uci = UciState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = uci.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct UciState {
    game_state: GameState,
    play_shell: Option<PlayShell>,
}

impl Default for UciState {
    fn default() -> Self {
        Self::new()
    }
}

impl UciState {
    pub fn new() -> Self {
        Self {
            game_state: GameState::new_game(),
            play_shell: None,
        }
    }

    /// Handles one input line. Returns `Ok(true)` when the loop should end.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        // While the play shell is active it owns the input stream.
        if let Some(shell) = self.play_shell.as_mut() {
            if shell.handle_line(trimmed, out)? {
                self.play_shell = None;
                writeln!(out, "info string left play mode")?;
            }
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "ucinewgame" => {
                self.game_state = GameState::new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {}", err)?;
                }
            }
            "go" => {
                if let Err(err) = self.handle_go(trimmed, out)? {
                    writeln!(out, "info string go error: {}", err)?;
                    writeln!(out, "bestmove 0000")?;
                }
            }
            "stop" => {
                // Search is synchronous; by the time this arrives any
                // search has already produced its bestmove.
            }
            "print" => {
                write!(out, "{}", render_game_state(&self.game_state))?;
            }
            "play" => {
                let mut shell = PlayShell::new(self.game_state.clone());
                shell.greet(out)?;
                self.play_shell = Some(shell);
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for GUI compatibility.
            }
        }

        Ok(false)
    }

    /// `position [startpos | fen <FEN>] [moves <m1> <m2> ...]`
    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let moves_start = line.find(" moves");
        let setup = match moves_start {
            Some(idx) => &line[..idx],
            None => line,
        };

        let mut setup_tokens = setup.split_whitespace();
        let _ = setup_tokens.next(); // position

        match setup_tokens.next() {
            Some("startpos") | None => {
                self.game_state = GameState::new_game();
            }
            Some("fen") => {
                let fen: String = setup_tokens.collect::<Vec<_>>().join(" ");
                match GameState::from_fen(&fen) {
                    Ok(game_state) => self.game_state = game_state,
                    Err(err) => {
                        self.game_state = GameState::new_game();
                        return Err(format!("{err}; using the starting position"));
                    }
                }
            }
            Some(other) => {
                return Err(format!("expected 'startpos' or 'fen', got '{other}'"));
            }
        }

        if let Some(idx) = moves_start {
            for move_str in line[idx + " moves".len()..].split_whitespace() {
                // Replay stops silently at the first move that does not
                // match a pseudo-legal move or leaves the king in check.
                let Ok(mv) = match_move_string(&self.game_state, move_str) else {
                    break;
                };
                if make_move(&mut self.game_state, mv).is_err() {
                    break;
                }
            }
        }

        Ok(())
    }

    /// `go depth N | movetime T | perft N | wtime .. btime .. winc .. binc ..`
    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<Result<(), String>> {
        let params = match parse_go_params(line) {
            Ok(params) => params,
            Err(err) => return Ok(Err(err)),
        };

        if let Some(depth) = params.perft_depth {
            let divide = perft_divide(&mut self.game_state, depth);
            for (move_text, nodes) in &divide.splits {
                writeln!(out, "{move_text}: {nodes}")?;
            }
            writeln!(out, "    Depth: {}", divide.depth)?;
            writeln!(out, "    Nodes: {}", divide.total)?;
            writeln!(out, "    Time: {} ms", divide.elapsed_ms)?;
            return Ok(Ok(()));
        }

        // Without any bound the search would run a full depth-20 tree.
        if params.depth.is_none()
            && params.movetime_ms.is_none()
            && params.wtime_ms.is_none()
            && params.btime_ms.is_none()
        {
            return Ok(Err("expected depth, movetime, perft, or clock times".to_owned()));
        }

        let timer = resolve_timer(&params, self.game_state.side_to_move);
        let config = SearchConfig {
            max_depth: params.depth.unwrap_or(DEFAULT_SEARCH_DEPTH),
            timer,
        };

        let result = search_position(&mut self.game_state, config);
        for info in &result.info_lines {
            writeln!(out, "{info}")?;
        }
        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {}", move_to_string(mv))?,
            None => writeln!(out, "bestmove 0000")?,
        }

        Ok(Ok(()))
    }
}

fn parse_go_params(line: &str) -> Result<GoParams, String> {
    let mut params = GoParams::default();
    let mut tokens = line.split_whitespace();
    let _ = tokens.next(); // go

    while let Some(token) = tokens.next() {
        match token {
            "depth" => params.depth = Some(parse_value(token, tokens.next())?),
            "perft" => params.perft_depth = Some(parse_value(token, tokens.next())?),
            "movetime" => params.movetime_ms = Some(parse_value(token, tokens.next())?),
            "wtime" => params.wtime_ms = Some(parse_value(token, tokens.next())?),
            "btime" => params.btime_ms = Some(parse_value(token, tokens.next())?),
            "winc" => params.winc_ms = Some(parse_value(token, tokens.next())?),
            "binc" => params.binc_ms = Some(parse_value(token, tokens.next())?),
            "infinite" => {}
            _ => {
                // Unknown go arguments are ignored, as GUIs send many.
            }
        }
    }

    if let Some(depth) = params.depth {
        if depth == 0 {
            return Err("depth must be at least 1".to_owned());
        }
    }
    if let Some(depth) = params.perft_depth {
        if depth == 0 {
            return Err("perft depth must be at least 1".to_owned());
        }
    }

    Ok(params)
}

fn parse_value<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("missing value for '{name}'"))?;
    value
        .parse::<T>()
        .map_err(|_| format!("invalid value '{value}' for '{name}'"))
}
