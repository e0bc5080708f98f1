//! Core board state representation.
//!
//! `GameState` stores the twelve piece bitboards, derived occupancy caches,
//! side to move, castling rights, and the en-passant target. It is mutated
//! only through `make_move`/`unmake_move` and FEN parsing.

use crate::errors::FenError;
use crate::game_state::chess_types::*;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Derived occupancy caches, rebuilt after every mutation.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // Advisory half-move count since the position was set up.
    pub move_counter: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            move_counter: 0,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    /// Rebuilds both color occupancies and their union from the piece
    /// bitboards. Call after any direct bitboard mutation.
    #[inline]
    pub fn refresh_occupancies(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all =
            self.occupancy_by_color[Color::Light.index()] | self.occupancy_by_color[Color::Dark.index()];
    }

    #[inline]
    pub fn piece_on_square_for_color(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = 1u64 << square;
        for piece in ALL_PIECE_KINDS {
            if (self.pieces[color.index()][piece.index()] & mask) != 0 {
                return Some(piece);
            }
        }
        None
    }

    #[inline]
    pub fn piece_on_square(&self, square: Square) -> Option<(Color, PieceKind)> {
        if let Some(piece) = self.piece_on_square_for_color(Color::Light, square) {
            return Some((Color::Light, piece));
        }
        if let Some(piece) = self.piece_on_square_for_color(Color::Dark, square) {
            return Some((Color::Dark, piece));
        }
        None
    }
}
