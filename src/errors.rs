//! Error types surfaced by the engine core.

use thiserror::Error;

/// Failure while parsing a FEN string. The board is left untouched; callers
/// that need a playable position fall back to the starting position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("missing FEN field: {0}")]
    MissingField(&'static str),
    #[error("board layout must contain 8 ranks")]
    BadRankCount,
    #[error("invalid piece character '{0}' in board layout")]
    BadPieceChar(char),
    #[error("rank does not sum to 8 files")]
    BadRankWidth,
    #[error("invalid side-to-move field: {0}")]
    BadSideToMove(String),
    #[error("invalid castling rights character: {0}")]
    BadCastlingChar(char),
    #[error("invalid square: {0}")]
    BadSquare(String),
    #[error("invalid move counter field: {0}")]
    BadCounter(String),
}

/// A move string that is syntactically malformed or matches no generated
/// pseudo-legal move in the current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("invalid long algebraic move: {0}")]
    BadSyntax(String),
    #[error("invalid square: {0}")]
    BadSquare(String),
    #[error("invalid promotion piece character: {0}")]
    BadPromotionChar(char),
    #[error("move {0} matches no pseudo-legal move in this position")]
    NoMatchingMove(String),
}

/// A pseudo-legal move that would leave the mover's own king attacked.
/// `make_move` has already restored the board when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("move leaves own king in check")]
pub struct IllegalMove;
