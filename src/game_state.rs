pub mod chess_types;
pub mod game_state;
pub mod undo_state;

pub use chess_types::*;
