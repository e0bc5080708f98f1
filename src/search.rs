pub mod board_scoring;
pub mod context;
pub mod iterative_deepening;
pub mod ordering;
pub mod time_control;
