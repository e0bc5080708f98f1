pub mod attack_checks;
pub mod generator;
pub mod make_unmake;
pub mod perft;
