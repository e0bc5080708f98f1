//! Bishop attacks: the four diagonal rays, trimmed by blockers.

use crate::moves::rays::{ray_attacks, Direction};

#[inline]
pub fn bishop_attacks(square: u8, blockers: u64) -> u64 {
    ray_attacks(Direction::NorthEast, square, blockers)
        | ray_attacks(Direction::NorthWest, square, blockers)
        | ray_attacks(Direction::SouthEast, square, blockers)
        | ray_attacks(Direction::SouthWest, square, blockers)
}
