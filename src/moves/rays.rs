//! Directional ray tables and blocker-aware sliding attacks.
//!
//! Eight rays per square, each terminating at the board edge. A sliding
//! attack is the full ray XOR the ray of the first blocker on it: rays that
//! advance toward higher square indices (south, east, south-east,
//! south-west) find that blocker with a forward bit scan, the other four
//! with a reverse scan. Square 0 is a8, so "north" means toward rank 8 and
//! a smaller index.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
            Direction::NorthEast => 4,
            Direction::NorthWest => 5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 7,
        }
    }

    /// (file step, row step) in the rank-8-first numbering.
    #[inline]
    const fn steps(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// True when the ray advances toward higher square indices, meaning the
    /// nearest blocker is the lowest set bit.
    #[inline]
    const fn scans_forward(self) -> bool {
        matches!(
            self,
            Direction::South | Direction::East | Direction::SouthEast | Direction::SouthWest
        )
    }
}

const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthEast,
    Direction::SouthWest,
];

pub const RAYS: [[u64; 64]; 8] = generate_rays();

#[inline]
pub const fn ray(direction: Direction, square: u8) -> u64 {
    RAYS[direction.index()][square as usize]
}

#[inline]
pub fn bit_scan_forward(bitboard: u64) -> u8 {
    debug_assert!(bitboard != 0);
    bitboard.trailing_zeros() as u8
}

#[inline]
pub fn bit_scan_reverse(bitboard: u64) -> u8 {
    debug_assert!(bitboard != 0);
    (63 - bitboard.leading_zeros()) as u8
}

/// Attack set along one ray given the blocker occupancy. The first blocker
/// itself stays attackable; everything beyond it is trimmed.
#[inline]
pub fn ray_attacks(direction: Direction, square: u8, blockers: u64) -> u64 {
    let full_ray = ray(direction, square);
    let blocked = full_ray & blockers;
    if blocked == 0 {
        return full_ray;
    }

    let first_blocker = if direction.scans_forward() {
        bit_scan_forward(blocked)
    } else {
        bit_scan_reverse(blocked)
    };

    full_ray ^ ray(direction, first_blocker)
}

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut table = [[0u64; 64]; 8];
    let mut dir = 0usize;

    while dir < 8 {
        let (file_step, row_step) = ALL_DIRECTIONS[dir].steps();
        let mut sq = 0usize;

        while sq < 64 {
            table[dir][sq] = trace_ray(sq as i32, file_step, row_step);
            sq += 1;
        }

        dir += 1;
    }

    table
}

const fn trace_ray(square: i32, file_step: i32, row_step: i32) -> u64 {
    let mut file = (square % 8) + file_step;
    let mut row = (square / 8) + row_step;
    let mut attacks = 0u64;

    while file >= 0 && file < 8 && row >= 0 && row < 8 {
        attacks |= 1u64 << ((row as usize) * 8 + (file as usize));
        file += file_step;
        row += row_step;
    }

    attacks
}
