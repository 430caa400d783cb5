//! Precomputed square-set tables
//!
//! Computes, once per process, every per-square mask the pawn and king
//! evaluators query: adjacent files, forward ranks and files, pawn attacks,
//! pawn attack spans, passed-pawn spans and Chebyshev distance rings.
//!
//! ## Performance Characteristics
//!
//! - **Initialization time**: a few microseconds (64 squares × 2 colors)
//! - **Memory usage**: ~12KB of per-square masks and distance rings
//! - **Lookup time**: O(1) - direct array access
//!
//! ## Initialization
//!
//! Tables live in a process-wide `OnceLock`. [`init`] builds them eagerly and
//! should be called during startup before search threads exist; any lookup
//! made before that builds them on first use. Once built they are immutable
//! and may be read from any number of threads.

use std::sync::OnceLock;

use super::bitset::BitSet;
use super::constants::{FILE_A_BB, RANK_1_BB};
use super::types::{Color, Direction, File, Rank, Square};

struct Tables {
    adjacent_files: [BitSet; 8],
    forward_ranks: [[BitSet; 8]; 2],
    forward_file: [[BitSet; 64]; 2],
    pawn_attacks: [[BitSet; 64]; 2],
    pawn_attack_span: [[BitSet; 64]; 2],
    passed_pawn_span: [[BitSet; 64]; 2],
    distance_ring: [[BitSet; 8]; 64],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Build all square tables
///
/// Calling this more than once is harmless; later calls return immediately.
pub fn init() {
    if TABLES.get().is_none() {
        tables();
        tracing::debug!("[TABLES] Square tables initialized");
    }
}

#[inline]
fn tables() -> &'static Tables {
    TABLES.get_or_init(Tables::build)
}

impl Tables {
    fn build() -> Self {
        let mut t = Tables {
            adjacent_files: [BitSet::EMPTY; 8],
            forward_ranks: [[BitSet::EMPTY; 8]; 2],
            forward_file: [[BitSet::EMPTY; 64]; 2],
            pawn_attacks: [[BitSet::EMPTY; 64]; 2],
            pawn_attack_span: [[BitSet::EMPTY; 64]; 2],
            passed_pawn_span: [[BitSet::EMPTY; 64]; 2],
            distance_ring: [[BitSet::EMPTY; 8]; 64],
        };

        for f in 0..8u8 {
            let mut adjacent = BitSet::EMPTY;
            if f > 0 {
                adjacent |= file_bb(f - 1);
            }
            if f < 7 {
                adjacent |= file_bb(f + 1);
            }
            t.adjacent_files[f as usize] = adjacent;
        }

        // Ranks strictly ahead of `r` for each color
        for r in 0..8u8 {
            let mut white = BitSet::EMPTY;
            for ahead in (r + 1)..8 {
                white |= rank_bb(ahead);
            }
            let mut black = BitSet::EMPTY;
            for behind in 0..r {
                black |= rank_bb(behind);
            }
            t.forward_ranks[Color::White.index()][r as usize] = white;
            t.forward_ranks[Color::Black.index()][r as usize] = black;
        }

        for s in Square::all() {
            for color in Color::ALL {
                let c = color.index();
                let ahead = t.forward_ranks[c][s.rank() as usize];
                let adjacent = t.adjacent_files[s.file() as usize];

                t.forward_file[c][s.index()] = ahead & file_bb(s.file());
                t.pawn_attacks[c][s.index()] = pawn_attacks_bb(BitSet::from(s), color);
                t.pawn_attack_span[c][s.index()] = ahead & adjacent;
                t.passed_pawn_span[c][s.index()] = ahead & (adjacent | file_bb(s.file()));
            }

            for other in Square::all() {
                let file_gap = s.file().abs_diff(other.file());
                let rank_gap = s.rank().abs_diff(other.rank());
                let d = file_gap.max(rank_gap);
                if s != other {
                    t.distance_ring[s.index()][d as usize].insert(other);
                }
            }
        }

        t
    }
}

#[inline]
pub const fn file_bb(f: File) -> BitSet {
    BitSet(FILE_A_BB << f)
}

#[inline]
pub const fn rank_bb(r: Rank) -> BitSet {
    BitSet(RANK_1_BB << (8 * r))
}

/// Files directly left and right of `f`
#[inline]
pub fn adjacent_files_bb(f: File) -> BitSet {
    tables().adjacent_files[f as usize]
}

/// All ranks strictly ahead of rank `r` from `color`'s point of view
#[inline]
pub fn forward_ranks_bb(color: Color, r: Rank) -> BitSet {
    tables().forward_ranks[color.index()][r as usize]
}

/// Squares ahead of `s` on its own file
#[inline]
pub fn forward_file_bb(color: Color, s: Square) -> BitSet {
    tables().forward_file[color.index()][s.index()]
}

/// Squares a `color` pawn on `s` attacks
#[inline]
pub fn pawn_attacks(color: Color, s: Square) -> BitSet {
    tables().pawn_attacks[color.index()][s.index()]
}

/// Squares a `color` pawn on `s` could ever attack while advancing
#[inline]
pub fn pawn_attack_span(color: Color, s: Square) -> BitSet {
    tables().pawn_attack_span[color.index()][s.index()]
}

/// Squares ahead of `s` on its own and adjacent files
#[inline]
pub fn passed_pawn_span(color: Color, s: Square) -> BitSet {
    tables().passed_pawn_span[color.index()][s.index()]
}

/// Squares at exactly distance `d` from `s`
#[inline]
pub fn distance_ring(s: Square, d: u8) -> BitSet {
    tables().distance_ring[s.index()][d as usize]
}

/// Every square attacked by at least one pawn of the set
#[inline]
pub fn pawn_attacks_bb(pawns: BitSet, color: Color) -> BitSet {
    match color {
        Color::White => pawns.shift(Direction::NorthWest) | pawns.shift(Direction::NorthEast),
        Color::Black => pawns.shift(Direction::SouthWest) | pawns.shift(Direction::SouthEast),
    }
}

/// Squares attacked by two pawns of the set at once
#[inline]
pub fn pawn_double_attacks_bb(pawns: BitSet, color: Color) -> BitSet {
    match color {
        Color::White => pawns.shift(Direction::NorthWest) & pawns.shift(Direction::NorthEast),
        Color::Black => pawns.shift(Direction::SouthWest) & pawns.shift(Direction::SouthEast),
    }
}
