//! # BitSet - Board Squares as a 64-bit Set
//!
//! ## Overview
//!
//! Every square set the evaluator touches (pawns of one color, attack spans,
//! file and rank masks) is a single `u64` wrapped in [`BitSet`]. Set algebra
//! maps directly onto CPU bitwise instructions, and counting members is a
//! single POPCNT.
//!
//! ## Square Mapping
//!
//! - Bit 0 = A1 (bottom-left for white)
//! - Bit 7 = H1 (bottom-right for white)
//! - Bit 56 = A8 (top-left for white)
//! - Bit 63 = H8 (top-right for white)
//!
//! ## Shifting
//!
//! [`BitSet::shift`] moves every member one step in a [`Direction`]. Diagonal
//! and sideways shifts mask off the edge file first so that squares never wrap
//! around from the H-file to the A-file (or back).
//!
//! ## Further Reading
//!
//! - **Chess Programming Wiki - Bitboards**: https://www.chessprogramming.org/Bitboards
//! - **General Setwise Operations**: https://www.chessprogramming.org/General_Setwise_Operations

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use serde::{Deserialize, Serialize};

use super::constants::{FILE_A_BB, FILE_H_BB};
use super::types::{Color, Direction, Square};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSet(pub u64);

impl BitSet {
    pub const EMPTY: BitSet = BitSet(0);

    pub const fn new() -> Self {
        BitSet(0)
    }

    #[inline]
    pub const fn from_square(square: Square) -> Self {
        BitSet(1u64 << square.index())
    }

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.index();
    }

    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u64 << square.index());
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & (1u64 << square.index())) != 0
    }

    #[inline]
    pub const fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_not_empty(&self) -> bool {
        self.0 != 0
    }

    /// True when at least two squares are set
    #[inline]
    pub const fn more_than_one(&self) -> bool {
        (self.0 & self.0.wrapping_sub(1)) != 0
    }

    /// Lowest set square. The set must not be empty.
    #[inline]
    pub fn lsb(&self) -> Square {
        debug_assert!(self.is_not_empty(), "lsb of an empty BitSet");
        Square::new(self.0.trailing_zeros() as u8)
    }

    /// Highest set square. The set must not be empty.
    #[inline]
    pub fn msb(&self) -> Square {
        debug_assert!(self.is_not_empty(), "msb of an empty BitSet");
        Square::new(63 - self.0.leading_zeros() as u8)
    }

    /// Removes and returns the lowest set square
    #[inline]
    pub fn pop_lsb(&mut self) -> Square {
        let square = self.lsb();
        self.0 &= self.0 - 1;
        square
    }

    /// Square of the set closest to `color`'s own back rank
    #[inline]
    pub fn backmost(&self, color: Color) -> Square {
        match color {
            Color::White => self.lsb(),
            Color::Black => self.msb(),
        }
    }

    /// Square of the set furthest advanced from `color`'s point of view
    #[inline]
    pub fn frontmost(&self, color: Color) -> Square {
        match color {
            Color::White => self.msb(),
            Color::Black => self.lsb(),
        }
    }

    /// Moves every square one step towards `direction`, dropping squares that
    /// would leave the board
    #[inline]
    pub const fn shift(self, direction: Direction) -> Self {
        let b = self.0;
        BitSet(match direction {
            Direction::North => b << 8,
            Direction::South => b >> 8,
            Direction::East => (b & !FILE_H_BB) << 1,
            Direction::West => (b & !FILE_A_BB) >> 1,
            Direction::NorthEast => (b & !FILE_H_BB) << 9,
            Direction::NorthWest => (b & !FILE_A_BB) << 7,
            Direction::SouthEast => (b & !FILE_H_BB) >> 7,
            Direction::SouthWest => (b & !FILE_A_BB) >> 9,
        })
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl From<Square> for BitSet {
    #[inline]
    fn from(square: Square) -> Self {
        BitSet::from_square(square)
    }
}

impl BitAnd for BitSet {
    type Output = BitSet;

    #[inline]
    fn bitand(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 & rhs.0)
    }
}

impl BitOr for BitSet {
    type Output = BitSet;

    #[inline]
    fn bitor(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 | rhs.0)
    }
}

impl BitXor for BitSet {
    type Output = BitSet;

    #[inline]
    fn bitxor(self, rhs: BitSet) -> BitSet {
        BitSet(self.0 ^ rhs.0)
    }
}

impl Not for BitSet {
    type Output = BitSet;

    #[inline]
    fn not(self) -> BitSet {
        BitSet(!self.0)
    }
}

impl BitAndAssign for BitSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: BitSet) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for BitSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: BitSet) {
        self.0 |= rhs.0;
    }
}

impl BitXorAssign for BitSet {
    #[inline]
    fn bitxor_assign(&mut self, rhs: BitSet) {
        self.0 ^= rhs.0;
    }
}

/// Iterates the set from the lowest square upwards
pub struct SquareIter(u64);

impl Iterator for SquareIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = Square::new(self.0.trailing_zeros() as u8);
        self.0 &= self.0 - 1;
        Some(square)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for BitSet {
    type Item = Square;
    type IntoIter = SquareIter;

    fn into_iter(self) -> SquareIter {
        SquareIter(self.0)
    }
}
