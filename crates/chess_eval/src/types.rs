//! # Evaluation Core Types
//!
//! ## Overview
//!
//! Small `Copy` types shared by every part of the evaluator:
//!
//! - [`Color`] and [`PieceType`], combined into a [`Piece`]
//! - [`Square`], a 0-63 index with A1 = 0 and H8 = 63
//! - [`Direction`], the eight one-step moves used for bitboard shifts
//! - [`Score`], a tapered (middlegame, endgame) value pair
//! - [`CastlingRights`], the four castling permissions as a bit set
//!
//! ## Tapered Scores
//!
//! Every evaluation term is a [`Score`] holding separate middlegame and
//! endgame values. The caller blends them by game phase later. Arithmetic is
//! componentwise, so terms can be summed without caring about the phase.
//! When two scores are compared to pick the "better" one, only the
//! middlegame component is used.
//!
//! ## Relative Ranks
//!
//! Pawn rules are written once, from the point of view of the side being
//! evaluated. [`Square::relative_rank`] returns the rank counted from that
//! side's own back rank, so a white pawn on e2 and a black pawn on e7 both
//! sit on relative rank 1 (0-based).

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Not, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ChessEngineError;

pub type File = u8;
pub type Rank = u8;

pub const FILE_B: File = 1;
pub const FILE_G: File = 6;
pub const FILE_H: File = 7;

pub const RANK_1: Rank = 0;
pub const RANK_2: Rank = 1;
pub const RANK_3: Rank = 2;
pub const RANK_5: Rank = 4;
pub const RANK_8: Rank = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction a pawn of this color advances in
    #[inline]
    pub const fn forward(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a FEN piece letter, uppercase for white
    pub fn from_fen_char(c: char) -> Option<(Color, PieceType)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some((color, kind))
    }
}

/// A colored piece, indexed 0..12 with all white pieces first
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
}

impl Piece {
    pub const COUNT: usize = 12;

    #[inline]
    pub const fn new(color: Color, kind: PieceType) -> Self {
        Piece { color, kind }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * 6 + self.kind.index()
    }

    /// All twelve pieces in index order
    pub fn all() -> impl Iterator<Item = Piece> {
        Color::ALL
            .into_iter()
            .flat_map(|color| PieceType::ALL.into_iter().map(move |kind| Piece::new(color, kind)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
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

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0);
    pub const C1: Square = Square(2);
    pub const E1: Square = Square(4);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const H8: Square = Square(63);

    #[inline]
    pub const fn new(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> File {
        self.0 & 7
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        self.0 >> 3
    }

    /// Rank counted from `color`'s own back rank
    #[inline]
    pub const fn relative_rank(self, color: Color) -> Rank {
        match color {
            Color::White => self.rank(),
            Color::Black => RANK_8 - self.rank(),
        }
    }

    /// The square as seen from `color`'s side of the board
    #[inline]
    pub const fn relative_square(self, color: Color) -> Square {
        match color {
            Color::White => self,
            Color::Black => self.flip_rank(),
        }
    }

    /// Vertical mirror through the board center (a1 <-> a8)
    #[inline]
    pub const fn flip_rank(self) -> Square {
        Square(self.0 ^ 0x38)
    }

    /// The square one step ahead from `color`'s point of view
    #[inline]
    pub const fn forward(self, color: Color) -> Square {
        match color {
            Color::White => {
                debug_assert!(self.0 < 56);
                Square(self.0 + 8)
            }
            Color::Black => {
                debug_assert!(self.0 >= 8);
                Square(self.0 - 8)
            }
        }
    }

    /// The square one step behind from `color`'s point of view
    #[inline]
    pub const fn backward(self, color: Color) -> Square {
        self.forward(match color {
            Color::White => Color::Black,
            Color::Black => Color::White,
        })
    }

    /// Color of the square itself; a1 is dark
    #[inline]
    pub const fn shade(self) -> Color {
        if (self.file() + self.rank()) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl FromStr for Square {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessEngineError::InvalidSquareName { name: s.to_string() });
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file >= 8 || rank >= 8 {
            return Err(ChessEngineError::InvalidSquareName { name: s.to_string() });
        }
        Ok(Square::from_coords(file, rank))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

/// A (middlegame, endgame) value pair
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

impl Score {
    pub const ZERO: Score = Score { mg: 0, eg: 0 };

    #[inline]
    pub const fn new(mg: i32, eg: i32) -> Self {
        Score { mg, eg }
    }
}

impl Add for Score {
    type Output = Score;

    #[inline]
    fn add(self, rhs: Score) -> Score {
        Score::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl Sub for Score {
    type Output = Score;

    #[inline]
    fn sub(self, rhs: Score) -> Score {
        Score::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl Neg for Score {
    type Output = Score;

    #[inline]
    fn neg(self) -> Score {
        Score::new(-self.mg, -self.eg)
    }
}

impl Mul<i32> for Score {
    type Output = Score;

    #[inline]
    fn mul(self, rhs: i32) -> Score {
        Score::new(self.mg * rhs, self.eg * rhs)
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.mg, self.eg)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// Where the king lands after castling, from white's point of view
    #[inline]
    pub const fn king_destination(self) -> Square {
        match self {
            CastlingSide::KingSide => Square::G1,
            CastlingSide::QueenSide => Square::C1,
        }
    }
}

/// The four castling permissions, one bit each
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KING_SIDE: CastlingRights = CastlingRights(1);
    pub const WHITE_QUEEN_SIDE: CastlingRights = CastlingRights(2);
    pub const BLACK_KING_SIDE: CastlingRights = CastlingRights(4);
    pub const BLACK_QUEEN_SIDE: CastlingRights = CastlingRights(8);
    pub const ALL: CastlingRights = CastlingRights(15);

    #[inline]
    pub const fn of(color: Color, side: CastlingSide) -> CastlingRights {
        let bit = match side {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => 2,
        };
        CastlingRights(bit << (2 * color as u8))
    }

    /// Only the rights belonging to `color`
    #[inline]
    pub const fn for_color(self, color: Color) -> CastlingRights {
        CastlingRights(self.0 & (3 << (2 * color as u8)))
    }

    #[inline]
    pub const fn contains(self, other: CastlingRights) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: CastlingRights) {
        self.0 |= other.0;
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Middlegame = 0,
    Endgame = 1,
}
