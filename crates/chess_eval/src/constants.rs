//! # Evaluation Constants - Board Masks & Material Values
//!
//! ## Overview
//!
//! Fixed values shared across the evaluator: file and rank masks, square
//! shades, the standard starting position, and material values for each
//! piece kind.
//!
//! ## Material Values
//!
//! Values are in internal units where a middlegame pawn is worth 128. Each
//! piece has separate middlegame and endgame values, since minor pieces and
//! pawns gain relative weight as the board empties:
//!
//! | Piece  | Middlegame | Endgame |
//! |--------|-----------:|--------:|
//! | Pawn   |        128 |     213 |
//! | Knight |        782 |     865 |
//! | Bishop |        830 |     918 |
//! | Rook   |       1289 |    1378 |
//! | Queen  |       2529 |    2687 |
//!
//! The king has no material value; its placement is scored purely by the
//! piece-square table.

pub const FILE_A_BB: u64 = 0x0101_0101_0101_0101;
pub const FILE_H_BB: u64 = FILE_A_BB << 7;
pub const RANK_1_BB: u64 = 0xFF;

pub const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;
pub const LIGHT_SQUARES: u64 = !DARK_SQUARES;

pub const PAWN_VALUE_MG: i32 = 128;
pub const PAWN_VALUE_EG: i32 = 213;
pub const KNIGHT_VALUE_MG: i32 = 782;
pub const KNIGHT_VALUE_EG: i32 = 865;
pub const BISHOP_VALUE_MG: i32 = 830;
pub const BISHOP_VALUE_EG: i32 = 918;
pub const ROOK_VALUE_MG: i32 = 1289;
pub const ROOK_VALUE_EG: i32 = 1378;
pub const QUEEN_VALUE_MG: i32 = 2529;
pub const QUEEN_VALUE_EG: i32 = 2687;

/// Material value by [phase][piece kind]
pub const PIECE_VALUE: [[i32; 6]; 2] = [
    [PAWN_VALUE_MG, KNIGHT_VALUE_MG, BISHOP_VALUE_MG, ROOK_VALUE_MG, QUEEN_VALUE_MG, 0],
    [PAWN_VALUE_EG, KNIGHT_VALUE_EG, BISHOP_VALUE_EG, ROOK_VALUE_EG, QUEEN_VALUE_EG, 0],
];

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
