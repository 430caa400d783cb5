//! Piece-square tables
//!
//! Built once at startup: for every piece and square, the piece's material
//! value plus a positional bonus, as a tapered [`Score`].
//!
//! Bonuses are written from white's point of view. Pawns use a full 8×8 table
//! since pawn play is not left-right symmetric. Every other piece uses an 8×4
//! table over files A..D, mirrored onto E..H. Black entries are the negated
//! white entries of the vertically mirrored square, so a symmetric position
//! always sums to zero.

use std::sync::OnceLock;

use crate::board::BoardView;
use crate::constants::PIECE_VALUE;
use crate::types::*;

const fn s(mg: i32, eg: i32) -> Score {
    Score::new(mg, eg)
}

const ZERO_HALF_BOARD: [[Score; 4]; 8] = [[Score::ZERO; 4]; 8];

/// Bonus by [piece kind][rank][min(file, 7 - file)]
const BONUS: [[[Score; 4]; 8]; 6] = [
    // Pawn (uses PAWN_BONUS instead)
    ZERO_HALF_BOARD,
    // Knight
    [
        [s(-175, -96), s(-92, -65), s(-74, -49), s(-73, -21)],
        [s(-77, -67), s(-41, -54), s(-27, -18), s(-15, 8)],
        [s(-61, -40), s(-17, -27), s(6, -8), s(12, 29)],
        [s(-35, -35), s(8, -2), s(40, 13), s(49, 28)],
        [s(-34, -45), s(13, -16), s(44, 9), s(51, 39)],
        [s(-9, -51), s(22, -44), s(58, -16), s(53, 17)],
        [s(-67, -69), s(-27, -50), s(4, -51), s(37, 12)],
        [s(-201, -100), s(-83, -88), s(-56, -56), s(-26, -17)],
    ],
    // Bishop
    [
        [s(-53, -57), s(-5, -30), s(-8, -37), s(-23, -12)],
        [s(-15, -37), s(8, -13), s(19, -17), s(4, 1)],
        [s(-7, -16), s(21, -1), s(-5, -2), s(17, 10)],
        [s(-5, -20), s(11, -6), s(25, 0), s(39, 17)],
        [s(-12, -17), s(29, -1), s(22, -14), s(31, 15)],
        [s(-16, -30), s(6, 6), s(1, 4), s(11, 6)],
        [s(-17, -31), s(-14, -20), s(5, -1), s(0, 1)],
        [s(-48, -46), s(1, -42), s(-14, -37), s(-23, -24)],
    ],
    // Rook
    [
        [s(-31, -9), s(-20, -13), s(-14, -10), s(-5, -9)],
        [s(-21, -12), s(-13, -9), s(-8, -1), s(6, -2)],
        [s(-25, 6), s(-11, -8), s(-1, -2), s(3, -6)],
        [s(-13, -6), s(-5, 1), s(-4, -9), s(-6, 7)],
        [s(-27, -5), s(-15, 8), s(-4, 7), s(3, -6)],
        [s(-22, 6), s(-2, 1), s(6, -7), s(12, 10)],
        [s(-2, 4), s(12, 5), s(16, 20), s(18, -5)],
        [s(-17, 18), s(-19, 0), s(-1, 19), s(9, 13)],
    ],
    // Queen
    [
        [s(3, -69), s(-5, -57), s(-5, -47), s(4, -26)],
        [s(-3, -55), s(5, -31), s(8, -22), s(12, -4)],
        [s(-3, -39), s(6, -18), s(13, -9), s(7, 3)],
        [s(4, -23), s(5, -3), s(9, 13), s(8, 24)],
        [s(0, -29), s(14, -6), s(12, 9), s(5, 21)],
        [s(-4, -38), s(10, -18), s(6, -12), s(8, 1)],
        [s(-5, -50), s(6, -27), s(10, -24), s(8, -8)],
        [s(-2, -75), s(-2, -52), s(1, -43), s(-2, -36)],
    ],
    // King
    [
        [s(271, 1), s(327, 45), s(271, 85), s(198, 76)],
        [s(278, 53), s(303, 100), s(234, 133), s(179, 135)],
        [s(195, 88), s(258, 130), s(169, 169), s(120, 175)],
        [s(164, 103), s(190, 156), s(138, 172), s(98, 172)],
        [s(154, 96), s(179, 166), s(105, 199), s(70, 199)],
        [s(123, 92), s(145, 172), s(81, 184), s(31, 191)],
        [s(88, 47), s(120, 121), s(65, 116), s(33, 131)],
        [s(59, 11), s(89, 59), s(45, 73), s(-1, 78)],
    ],
];

/// Pawn bonus by [rank][file]
const PAWN_BONUS: [[Score; 8]; 8] = [
    [Score::ZERO; 8],
    [s(3, -10), s(3, -6), s(10, 10), s(19, 0), s(16, 14), s(19, 7), s(7, -5), s(-5, -19)],
    [s(-9, -10), s(-15, -10), s(11, -10), s(15, 4), s(32, 4), s(22, 3), s(5, -6), s(-22, -4)],
    [s(-8, 6), s(-23, -2), s(6, -8), s(20, -4), s(40, -13), s(17, -12), s(4, -10), s(-12, -9)],
    [s(13, 9), s(0, 4), s(-13, 3), s(1, -12), s(11, -12), s(-2, -6), s(-13, 13), s(5, 8)],
    [s(-5, 28), s(-12, 20), s(-7, 21), s(22, 28), s(-8, 30), s(-5, 7), s(-15, 6), s(-18, 13)],
    [s(-7, 0), s(7, -11), s(-3, 12), s(-13, 21), s(5, 25), s(-16, 19), s(10, 4), s(-8, 7)],
    [Score::ZERO; 8],
];

/// Material plus positional score by piece and square
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceSquareTable {
    psq: [[Score; 64]; Piece::COUNT],
}

impl PieceSquareTable {
    #[inline]
    pub fn get(&self, piece: Piece, square: Square) -> Score {
        self.psq[piece.index()][square.index()]
    }

    /// Sum of every piece's entry on `board`, white minus black
    pub fn score<B: BoardView + ?Sized>(&self, board: &B) -> Score {
        let mut total = Score::ZERO;
        for piece in Piece::all() {
            for square in board.pieces(piece.color, piece.kind) {
                total += self.get(piece, square);
            }
        }
        total
    }
}

/// Non-pawn material a piece contributes to each side's running total
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NonPawnMaterial {
    pub white: i32,
    pub black: i32,
}

impl std::ops::Add for NonPawnMaterial {
    type Output = NonPawnMaterial;

    fn add(self, rhs: NonPawnMaterial) -> NonPawnMaterial {
        NonPawnMaterial {
            white: self.white + rhs.white,
            black: self.black + rhs.black,
        }
    }
}

/// Material values by piece, identical for both colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialTables {
    piece_value: [[i32; Piece::COUNT]; 2],
    non_pawn: [NonPawnMaterial; Piece::COUNT],
}

impl MaterialTables {
    #[inline]
    pub fn piece_value(&self, phase: Phase, piece: Piece) -> i32 {
        self.piece_value[phase as usize][piece.index()]
    }

    /// Middlegame value of a knight, bishop, rook or queen, credited to the
    /// piece's own color; zero for pawns and kings
    #[inline]
    pub fn non_pawn(&self, piece: Piece) -> NonPawnMaterial {
        self.non_pawn[piece.index()]
    }

    /// Non-pawn material of both sides on `board`
    pub fn non_pawn_material<B: BoardView + ?Sized>(&self, board: &B) -> NonPawnMaterial {
        Piece::all()
            .map(|p| {
                let count = board.pieces(p.color, p.kind).count_ones() as i32;
                let per_piece = self.non_pawn(p);
                NonPawnMaterial {
                    white: per_piece.white * count,
                    black: per_piece.black * count,
                }
            })
            .fold(NonPawnMaterial::default(), |acc, m| acc + m)
    }
}

/// Build the piece-square and material tables from the constant bonuses
pub fn build() -> (PieceSquareTable, MaterialTables) {
    let mut psq = [[Score::ZERO; 64]; Piece::COUNT];
    let mut piece_value = [[0; Piece::COUNT]; 2];
    let mut non_pawn = [NonPawnMaterial::default(); Piece::COUNT];

    for kind in PieceType::ALL {
        let white = Piece::new(Color::White, kind);
        let black = Piece::new(Color::Black, kind);
        let (mg, eg) = (PIECE_VALUE[0][kind.index()], PIECE_VALUE[1][kind.index()]);

        for piece in [white, black] {
            piece_value[Phase::Middlegame as usize][piece.index()] = mg;
            piece_value[Phase::Endgame as usize][piece.index()] = eg;
        }

        if kind != PieceType::Pawn && kind != PieceType::King {
            non_pawn[white.index()] = NonPawnMaterial { white: mg, black: 0 };
            non_pawn[black.index()] = NonPawnMaterial { white: 0, black: mg };
        }

        let value = Score::new(mg, eg);
        for sq in Square::all() {
            let (file, rank) = (sq.file() as usize, sq.rank() as usize);
            let bonus = if kind == PieceType::Pawn {
                PAWN_BONUS[rank][file]
            } else {
                BONUS[kind.index()][rank][file.min(7 - file)]
            };
            let entry = value + bonus;
            psq[white.index()][sq.index()] = entry;
            psq[black.index()][sq.flip_rank().index()] = -entry;
        }
    }

    (
        PieceSquareTable { psq },
        MaterialTables {
            piece_value,
            non_pawn,
        },
    )
}

static TABLES: OnceLock<(PieceSquareTable, MaterialTables)> = OnceLock::new();

/// Build the process-wide tables
pub fn init() {
    if TABLES.get().is_none() {
        TABLES.get_or_init(build);
        tracing::debug!("[TABLES] Piece-square tables initialized");
    }
}

/// Process-wide piece-square table
#[inline]
pub fn psqt() -> &'static PieceSquareTable {
    &TABLES.get_or_init(build).0
}

/// Process-wide material tables
#[inline]
pub fn material() -> &'static MaterialTables {
    &TABLES.get_or_init(build).1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_black_entries_mirror_white() {
        let (table, _) = build();
        for kind in PieceType::ALL {
            for square in Square::all() {
                assert_eq!(
                    table.get(Piece::new(Color::Black, kind), square.flip_rank()),
                    -table.get(Piece::new(Color::White, kind), square),
                    "mirroring failed for {:?} on {}",
                    kind,
                    square
                );
            }
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(build(), build());
        assert_eq!(psqt(), &build().0);
    }

    #[test]
    fn test_known_entries() {
        let (table, _) = build();
        let white_knight = Piece::new(Color::White, PieceType::Knight);
        assert_eq!(table.get(white_knight, Square::A1), Score::new(782 - 175, 865 - 96));
        // h1 mirrors a1 across the board's vertical axis
        assert_eq!(table.get(white_knight, Square::H1), table.get(white_knight, Square::A1));

        let white_pawn = Piece::new(Color::White, PieceType::Pawn);
        assert_eq!(table.get(white_pawn, sq("e4")), Score::new(128 + 40, 213 - 13));
        // Pawn table is not left-right symmetric
        assert_ne!(table.get(white_pawn, sq("d4")), table.get(white_pawn, sq("e4")));

        let white_king = Piece::new(Color::White, PieceType::King);
        assert_eq!(table.get(white_king, Square::E1), Score::new(198, 76));

        let black_king = Piece::new(Color::Black, PieceType::King);
        assert_eq!(table.get(black_king, sq("e8")), Score::new(-198, -76));
    }

    #[test]
    fn test_starting_position_sums_to_zero() {
        let board = Position::startpos();
        assert_eq!(psqt().score(&board), Score::ZERO);
    }

    #[test]
    fn test_material_tables() {
        let (_, material) = build();
        let white_rook = Piece::new(Color::White, PieceType::Rook);
        let black_rook = Piece::new(Color::Black, PieceType::Rook);
        assert_eq!(material.piece_value(Phase::Middlegame, white_rook), 1289);
        assert_eq!(material.piece_value(Phase::Endgame, black_rook), 1378);

        assert_eq!(material.non_pawn(white_rook), NonPawnMaterial { white: 1289, black: 0 });
        assert_eq!(material.non_pawn(black_rook), NonPawnMaterial { white: 0, black: 1289 });
        assert_eq!(
            material.non_pawn(Piece::new(Color::White, PieceType::Pawn)),
            NonPawnMaterial::default()
        );
        assert_eq!(
            material.non_pawn(Piece::new(Color::Black, PieceType::King)),
            NonPawnMaterial::default()
        );

        let npm = material.non_pawn_material(&Position::startpos());
        let per_side = 2 * 782 + 2 * 830 + 2 * 1289 + 2529;
        assert_eq!(npm, NonPawnMaterial { white: per_side, black: per_side });
    }
}
