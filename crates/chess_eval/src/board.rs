//! Board queries consumed by the evaluator
//!
//! The evaluator never owns a board. It reads piece placement through the
//! [`BoardView`] trait, so any engine board that can answer "which squares
//! hold this piece" can be evaluated. [`Position`] is a small concrete board
//! parsed from FEN, used by the host binary, the tests and the benchmarks.

use std::fmt;
use std::str::FromStr;

use super::bitset::BitSet;
use super::constants::STARTING_FEN;
use super::error::{ChessEngineError, ChessEngineResult};
use super::types::*;

/// Read-only piece placement queries
pub trait BoardView {
    /// Squares holding `kind` pieces of `color`
    fn pieces(&self, color: Color, kind: PieceType) -> BitSet;

    /// Square of `color`'s king
    fn king_square(&self, color: Color) -> Square;

    /// Castling rights still available to both sides
    fn castling_rights(&self) -> CastlingRights;

    /// Squares holding `kind` pieces of either color
    #[inline]
    fn pieces_of_kind(&self, kind: PieceType) -> BitSet {
        self.pieces(Color::White, kind) | self.pieces(Color::Black, kind)
    }

    /// True when `color` may still castle towards `side`
    #[inline]
    fn can_castle(&self, color: Color, side: CastlingSide) -> bool {
        self.castling_rights().contains(CastlingRights::of(color, side))
    }
}

/// Piece placement, side to move and castling rights
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    by_piece: [BitSet; Piece::COUNT],
    side_to_move: Color,
    castling: CastlingRights,
}

impl Position {
    /// Standard starting position
    pub fn startpos() -> Self {
        Self::from_fen(STARTING_FEN).expect("starting FEN is valid")
    }

    /// Parse the placement, side-to-move and castling fields of a FEN string
    ///
    /// The en passant, halfmove and fullmove fields are accepted but ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the placement does not describe 8 ranks of 8
    /// squares, contains an unknown piece letter, places a pawn on the first
    /// or eighth rank, or does not have exactly one king per side.
    pub fn from_fen(fen: &str) -> ChessEngineResult<Self> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| ChessEngineError::InvalidFen {
            message: "empty FEN string".to_string(),
        })?;

        let mut position = Position {
            by_piece: [BitSet::EMPTY; Piece::COUNT],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
        };

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ChessEngineError::InvalidFen {
                message: format!("expected 8 ranks, found {}", ranks.len()),
            });
        }

        // FEN lists rank 8 first
        for (i, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u8 = 0;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file = file
                        .checked_add(skip as u8)
                        .filter(|&f| skip > 0 && f <= 8)
                        .ok_or_else(|| ChessEngineError::InvalidFen {
                            message: format!("invalid empty-square count {:?} on rank {}", c, rank + 1),
                        })?;
                    continue;
                }
                if file >= 8 {
                    return Err(ChessEngineError::InvalidFen {
                        message: format!("rank {} has more than 8 squares", rank + 1),
                    });
                }
                let (color, kind) =
                    PieceType::from_fen_char(c).ok_or(ChessEngineError::InvalidPiece { piece: c })?;
                let square = Square::from_coords(file, rank);
                if kind == PieceType::Pawn && (rank == RANK_1 || rank == RANK_8) {
                    return Err(ChessEngineError::PawnOnBackRank {
                        square: square.to_string(),
                    });
                }
                position.by_piece[Piece::new(color, kind).index()].insert(square);
                file += 1;
            }
            if file != 8 {
                return Err(ChessEngineError::InvalidFen {
                    message: format!("rank {} has {} squares", rank + 1, file),
                });
            }
        }

        for color in Color::ALL {
            let count = position.pieces(color, PieceType::King).count_ones();
            if count != 1 {
                return Err(ChessEngineError::KingCount { color, count });
            }
        }

        if let Some(side) = fields.next() {
            position.side_to_move = match side {
                "w" => Color::White,
                "b" => Color::Black,
                other => {
                    return Err(ChessEngineError::InvalidFen {
                        message: format!("invalid side to move {:?}", other),
                    })
                }
            };
        }

        if let Some(castling) = fields.next() {
            if castling != "-" {
                for c in castling.chars() {
                    let right = match c {
                        'K' => CastlingRights::WHITE_KING_SIDE,
                        'Q' => CastlingRights::WHITE_QUEEN_SIDE,
                        'k' => CastlingRights::BLACK_KING_SIDE,
                        'q' => CastlingRights::BLACK_QUEEN_SIDE,
                        other => {
                            return Err(ChessEngineError::InvalidFen {
                                message: format!("invalid castling flag {:?}", other),
                            })
                        }
                    };
                    position.castling.insert(right);
                }
            }
        }

        Ok(position)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Piece standing on `square`, if any
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        Piece::all().find(|p| self.by_piece[p.index()].contains(square))
    }

    /// Replace the castling rights, keeping the placement
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }
}

impl BoardView for Position {
    #[inline]
    fn pieces(&self, color: Color, kind: PieceType) -> BitSet {
        self.by_piece[Piece::new(color, kind).index()]
    }

    #[inline]
    fn king_square(&self, color: Color) -> Square {
        self.pieces(color, PieceType::King).lsb()
    }

    #[inline]
    fn castling_rights(&self) -> CastlingRights {
        self.castling
    }
}

impl FromStr for Position {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let c = match self.piece_on(Square::from_coords(file, rank)) {
                    Some(p) => {
                        let c = b"pnbrqk"[p.kind.index()] as char;
                        if p.color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    }
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "{} to move", self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_piece_counts() {
        let pos = Position::startpos();
        assert_eq!(pos.pieces(Color::White, PieceType::Pawn).count_ones(), 8);
        assert_eq!(pos.pieces(Color::Black, PieceType::Pawn).count_ones(), 8);
        assert_eq!(pos.pieces_of_kind(PieceType::Rook).count_ones(), 4);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black).to_string(), "e8");
        assert_eq!(pos.castling_rights(), CastlingRights::ALL);
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn test_piece_on() {
        let pos = Position::startpos();
        let d8: Square = "d8".parse().unwrap();
        assert_eq!(pos.piece_on(d8), Some(Piece::new(Color::Black, PieceType::Queen)));
        assert_eq!(pos.piece_on("e4".parse().unwrap()), None);
    }

    #[test]
    fn test_can_castle() {
        let pos = Position::from_fen("4k2r/8/8/8/8/8/8/R3K3 w Qk - 0 1").unwrap();
        assert!(pos.can_castle(Color::White, CastlingSide::QueenSide));
        assert!(!pos.can_castle(Color::White, CastlingSide::KingSide));
        assert!(pos.can_castle(Color::Black, CastlingSide::KingSide));
    }

    #[test]
    fn test_rejects_bad_fen() {
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(ChessEngineError::InvalidFen { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K2X w - - 0 1"),
            Err(ChessEngineError::InvalidPiece { piece: 'X' })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/8 w - - 0 1"),
            Err(ChessEngineError::KingCount { color: Color::White, count: 0 })
        ));
        assert!(matches!(
            Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessEngineError::PawnOnBackRank { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(ChessEngineError::InvalidFen { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/9/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessEngineError::InvalidFen { .. })
        ));
        assert!(matches!(
            Position::from_fen("4k3/0p7/8/8/8/8/8/4K3 w - - 0 1"),
            Err(ChessEngineError::InvalidFen { .. })
        ));
    }

    #[test]
    fn test_long_digit_run_is_an_error() {
        let fen = format!("4k3/8/8/8/8/8/8/{}K w - - 0 1", "9".repeat(30));
        assert!(matches!(
            Position::from_fen(&fen),
            Err(ChessEngineError::InvalidFen { .. })
        ));

        let fen = format!("4k3/8/8/8/8/8/8/4K{} w - - 0 1", "3".repeat(100));
        assert!(matches!(
            Position::from_fen(&fen),
            Err(ChessEngineError::InvalidFen { .. })
        ));
    }
}
