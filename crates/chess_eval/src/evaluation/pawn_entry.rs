//! Pawn hash table entry
//!
//! A [`PawnEntry`] caches everything that depends only on the pawn
//! configuration: the structure score, passed pawns, pawn attacks and file
//! information for both sides. It also caches each side's king-safety score
//! together with the king square and castling rights it was computed for.
//!
//! Filling is "compute, then store": [`evaluate_pawns`] and
//! [`evaluate_king_safety`] are pure, and the entry only copies their results.

use crate::bitset::BitSet;
use crate::board::BoardView;
use crate::types::*;

use super::king_safety::{evaluate_king_safety, KingSafety};
use super::pawns::{evaluate_pawns, PawnSideEval};

#[derive(Clone, Debug, Default)]
pub struct PawnEntry {
    pub(crate) key: u64,
    score: Score,
    passed_pawns: [BitSet; 2],
    pawn_attacks: [BitSet; 2],
    pawn_attacks_span: [BitSet; 2],
    semiopen_files: [u8; 2],
    pawns_on_squares: [[u8; 2]; 2],
    king_squares: [Option<Square>; 2],
    castling_rights: [CastlingRights; 2],
    king_safety: [Score; 2],
    open_files: u32,
    passed_count: u32,
}

impl PawnEntry {
    /// Recompute every pawn-structure field for `board` and tag the entry
    /// with `key`
    ///
    /// King snapshots are cleared, so the next [`PawnEntry::king_safety`]
    /// call for either side recomputes.
    pub fn fill<B: BoardView + ?Sized>(&mut self, board: &B, key: u64) {
        let white = evaluate_pawns(board, Color::White);
        let black = evaluate_pawns(board, Color::Black);

        self.key = key;
        self.score = white.score - black.score;
        self.store_side(Color::White, &white);
        self.store_side(Color::Black, &black);
        self.open_files = (self.semiopen_files[0] & self.semiopen_files[1]).count_ones();
        self.passed_count = (self.passed_pawns[0] | self.passed_pawns[1]).count_ones();
    }

    fn store_side(&mut self, color: Color, eval: &PawnSideEval) {
        let c = color.index();
        self.passed_pawns[c] = eval.passed_pawns;
        self.pawn_attacks[c] = eval.pawn_attacks;
        self.pawn_attacks_span[c] = eval.pawn_attacks_span;
        self.semiopen_files[c] = eval.semiopen_files;
        self.pawns_on_squares[c] = eval.pawns_on_squares;
        self.king_squares[c] = None;
    }

    fn store_king_safety(&mut self, color: Color, ks: KingSafety) {
        let c = color.index();
        self.king_squares[c] = Some(ks.king_square);
        self.castling_rights[c] = ks.castling_rights;
        self.king_safety[c] = ks.score;
    }

    /// `color`'s king-safety score, recomputed only when its king square or
    /// castling rights differ from the last computation
    pub fn king_safety<B: BoardView + ?Sized>(&mut self, board: &B, color: Color) -> Score {
        let c = color.index();
        let ksq = board.king_square(color);
        let rights = board.castling_rights().for_color(color);

        if self.king_squares[c] != Some(ksq) || self.castling_rights[c] != rights {
            let ks = evaluate_king_safety(board, color, ksq);
            self.store_king_safety(color, ks);
        }

        self.king_safety[c]
    }

    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// White's pawn-structure score minus black's
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn passed_pawns(&self, color: Color) -> BitSet {
        self.passed_pawns[color.index()]
    }

    #[inline]
    pub fn pawn_attacks(&self, color: Color) -> BitSet {
        self.pawn_attacks[color.index()]
    }

    #[inline]
    pub fn pawn_attacks_span(&self, color: Color) -> BitSet {
        self.pawn_attacks_span[color.index()]
    }

    /// Bit mask of files where `color` has no pawn
    #[inline]
    pub fn semiopen_files(&self, color: Color) -> u8 {
        self.semiopen_files[color.index()]
    }

    #[inline]
    pub fn semiopen_file(&self, color: Color, file: File) -> bool {
        self.semiopen_files[color.index()] & (1 << file) != 0
    }

    /// Number of `color`'s pawns standing on squares the same shade as `square`
    #[inline]
    pub fn pawns_on_same_color_squares(&self, color: Color, square: Square) -> u32 {
        self.pawns_on_squares[color.index()][square.shade().index()] as u32
    }

    /// Files without a pawn of either color
    #[inline]
    pub fn open_files(&self) -> u32 {
        self.open_files
    }

    /// Passed pawns of both sides together
    #[inline]
    pub fn passed_count(&self) -> u32 {
        self.passed_count
    }

    /// King square the cached king-safety score of `color` belongs to
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king_squares[color.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn filled(fen: &str) -> (Position, PawnEntry) {
        let board = Position::from_fen(fen).unwrap();
        let mut entry = PawnEntry::default();
        entry.fill(&board, 1);
        (board, entry)
    }

    #[test]
    fn test_starting_position_entry() {
        let (_, entry) = filled(crate::constants::STARTING_FEN);
        assert_eq!(entry.score(), Score::ZERO);
        assert_eq!(entry.passed_count(), 0);
        assert_eq!(entry.open_files(), 0);
        assert_eq!(entry.semiopen_files(Color::White), 0);
        assert_eq!(entry.semiopen_files(Color::Black), 0);
        assert_eq!(entry.pawn_attacks(Color::White).count_ones(), 8);
        assert!(entry.king_square(Color::White).is_none());
    }

    #[test]
    fn test_pawnless_entry() {
        let (_, entry) = filled("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(entry.score(), Score::ZERO);
        assert_eq!(entry.passed_count(), 0);
        assert_eq!(entry.open_files(), 8);
        assert!(entry.semiopen_file(Color::White, 0));
        assert!(entry.semiopen_file(Color::Black, 7));
    }

    #[test]
    fn test_score_is_white_minus_black() {
        let (_, entry) = filled("4k3/8/8/8/2P1p3/8/3P4/4K3 w - - 0 1");
        // white -(22, 51), black -(18, 42)
        assert_eq!(entry.score(), Score::new(-4, -9));
        assert_eq!(entry.passed_count(), 1);
        assert_eq!(entry.open_files(), 5);
        assert!(!entry.semiopen_file(Color::White, 2));
        assert!(entry.semiopen_file(Color::White, 4));
        assert!(!entry.semiopen_file(Color::Black, 4));
    }

    #[test]
    fn test_pawns_on_same_color_squares() {
        let (_, entry) = filled("4k3/8/8/8/8/8/PPP5/4K3 w - - 0 1");
        assert_eq!(entry.pawns_on_same_color_squares(Color::White, Square::A1), 1);
        assert_eq!(entry.pawns_on_same_color_squares(Color::White, Square::H1), 2);
        assert_eq!(entry.pawns_on_same_color_squares(Color::Black, Square::H1), 0);
    }

    #[test]
    fn test_king_safety_is_cached_until_inputs_change() {
        let (mut board, mut entry) = filled("4k3/8/8/8/8/8/5PPP/4K2R w K - 0 1");

        let with_castling = entry.king_safety(&board, Color::White);
        assert_eq!(with_castling, Score::new(97, -11));
        assert_eq!(entry.king_square(Color::White), Some(Square::E1));

        // Losing the right invalidates the snapshot
        board.set_castling_rights(CastlingRights::NONE);
        assert_eq!(entry.king_safety(&board, Color::White), Score::new(38, -11));

        // Refilling clears both snapshots
        entry.fill(&board, 2);
        assert!(entry.king_square(Color::White).is_none());
        assert_eq!(entry.king_safety(&board, Color::White), Score::new(38, -11));
    }
}
