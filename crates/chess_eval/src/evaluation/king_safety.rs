//! King shelter and pawn storm evaluation
//!
//! Scores the pawn cover in front of a king and the enemy pawns marching
//! towards it, looking at the king's file and the two files next to it.
//! When a side may still castle, the shelter it would have after castling is
//! evaluated as well and the best middlegame value is kept.
//!
//! The result also penalizes distance between the king and its nearest own
//! pawn in the endgame.

use crate::bitset::BitSet;
use crate::board::BoardView;
use crate::tables::*;
use crate::types::*;

/// Shelter bonus by [distance from edge][relative rank of own pawn].
/// Rank 0 stands for "no own pawn on the file, or only behind the king".
pub const SHELTER_STRENGTH: [[i32; 8]; 4] = [
    [-6, 81, 93, 58, 39, 18, 25, 0],
    [-43, 61, 35, -49, -29, -11, -63, 0],
    [-10, 75, 23, -2, 32, 3, -45, 0],
    [-39, -13, -29, -52, -48, -67, -166, 0],
];

/// Storm danger by [distance from edge][relative rank of enemy pawn].
/// Rank 0 stands for "no enemy pawn on the file, or only behind the king".
/// [0][1..=2] covers an enemy edge pawn that the king itself likely blocks.
pub const UNBLOCKED_STORM: [[i32; 8]; 4] = [
    [85, -289, -166, 97, 50, 45, 50, 0],
    [46, -25, 122, 45, 37, -10, 20, 0],
    [-6, 51, 168, 34, -2, -22, -14, 0],
    [-15, -11, 101, 4, 11, -15, -29, 0],
];

/// Penalty for an enemy pawn on the third rank rammed into our pawn
pub const BLOCKED_STORM: i32 = 82;

/// Endgame penalty per step between the king and its closest pawn
pub const KING_PAWN_DISTANCE_PENALTY: i32 = 16;

/// King-safety score together with the inputs it was computed for
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KingSafety {
    pub score: Score,
    pub king_square: Square,
    pub castling_rights: CastlingRights,
}

/// Evaluate `us`'s king safety with the king standing on `ksq`
pub fn evaluate_king_safety<B: BoardView + ?Sized>(board: &B, us: Color, ksq: Square) -> KingSafety {
    let castling_rights = board.castling_rights().for_color(us);
    let distance = min_king_pawn_distance(board.pieces(us, PieceType::Pawn), ksq);

    let mut shelter = evaluate_shelter(board, us, ksq);

    // Use the shelter after castling if it is better
    for side in [CastlingSide::KingSide, CastlingSide::QueenSide] {
        if board.can_castle(us, side) {
            let castled = evaluate_shelter(board, us, side.king_destination().relative_square(us));
            if castled.mg > shelter.mg {
                shelter = castled;
            }
        }
    }

    KingSafety {
        score: shelter - Score::new(0, KING_PAWN_DISTANCE_PENALTY * distance),
        king_square: ksq,
        castling_rights,
    }
}

/// Ring distance from `ksq` to the nearest pawn of `pawns`, 1 when the set
/// is empty
pub fn min_king_pawn_distance(pawns: BitSet, ksq: Square) -> i32 {
    (1..8u8)
        .find(|&d| (distance_ring(ksq, d) & pawns).is_not_empty())
        .map_or(1, i32::from)
}

/// Shelter and storm score for a king of `us` standing on `ksq`
pub(crate) fn evaluate_shelter<B: BoardView + ?Sized>(board: &B, us: Color, ksq: Square) -> Score {
    debug_assert!(ksq.index() < 64);
    let them = !us;

    // Pawns behind the king's rank do not count
    let pawns = board.pieces_of_kind(PieceType::Pawn) & !forward_ranks_bb(them, ksq.rank());
    let our_pawns = pawns & board.pieces(us, PieceType::Pawn);
    let their_pawns = pawns & board.pieces(them, PieceType::Pawn);

    let mut mg = 5;
    let mut eg = 5;

    let center = ksq.file().clamp(FILE_B, FILE_G);
    for f in (center - 1)..=(center + 1) {
        let ours = our_pawns & file_bb(f);
        let our_rank = if ours.is_not_empty() {
            ours.backmost(us).relative_rank(us) as i32
        } else {
            0
        };

        let theirs = their_pawns & file_bb(f);
        let their_rank = if theirs.is_not_empty() {
            theirs.frontmost(them).relative_rank(us) as i32
        } else {
            0
        };

        let d = f.min(FILE_H - f) as usize;
        mg += SHELTER_STRENGTH[d][our_rank as usize];

        if our_rank != 0 && our_rank == their_rank - 1 {
            if their_rank == RANK_3 as i32 {
                mg -= BLOCKED_STORM;
                eg -= BLOCKED_STORM;
            }
        } else {
            mg -= UNBLOCKED_STORM[d][their_rank as usize];
        }
    }

    Score::new(mg, eg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_full_pawn_cover_on_g1() {
        let board = pos("6k1/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        // 5 + (75 + 6) + (61 - 46) + (81 - 85)
        assert_eq!(evaluate_shelter(&board, Color::White, Square::G1), Score::new(97, 5));

        let ks = evaluate_king_safety(&board, Color::White, Square::G1);
        assert_eq!(ks.score, Score::new(97, 5 - 16));
        assert_eq!(ks.king_square, Square::G1);
    }

    #[test]
    fn test_pawnless_side_faces_storm() {
        let board = pos("6k1/8/8/8/8/8/5PPP/6K1 w - - 0 1");
        let g8: Square = "g8".parse().unwrap();
        // Three empty files, white pawns on relative rank 6 from black's view
        // 5 + (-10 + 14) + (-43 - 20) + (-6 - 50)
        let ks = evaluate_king_safety(&board, Color::Black, g8);
        assert_eq!(ks.score, Score::new(-110, 5 - 16));
    }

    #[test]
    fn test_blocked_storm_on_third_rank() {
        let board = pos("6k1/8/8/8/8/6p1/5PPP/6K1 w - - 0 1");
        // g3 rams g2: 82 off both halves instead of the storm table
        assert_eq!(evaluate_shelter(&board, Color::White, Square::G1), Score::new(61, -77));
    }

    #[test]
    fn test_castling_destination_shelter_is_used() {
        let castled = pos("4k3/8/8/8/8/8/5PPP/4K2R w K - 0 1");
        let ks = evaluate_king_safety(&castled, Color::White, Square::E1);
        assert_eq!(ks.score, Score::new(97, -11));
        assert_eq!(ks.castling_rights, CastlingRights::WHITE_KING_SIDE);

        let stuck = pos("4k3/8/8/8/8/8/5PPP/4K2R w - - 0 1");
        let ks = evaluate_king_safety(&stuck, Color::White, Square::E1);
        assert_eq!(ks.score, Score::new(38, -11));
        assert_eq!(ks.castling_rights, CastlingRights::NONE);
    }

    #[test]
    fn test_other_sides_rights_are_ignored() {
        let board = pos("4k3/8/8/8/8/8/5PPP/4K2R w kq - 0 1");
        let ks = evaluate_king_safety(&board, Color::White, Square::E1);
        assert_eq!(ks.score, Score::new(38, -11));
    }

    #[test]
    fn test_min_king_pawn_distance() {
        let board = pos("4k3/8/8/8/4K3/8/4P3/8 w - - 0 1");
        let e4: Square = "e4".parse().unwrap();
        assert_eq!(min_king_pawn_distance(board.pieces(Color::White, PieceType::Pawn), e4), 2);
        assert_eq!(min_king_pawn_distance(BitSet::EMPTY, e4), 1);
    }

    #[test]
    fn test_pawn_distance_costs_sixteen_per_step() {
        let near = pos("4k3/8/8/8/4K3/4P3/8/8 w - - 0 1");
        let far = pos("4k3/8/8/8/4K3/8/4P3/8 w - - 0 1");
        let e4: Square = "e4".parse().unwrap();

        let near = evaluate_king_safety(&near, Color::White, e4).score;
        let far = evaluate_king_safety(&far, Color::White, e4).score;
        assert_eq!(near.mg, far.mg);
        assert_eq!(near.eg - far.eg, KING_PAWN_DISTANCE_PENALTY);
    }
}
