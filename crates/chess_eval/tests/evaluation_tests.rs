//! End-to-end checks of the evaluation core through its public API

use chess_eval::evaluation::{
    evaluate_king_safety, evaluate_pawns, material, psqt, KING_PAWN_DISTANCE_PENALTY,
};
use chess_eval::tables::pawn_attacks_bb;
use chess_eval::*;

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

/// Swap colors and flip ranks
fn mirror(fen: &str) -> String {
    let mut fields = fen.split_whitespace();
    let placement = fields.next().unwrap();
    let side = fields.next().unwrap_or("w");

    let ranks: Vec<String> = placement
        .split('/')
        .rev()
        .map(|rank| {
            rank.chars()
                .map(|c| {
                    if c.is_ascii_uppercase() {
                        c.to_ascii_lowercase()
                    } else {
                        c.to_ascii_uppercase()
                    }
                })
                .collect()
        })
        .collect();
    let side = if side == "w" { "b" } else { "w" };
    format!("{} {} - - 0 1", ranks.join("/"), side)
}

const POSITIONS: [&str; 6] = [
    chess_eval::constants::STARTING_FEN,
    "r1bqk2r/pp2bppp/2n1pn2/3p4/2PP4/2N2N2/PP3PPP/R2QKB1R w KQkq - 0 1",
    "6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1",
    "4k3/8/8/8/2P1p3/8/3P4/4K3 w - - 0 1",
    "8/2k5/1p6/pP6/P7/8/5K2/8 w - - 0 1",
    "2kr3r/ppp2ppp/8/3P4/8/6P1/PP3P1P/R3K2R w KQ - 0 1",
];

#[test]
fn test_starting_position_is_balanced() {
    chess_eval::init();
    let board = Position::startpos();
    let mut table = PawnTable::new(256).unwrap();

    let report = evaluate_structure(&board, table.probe(&board));
    assert_eq!(report.pawns, Score::ZERO);
    assert_eq!(report.total, Score::ZERO);
    assert_eq!(report.passed_count, 0);
    assert_eq!(report.open_files, 0);

    let entry = table.probe(&board);
    assert_eq!(entry.semiopen_files(Color::White), 0);
    assert_eq!(entry.semiopen_files(Color::Black), 0);

    assert_eq!(psqt().score(&board), Score::ZERO);
}

#[test]
fn test_pawnless_position() {
    let board = pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let mut table = PawnTable::new(16).unwrap();
    let entry = table.probe(&board);

    assert_eq!(entry.score(), Score::ZERO);
    assert_eq!(entry.passed_count(), 0);
    assert_eq!(entry.open_files(), 8);
    assert_eq!(entry.semiopen_files(Color::White), 0xFF);
    assert_eq!(entry.pawn_attacks(Color::White), BitSet::EMPTY);

    // No pawns anywhere: distance counts as one step
    let ks = entry.king_safety(&board, Color::White);
    assert_eq!(ks.eg, 5 - KING_PAWN_DISTANCE_PENALTY);
}

#[test]
fn test_pawn_score_is_color_symmetric() {
    for fen in POSITIONS {
        let board = pos(fen);
        let flipped = pos(&mirror(fen));

        let white = evaluate_pawns(&board, Color::White);
        let black = evaluate_pawns(&flipped, Color::Black);
        assert_eq!(white.score, black.score, "pawn score differs after mirroring {}", fen);
        assert_eq!(
            white.passed_pawns.count_ones(),
            black.passed_pawns.count_ones(),
            "passed pawns differ after mirroring {}",
            fen
        );

        let mut entry = PawnEntry::default();
        let mut flipped_entry = PawnEntry::default();
        entry.fill(&board, 1);
        flipped_entry.fill(&flipped, 2);
        assert_eq!(entry.score(), -flipped_entry.score(), "entry score not negated for {}", fen);
    }
}

#[test]
fn test_king_safety_is_color_symmetric() {
    for fen in POSITIONS {
        let board = pos(fen);
        let flipped = pos(&mirror(fen));
        let ksq = board.king_square(Color::White);
        let flipped_ksq = flipped.king_square(Color::Black);
        assert_eq!(ksq.flip_rank(), flipped_ksq);

        // Castling rights are dropped by the mirror
        let mut board = board;
        board.set_castling_rights(CastlingRights::NONE);

        let white = evaluate_king_safety(&board, Color::White, ksq);
        let black = evaluate_king_safety(&flipped, Color::Black, flipped_ksq);
        assert_eq!(white.score, black.score, "king safety differs after mirroring {}", fen);
    }
}

#[test]
fn test_pawn_attacks_match_attack_table() {
    for fen in POSITIONS {
        let board = pos(fen);
        let mut entry = PawnEntry::default();
        entry.fill(&board, 9);

        for color in Color::ALL {
            let pawns = board.pieces(color, PieceType::Pawn);
            assert_eq!(entry.pawn_attacks(color), pawn_attacks_bb(pawns, color));
            // Attack span always covers the current attacks
            assert_eq!(
                entry.pawn_attacks(color) & !entry.pawn_attacks_span(color),
                BitSet::EMPTY,
                "attack span misses attacks in {}",
                fen
            );
            assert_eq!(entry.passed_pawns(color) & !pawns, BitSet::EMPTY);
        }
    }
}

#[test]
fn test_psqt_mirrors_between_colors() {
    let table = psqt();
    for kind in PieceType::ALL {
        for square in Square::all() {
            let white = table.get(Piece::new(Color::White, kind), square);
            let black = table.get(Piece::new(Color::Black, kind), square.flip_rank());
            assert_eq!(white, -black, "{:?} on {} is not mirrored", kind, square);
        }
    }
}

#[test]
fn test_psqt_sums_cancel_for_mirrored_positions() {
    for fen in POSITIONS {
        let board = pos(fen);
        let flipped = pos(&mirror(fen));
        assert_eq!(psqt().score(&board), -psqt().score(&flipped), "psqt not mirrored for {}", fen);

        let npm = material().non_pawn_material(&board);
        let flipped_npm = material().non_pawn_material(&flipped);
        assert_eq!(npm.white, flipped_npm.black);
        assert_eq!(npm.black, flipped_npm.white);
    }
}

#[test]
fn test_pawn_table_reuses_entries() {
    let mut table = PawnTable::new(1024).unwrap();
    let before = pos("r1bqk2r/pp2bppp/2n1pn2/3p4/2PP4/2N2N2/PP3PPP/R2QKB1R w KQkq - 0 1");
    // Same pawns, a knight has moved
    let after = pos("r1bqk2r/pp2bppp/2n1pn2/3p4/2PP4/2N5/PP3PPP/R2QKBNR b KQkq - 0 1");

    let score = table.probe(&before).score();
    assert_eq!(table.probe(&after).score(), score);
    assert_eq!(table.stats().hits, 1);
    assert_eq!(table.stats().misses, 1);
}

#[test]
fn test_king_safety_cache_follows_king() {
    let mut board = pos("6k1/5ppp/8/8/8/8/5PPP/6K1 w - - 0 1");
    let mut table = PawnTable::new(64).unwrap();
    let sheltered = table.probe(&board).king_safety(&board, Color::White);

    board = pos("6k1/5ppp/8/8/8/8/5PPP/3K4 w - - 0 1");
    let exposed = table.probe(&board).king_safety(&board, Color::White);
    assert!(sheltered.mg > exposed.mg, "king on g1 should be safer than on d1");
    assert_eq!(table.probe(&board).king_square(Color::White), Some(board.king_square(Color::White)));
}

#[test]
fn test_king_far_from_pawns_is_penalized() {
    let near = pos("8/8/8/8/8/8/4PK2/k7 w - - 0 1");
    let far = pos("7K/8/8/8/8/8/4P3/k7 w - - 0 1");

    let near_ks = evaluate_king_safety(&near, Color::White, near.king_square(Color::White));
    let far_ks = evaluate_king_safety(&far, Color::White, far.king_square(Color::White));
    assert!(near_ks.score.eg > far_ks.score.eg);
}
