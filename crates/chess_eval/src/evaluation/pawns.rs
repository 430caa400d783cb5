//! Pawn structure analysis
//!
//! Classifies every pawn of one side and sums a tapered score for the
//! structure. Along the way it collects the per-side sets the rest of the
//! evaluation needs: passed pawns, pawn attacks, the attack span and the
//! semi-open files.
//!
//! ## Per-pawn flags
//!
//! For a pawn on `s`, looking towards the enemy:
//!
//! - `opposed`    - enemy pawns ahead on the same file
//! - `blocked`    - an enemy pawn directly in front
//! - `stoppers`   - enemy pawns in the passed-pawn span
//! - `lever`      - enemy pawns the pawn can capture now
//! - `lever_push` - enemy pawns it could capture after one push
//! - `doubled`    - own pawn directly behind
//! - `neighbours` - own pawns on adjacent files
//! - `phalanx`    - neighbours on the same rank
//! - `support`    - neighbours one rank behind
//!
//! ## Passed pawns
//!
//! A pawn is passed when one of these holds:
//!
//! 1. the only stoppers are levers
//! 2. the only stoppers are lever-push pawns and the phalanx outnumbers them
//! 3. the only stopper blocks it from the fifth rank onwards, and a
//!    supporting pawn can step up to a square that is neither occupied by an
//!    enemy pawn nor attacked twice by enemy pawns
//!
//! Passed pawns are only recorded here. Their bonus needs full attack
//! information and is scored by the caller.

use std::sync::OnceLock;

use crate::bitset::BitSet;
use crate::board::BoardView;
use crate::constants::{DARK_SQUARES, LIGHT_SQUARES};
use crate::tables::*;
use crate::types::*;

pub const BACKWARD: Score = Score::new(9, 24);
pub const DOUBLED: Score = Score::new(11, 56);
pub const ISOLATED: Score = Score::new(5, 15);
pub const WEAK_LEVER: Score = Score::new(0, 56);
pub const WEAK_UNOPPOSED: Score = Score::new(13, 27);

/// Connected-pawn base values, indexed by relative rank
pub const CONNECTED_SEED: [i32; 7] = [0, 7, 8, 12, 29, 48, 86];

/// Connected-pawn bonus by [opposed][phalanx][supporters][relative rank]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectedTable {
    bonus: [[[[Score; 8]; 3]; 2]; 2],
}

impl ConnectedTable {
    pub fn build() -> Self {
        let mut bonus = [[[[Score::ZERO; 8]; 3]; 2]; 2];

        for opposed in 0..2 {
            for phalanx in 0..2 {
                for support in 0..3 {
                    for r in RANK_2..RANK_8 {
                        let seed = CONNECTED_SEED[r as usize];
                        let v = seed * (2 + phalanx as i32 - opposed as i32) + 21 * support as i32;
                        // Integer division truncates toward zero, so rank 2
                        // entries round their negative endgame value up.
                        bonus[opposed][phalanx][support][r as usize] =
                            Score::new(v, v * (r as i32 - 2) / 4);
                    }
                }
            }
        }

        ConnectedTable { bonus }
    }

    #[inline]
    pub fn get(&self, opposed: bool, phalanx: bool, support: u32, rank: Rank) -> Score {
        self.bonus[opposed as usize][phalanx as usize][support.min(2) as usize][rank as usize]
    }
}

static CONNECTED: OnceLock<ConnectedTable> = OnceLock::new();

/// Build the connected-pawn table
pub fn init() {
    if CONNECTED.get().is_none() {
        connected_table();
        tracing::debug!("[TABLES] Connected pawn table initialized");
    }
}

#[inline]
pub fn connected_table() -> &'static ConnectedTable {
    CONNECTED.get_or_init(ConnectedTable::build)
}

/// Result of analysing one side's pawns
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PawnSideEval {
    pub score: Score,
    pub passed_pawns: BitSet,
    /// Bit `f` set when the side has no pawn on file `f`
    pub semiopen_files: u8,
    pub pawn_attacks: BitSet,
    pub pawn_attacks_span: BitSet,
    /// Pawn counts by square shade, indexed by `Color` (white = light)
    pub pawns_on_squares: [u8; 2],
}

/// Score `us`'s pawn structure and collect its pawn sets
pub fn evaluate_pawns<B: BoardView + ?Sized>(board: &B, us: Color) -> PawnSideEval {
    let them = !us;
    let up = us.forward();

    let our_pawns = board.pieces(us, PieceType::Pawn);
    let their_pawns = board.pieces(them, PieceType::Pawn);
    let double_attack_them = pawn_double_attacks_bb(their_pawns, them);
    let connected = connected_table();

    let attacks = pawn_attacks_bb(our_pawns, us);
    let mut eval = PawnSideEval {
        score: Score::ZERO,
        passed_pawns: BitSet::EMPTY,
        semiopen_files: 0xFF,
        pawn_attacks: attacks,
        pawn_attacks_span: attacks,
        pawns_on_squares: [0; 2],
    };
    eval.pawns_on_squares[Color::White.index()] =
        (our_pawns & BitSet(LIGHT_SQUARES)).count_ones() as u8;
    eval.pawns_on_squares[Color::Black.index()] =
        (our_pawns & BitSet(DARK_SQUARES)).count_ones() as u8;

    for s in our_pawns {
        debug_assert!(s.relative_rank(us) != RANK_1 && s.relative_rank(us) != RANK_8);

        let f = s.file();
        let ahead = s.forward(us);
        let behind = s.backward(us);

        eval.semiopen_files &= !(1u8 << f);

        let opposed = their_pawns & forward_file_bb(us, s);
        let blocked = their_pawns & BitSet::from(ahead);
        let stoppers = their_pawns & passed_pawn_span(us, s);
        let lever = their_pawns & pawn_attacks(us, s);
        let lever_push = their_pawns & pawn_attacks(us, ahead);
        let doubled = our_pawns & BitSet::from(behind);
        let neighbours = our_pawns & adjacent_files_bb(f);
        let phalanx = neighbours & rank_bb(s.rank());
        let support = neighbours & rank_bb(behind.rank());

        // Behind every neighbour and unable to advance safely
        let backward = (neighbours & forward_ranks_bb(them, ahead.rank())).is_empty()
            && (lever_push | blocked).is_not_empty();

        if !backward && blocked.is_empty() {
            eval.pawn_attacks_span |= pawn_attack_span(us, s);
        }

        let passed = stoppers == lever
            || (stoppers == lever_push && phalanx.count_ones() >= lever_push.count_ones())
            || (stoppers == blocked
                && s.relative_rank(us) >= RANK_5
                && (support.shift(up) & !(their_pawns | double_attack_them)).is_not_empty());

        if passed {
            eval.passed_pawns.insert(s);
        }

        if (support | phalanx).is_not_empty() {
            eval.score += connected.get(
                opposed.is_not_empty(),
                phalanx.is_not_empty(),
                support.count_ones(),
                s.relative_rank(us),
            );
        } else if neighbours.is_empty() {
            eval.score -= ISOLATED;
            if opposed.is_empty() {
                eval.score -= WEAK_UNOPPOSED;
            }
        } else if backward {
            eval.score -= BACKWARD;
            if opposed.is_empty() {
                eval.score -= WEAK_UNOPPOSED;
            }
        }

        if support.is_empty() {
            if doubled.is_not_empty() {
                eval.score -= DOUBLED;
            }
            if lever.more_than_one() {
                eval.score -= WEAK_LEVER;
            }
        }
    }

    eval
}
