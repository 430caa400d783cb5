//! Static evaluation terms that depend on pawns and king placement
//!
//! Evaluates:
//! - Pawn structure (isolated, backward, doubled, connected, passed pawns)
//! - King shelter and pawn storms, including the shelter after castling
//! - Piece-square tables and material values
//!
//! ## Module Organization
//!
//! - `pawns` - Per-side pawn structure analysis and the connected-pawn table
//! - `king_safety` - Shelter, storm and king-pawn distance
//! - `pawn_entry` - Cached per-configuration results held by the pawn table
//! - `psqt` - Piece-square and material tables
//!
//! ## Further Reading
//!
//! - [Pawn Structure](https://www.chessprogramming.org/Pawn_Structure)
//! - [King Safety](https://www.chessprogramming.org/King_Safety)
//! - [Piece-Square Tables](https://www.chessprogramming.org/Piece-Square_Tables)

mod king_safety;
mod pawn_entry;
mod pawns;
mod psqt;

pub use king_safety::{
    evaluate_king_safety, min_king_pawn_distance, KingSafety, BLOCKED_STORM,
    KING_PAWN_DISTANCE_PENALTY, SHELTER_STRENGTH, UNBLOCKED_STORM,
};
pub use pawn_entry::PawnEntry;
pub use pawns::{
    connected_table, evaluate_pawns, ConnectedTable, PawnSideEval, BACKWARD, CONNECTED_SEED,
    DOUBLED, ISOLATED, WEAK_LEVER, WEAK_UNOPPOSED,
};
pub use psqt::{material, psqt, MaterialTables, NonPawnMaterial, PieceSquareTable};

use serde::Serialize;

use crate::board::BoardView;
use crate::types::*;

/// Build the connected-pawn, piece-square and material tables
pub fn init() {
    pawns::init();
    psqt::init();
}

/// Pawn structure and king safety of a position, white's point of view
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub pawns: Score,
    pub white_king: Score,
    pub black_king: Score,
    /// `pawns + white_king - black_king`
    pub total: Score,
    pub passed_count: u32,
    pub open_files: u32,
}

/// Combine the cached pawn score with both kings' safety
///
/// # Arguments
///
/// * `board` - Position to evaluate
/// * `entry` - Pawn entry already filled for `board`'s pawn configuration
///
/// # Returns
///
/// The report with king-safety scores taken from (and cached in) `entry`.
pub fn evaluate_structure<B: BoardView + ?Sized>(board: &B, entry: &mut PawnEntry) -> StructureReport {
    let pawns = entry.score();
    let white_king = entry.king_safety(board, Color::White);
    let black_king = entry.king_safety(board, Color::Black);

    StructureReport {
        pawns,
        white_king,
        black_king,
        total: pawns + white_king - black_king,
        passed_count: entry.passed_count(),
        open_files: entry.open_files(),
    }
}
