//! Pawn structure, king safety and piece-square evaluation
//!
//! The static-evaluation core of a bitboard chess engine. Given a position
//! seen through [`BoardView`], it computes:
//! - A tapered pawn-structure score per side, cached per pawn configuration
//!   in a [`PawnTable`]
//! - Each king's shelter and pawn-storm score, cached per king square and
//!   castling rights
//! - Piece-square and material tables, built once per process
//!
//! All scores are [`Score`] pairs (middlegame, endgame) in centipawn-like
//! internal units, from white's point of view unless stated otherwise.
//!
//! ## Module Organization
//!
//! - `types` - Colors, pieces, squares, scores and castling rights
//! - `bitset` - 64-bit square sets
//! - `tables` - Precomputed square geometry (spans, distances, pawn attacks)
//! - `board` - The [`BoardView`] query trait and a FEN-backed [`Position`]
//! - `evaluation` - Pawn, king-safety and piece-square terms
//! - `hash` - Pawn Zobrist keys and the pawn table
//! - `config` - JSON settings
//!
//! ## Initialization
//!
//! Call [`init`] once at startup. Every table is also built lazily on first
//! use, so `init` only moves that cost to a predictable point.
//!
//! ## Further Reading
//!
//! - [Evaluation](https://www.chessprogramming.org/Evaluation)
//! - [Tapered Eval](https://www.chessprogramming.org/Tapered_Eval)
//! - [Pawn Hash Table](https://www.chessprogramming.org/Pawn_Hash_Table)

pub mod bitset;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod hash;
pub mod tables;
pub mod types;

pub use bitset::BitSet;
pub use board::{BoardView, Position};
pub use config::EvalConfig;
pub use error::{ChessEngineError, ChessEngineResult};
pub use evaluation::{evaluate_structure, PawnEntry, StructureReport};
pub use hash::{pawn_key, PawnTable};
pub use types::*;

/// Build every process-wide table
pub fn init() {
    tables::init();
    hash::init();
    evaluation::init();
    tracing::info!("[TABLES] Evaluation tables ready");
}
