//! Error types for the evaluation core
//!
//! Evaluation itself is total over a valid board and never fails. Errors only
//! come from the edges where outside input enters: FEN strings, square names
//! and configuration files.

use thiserror::Error;

use super::types::Color;

/// Errors that can occur while building evaluator inputs
#[derive(Error, Debug)]
pub enum ChessEngineError {
    /// Square name is not of the form `e4`
    #[error("Invalid square name: {name:?}")]
    InvalidSquareName { name: String },

    /// FEN string is structurally broken
    #[error("Invalid FEN: {message}")]
    InvalidFen { message: String },

    /// FEN contains a letter that is not a piece
    #[error("Invalid piece character {piece:?} in FEN")]
    InvalidPiece { piece: char },

    /// A side has no king or more than one
    #[error("Expected exactly one {color} king, found {count}")]
    KingCount { color: Color, count: u32 },

    /// Pawn placed on the first or eighth rank
    #[error("Pawn on back rank at {square}")]
    PawnOnBackRank { square: String },

    /// Configuration value outside its allowed range
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file could not be read
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON
    #[error("Failed to parse configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for evaluator operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;
