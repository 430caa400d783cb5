//! Pawn hashing and the pawn table
//!
//! Pawn structure changes far less often than the rest of the position, so
//! pawn evaluation is cached by a Zobrist key built from pawn placement only.
//! [`PawnTable`] is a fixed-size, always-replace table of [`PawnEntry`]
//! slots. Each search worker owns its own table; the table does no locking.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::board::BoardView;
use super::error::{ChessEngineError, ChessEngineResult};
use super::evaluation::PawnEntry;
use super::types::*;

const ZOBRIST_SEED: u64 = 1_070_372;

struct PawnKeys {
    pawn: [[u64; 64]; 2],
    no_pawns: u64,
}

static KEYS: OnceLock<PawnKeys> = OnceLock::new();

fn keys() -> &'static PawnKeys {
    KEYS.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut pawn = [[0u64; 64]; 2];
        for color_keys in pawn.iter_mut() {
            for key in color_keys.iter_mut() {
                *key = rng.random();
            }
        }
        PawnKeys {
            pawn,
            no_pawns: rng.random(),
        }
    })
}

/// Build the pawn Zobrist keys
pub fn init() {
    if KEYS.get().is_none() {
        keys();
        tracing::debug!("[TABLES] Pawn hash keys initialized");
    }
}

/// Zobrist key of the pawn placement on `board`
pub fn pawn_key<B: BoardView + ?Sized>(board: &B) -> u64 {
    let keys = keys();
    let mut key = keys.no_pawns;
    for color in Color::ALL {
        for s in board.pieces(color, PieceType::Pawn) {
            key ^= keys.pawn[color.index()][s.index()];
        }
    }
    key
}

/// Probe counters
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PawnTableStats {
    pub hits: u64,
    pub misses: u64,
}

/// Per-worker cache of pawn entries
pub struct PawnTable {
    entries: Box<[PawnEntry]>,
    mask: usize,
    stats: PawnTableStats,
}

impl PawnTable {
    /// Allocate a table with `entries` slots
    ///
    /// # Errors
    ///
    /// Returns [`ChessEngineError::InvalidConfig`] unless `entries` is a
    /// non-zero power of two.
    pub fn new(entries: usize) -> ChessEngineResult<Self> {
        if entries == 0 || !entries.is_power_of_two() {
            return Err(ChessEngineError::InvalidConfig {
                message: format!("pawn table size {} is not a power of two", entries),
            });
        }

        let mut slots = Vec::with_capacity(entries);
        slots.resize_with(entries, PawnEntry::default);
        tracing::debug!(
            "[PAWN_TABLE] Allocated {} entries ({} bytes)",
            entries,
            entries * std::mem::size_of::<PawnEntry>()
        );

        Ok(PawnTable {
            entries: slots.into_boxed_slice(),
            mask: entries - 1,
            stats: PawnTableStats::default(),
        })
    }

    /// Entry for `board`'s pawn configuration, refilled when the slot holds
    /// another configuration
    pub fn probe<B: BoardView + ?Sized>(&mut self, board: &B) -> &mut PawnEntry {
        let key = pawn_key(board);
        let entry = &mut self.entries[key as usize & self.mask];

        if entry.key == key {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            entry.fill(board, key);
        }

        entry
    }

    /// Reset every slot
    pub fn clear(&mut self) {
        self.entries.fill_with(PawnEntry::default);
        self.stats = PawnTableStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> PawnTableStats {
        self.stats
    }
}
