//! Score persistence
//!
//! The leaderboard talks to storage through `ScoreStore`: a single
//! append-only table of (name, score) rows read back by full scans in
//! insertion order. Stores never rank; ranking lives in `leaderboard`.

pub mod json_lines;
pub mod memory;

pub use json_lines::JsonLinesStore;
pub use memory::MemoryStore;

use crate::error::LeaderboardError;
use crate::leaderboard::Player;

/// A stored row with its insertion sequence number (0 = oldest)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRow {
    pub seq: u64,
    pub player: Player,
}

// Port for the durable score table.
pub trait ScoreStore {
    /// Append one row
    fn append(&mut self, player: &Player) -> Result<(), LeaderboardError>;

    /// Visit every row in insertion order, without materializing the table
    fn for_each_row(&self, visit: &mut dyn FnMut(StoredRow)) -> Result<(), LeaderboardError>;

    /// Drop every row
    fn clear(&mut self) -> Result<(), LeaderboardError>;
}
