//! In-process score table for tests and throwaway sessions

use std::io;

use super::{ScoreStore, StoredRow};
use crate::error::LeaderboardError;
use crate::leaderboard::Player;

#[derive(Debug, Clone)]
pub struct MemoryStore {
    rows: Vec<Player>,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            available: true,
        }
    }

    /// Simulate the store going offline (or coming back)
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check_available(&self) -> Result<(), LeaderboardError> {
        if self.available {
            Ok(())
        } else {
            Err(LeaderboardError::StorageUnavailable(io::Error::new(
                io::ErrorKind::NotConnected,
                "memory store offline",
            )))
        }
    }
}

impl ScoreStore for MemoryStore {
    fn append(&mut self, player: &Player) -> Result<(), LeaderboardError> {
        self.check_available()?;
        self.rows.push(player.clone());
        Ok(())
    }

    fn for_each_row(&self, visit: &mut dyn FnMut(StoredRow)) -> Result<(), LeaderboardError> {
        self.check_available()?;
        for (seq, player) in self.rows.iter().enumerate() {
            visit(StoredRow {
                seq: seq as u64,
                player: player.clone(),
            });
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LeaderboardError> {
        self.check_available()?;
        self.rows.clear();
        Ok(())
    }
}
