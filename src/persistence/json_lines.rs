//! Append-only score table on disk
//!
//! One JSON object per line: `{"name":"Ada","score":500}`. Appends never
//! rewrite the file and scans stream it line by line as raw bytes. A line
//! that fails to parse (bad JSON or bad UTF-8) is logged and skipped; it
//! still consumes a sequence number so the insertion order of the surviving
//! rows is unchanged.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use super::{ScoreStore, StoredRow};
use crate::error::LeaderboardError;
use crate::leaderboard::Player;

#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    /// Open (creating if needed) the table at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LeaderboardError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        log::info!("Leaderboard store at {}", path.display());
        Ok(Self { path })
    }
}

impl ScoreStore for JsonLinesStore {
    fn append(&mut self, player: &Player) -> Result<(), LeaderboardError> {
        let mut line = serde_json::to_string(player)?;
        line.push('\n');
        // No `create`: a table deleted underneath us is unavailable, not empty
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn for_each_row(&self, visit: &mut dyn FnMut(StoredRow)) -> Result<(), LeaderboardError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut seq = 0u64;
        for line in reader.split(b'\n') {
            let line = line?;
            if line.trim_ascii().is_empty() {
                continue;
            }
            match serde_json::from_slice::<Player>(&line) {
                Ok(player) => visit(StoredRow { seq, player }),
                Err(err) => log::warn!("Skipping corrupt leaderboard row {}: {}", seq, err),
            }
            seq += 1;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LeaderboardError> {
        File::create(&self.path)?;
        log::info!("Leaderboard cleared");
        Ok(())
    }
}
