use std::fmt;
use std::io;

// Errors surfaced by leaderboard storage. Gameplay itself never fails.
#[derive(Debug)]
pub enum LeaderboardError {
    /// The store could not be opened, read or written
    StorageUnavailable(io::Error),
    /// A row could not be serialized
    Encode(serde_json::Error),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::StorageUnavailable(err) => write!(f, "leaderboard storage unavailable: {err}"),
            LeaderboardError::Encode(err) => write!(f, "leaderboard row encode error: {err}"),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::StorageUnavailable(err) => Some(err),
            LeaderboardError::Encode(err) => Some(err),
        }
    }
}

impl From<io::Error> for LeaderboardError {
    fn from(err: io::Error) -> Self {
        LeaderboardError::StorageUnavailable(err)
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        LeaderboardError::Encode(err)
    }
}

/// A tuning value the engine cannot run with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTuning {
    pub field: &'static str,
    pub reason: &'static str,
}

impl InvalidTuning {
    pub(crate) fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for InvalidTuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tuning `{}`: {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidTuning {}
