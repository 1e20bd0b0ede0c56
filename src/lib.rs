//! Brick Breaker - an arcade brick-breaking simulation with a ranked leaderboard
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, round/life progression)
//! - `leaderboard`: Ranked score queries over a persistent store
//! - `persistence`: Append-only score stores (JSON lines on disk, in-memory)
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences (player name, leaderboard path, volume)
//! - `audio`: Sound cues derived from engine state (no audio handles)

pub mod audio;
pub mod error;
pub mod leaderboard;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{InvalidTuning, LeaderboardError};
pub use leaderboard::{Leaderboard, Player};
pub use settings::Settings;
pub use tuning::{BouncePolicy, Tuning};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (the scoreboard is drawn to the right of this)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Horizontal shift per move request
    pub const PADDLE_STEP: f32 = 20.0;
    /// Distance from the field bottom to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;

    /// Ball defaults (units per tick)
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SERVE_VX: f32 = 3.0;
    pub const BALL_SERVE_VY: f32 = -4.0;

    /// Brick grid defaults
    pub const BRICK_WIDTH: f32 = 80.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    pub const BRICK_GAP: f32 = 1.0;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_TOP_OFFSET: f32 = 60.0;

    /// Progression
    pub const SCORE_PER_BRICK: u64 = 10;
    pub const STARTING_LIVES: u32 = 3;
    pub const FIRST_ROUND: u32 = 1;

    /// Rows shown per leaderboard panel
    pub const SCORES_TO_SHOW: usize = 6;
}
