//! Data-driven game balance
//!
//! Every gameplay constant the engine reads lives here so a JSON file can
//! rebalance the game without a rebuild. Missing fields fall back to `consts`.

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::InvalidTuning;

/// Upper bound on bricks in one field
pub const MAX_BRICKS: usize = 10_000;

/// How the paddle redirects the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum BouncePolicy {
    /// Flip the vertical component only
    #[default]
    Vertical,
    /// Steer by where the ball struck the paddle: the edges deflect up to
    /// `max_angle` radians from vertical. Speed is preserved.
    Angled { max_angle: f32 },
}

/// Gameplay constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub field_width: f32,
    pub field_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,
    pub paddle_bottom_offset: f32,

    pub ball_radius: f32,
    pub ball_serve_vx: f32,
    pub ball_serve_vy: f32,

    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_gap: f32,
    pub brick_rows: usize,
    pub brick_top_offset: f32,

    pub score_per_brick: u64,
    pub starting_lives: u32,
    pub bounce_policy: BouncePolicy,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            ball_radius: BALL_RADIUS,
            ball_serve_vx: BALL_SERVE_VX,
            ball_serve_vy: BALL_SERVE_VY,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_gap: BRICK_GAP,
            brick_rows: BRICK_ROWS,
            brick_top_offset: BRICK_TOP_OFFSET,

            score_per_brick: SCORE_PER_BRICK,
            starting_lives: STARTING_LIVES,
            bounce_policy: BouncePolicy::Vertical,
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Tuning>(&json) {
                Ok(tuning) => match tuning.validate() {
                    Ok(()) => {
                        log::info!("Loaded tuning from {}", path.display());
                        tuning
                    }
                    Err(err) => {
                        log::warn!("Ignoring tuning {}: {}", path.display(), err);
                        Self::default()
                    }
                },
                Err(err) => {
                    log::warn!("Ignoring malformed tuning {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No tuning at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), InvalidTuning> {
        let floats = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("paddle_bottom_offset", self.paddle_bottom_offset),
            ("ball_radius", self.ball_radius),
            ("ball_serve_vx", self.ball_serve_vx),
            ("ball_serve_vy", self.ball_serve_vy),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("brick_gap", self.brick_gap),
            ("brick_top_offset", self.brick_top_offset),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InvalidTuning::new(*field, "must be finite"));
        }

        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("ball_radius", self.ball_radius),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(InvalidTuning::new(*field, "must be positive"));
        }

        if self.paddle_width > self.field_width {
            return Err(InvalidTuning::new("paddle_width", "wider than the field"));
        }
        if self.paddle_bottom_offset <= 0.0 || self.paddle_bottom_offset >= self.field_height {
            return Err(InvalidTuning::new("paddle_bottom_offset", "must lie inside the field"));
        }
        if self.ball_serve_vy == 0.0 {
            return Err(InvalidTuning::new("ball_serve_vy", "must be non-zero"));
        }
        if self.brick_gap < 0.0 || self.brick_gap >= self.brick_width.min(self.brick_height) {
            return Err(InvalidTuning::new("brick_gap", "must be smaller than a brick"));
        }
        if self.brick_top_offset < 0.0 {
            return Err(InvalidTuning::new("brick_top_offset", "must not be negative"));
        }
        if self.brick_columns() == 0 {
            return Err(InvalidTuning::new("brick_width", "wider than the field"));
        }
        if self.brick_rows == 0 {
            return Err(InvalidTuning::new("brick_rows", "must be at least 1"));
        }
        if self.brick_rows.saturating_mul(self.brick_columns()) > MAX_BRICKS {
            return Err(InvalidTuning::new("brick_rows", "too many bricks"));
        }
        if self.brick_top_offset + self.brick_rows as f32 * self.brick_height > self.field_height {
            return Err(InvalidTuning::new("brick_rows", "grid taller than the field"));
        }
        if self.starting_lives == 0 {
            return Err(InvalidTuning::new("starting_lives", "must be at least 1"));
        }
        if let BouncePolicy::Angled { max_angle } = self.bounce_policy {
            if !(0.0..FRAC_PI_2).contains(&max_angle) {
                return Err(InvalidTuning::new("bounce_policy", "max_angle must be in [0, pi/2)"));
            }
        }
        Ok(())
    }

    /// Bricks per row: as many whole slots as fit across the field
    pub fn brick_columns(&self) -> usize {
        if self.brick_width <= 0.0 {
            return 0;
        }
        (self.field_width / self.brick_width).floor() as usize
    }
}
