//! Simulation entities and lifecycle types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Direction, Location, Rect};
use crate::tuning::Tuning;

/// Lifecycle phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball and paddle parked, waiting for the start signal
    NotStarted,
    /// Physics ticks are running
    InRound,
    /// Every brick is dead; the next round has not been set up yet
    RoundOver,
    /// The ball was missed; ball and paddle have not respawned yet
    LifeOver,
    /// No lives left. Terminal until a new game
    GameOver,
}

/// Observable things that happened during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A brick died; `index` is its scan-order position in the field
    BrickDestroyed { index: usize, points: u64 },
    WallBounce,
    PaddleHit,
    LifeLost { lives_left: u32 },
    RoundCleared { round: u32 },
    GameOver { score: u64 },
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub location: Location,
    pub width: f32,
    pub height: f32,
    /// Horizontal shift per move request
    pub speed: f32,
}

impl Paddle {
    /// Paddle centred horizontally near the field bottom
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            location: Vec2::new(
                (tuning.field_width - tuning.paddle_width) / 2.0,
                tuning.field_height - tuning.paddle_bottom_offset,
            ),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_step,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_location(self.location, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.location.x + self.width / 2.0
    }

    /// Shift one step in `direction`, clamped to the field
    pub fn move_paddle(&mut self, direction: Direction, field_width: f32) {
        let x = self.location.x + direction.sign() * self.speed.abs();
        self.set_x_clamped(x, field_width);
    }

    /// Move the paddle center toward `target_x`, at most one step
    pub fn move_toward(&mut self, target_x: f32, field_width: f32) {
        let step = self.speed.abs();
        let delta = (target_x - self.center_x()).clamp(-step, step);
        self.set_x_clamped(self.location.x + delta, field_width);
    }

    fn set_x_clamped(&mut self, x: f32, field_width: f32) {
        let max_x = (field_width - self.width).max(0.0);
        self.location.x = x.clamp(0.0, max_x);
    }
}

/// The ball. Purely kinematic: collision response is the engine's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub location: Location,
    pub radius: f32,
    /// Displacement per tick
    pub velocity: Vec2,
}

impl Ball {
    /// Ball resting just above the paddle's center
    pub fn on_paddle(paddle: &Paddle, radius: f32, velocity: Vec2) -> Self {
        Self {
            location: Vec2::new(paddle.center_x(), paddle.location.y - radius - 1.0),
            radius,
            velocity,
        }
    }

    /// Advance by one tick of velocity
    #[inline]
    pub fn move_ball(&mut self) {
        self.location += self.velocity;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub location: Location,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
}

impl Brick {
    pub fn new(location: Location, width: f32, height: f32) -> Self {
        Self {
            location,
            width,
            height,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_location(self.location, self.width, self.height)
    }
}
