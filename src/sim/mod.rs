//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One update per host frame, no wall-clock time
//! - Seeded RNG only
//! - Stable brick scan order (row-major, top-left first)
//! - No rendering, audio or storage dependencies

pub mod bricks;
pub mod collision;
pub mod engine;
pub mod geometry;
pub mod state;
pub mod tick;

pub use bricks::BrickField;
pub use collision::{CollisionResult, ball_rect_collision, reflect_velocity};
pub use engine::{Engine, Snapshot};
pub use geometry::{Direction, Location, Rect};
pub use state::{Ball, Brick, GameEvent, GamePhase, Paddle};
pub use tick::{TickInput, tick};
