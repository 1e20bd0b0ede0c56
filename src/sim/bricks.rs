//! Brick field generation and hit lookup

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, ball_rect_collision};
use super::state::{Ball, Brick};
use crate::tuning::Tuning;

/// Grid of bricks in row-major scan order (top-left first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    bricks: Vec<Brick>,
}

impl BrickField {
    /// Populate a fresh grid: `brick_rows` rows of as many bricks as fit
    /// across the field, centred horizontally, every brick alive
    pub fn create_bricks(tuning: &Tuning) -> Self {
        let columns = tuning.brick_columns();
        let margin = (tuning.field_width - columns as f32 * tuning.brick_width) / 2.0;
        let width = (tuning.brick_width - tuning.brick_gap).max(0.0);
        let height = (tuning.brick_height - tuning.brick_gap).max(0.0);
        let half_gap = tuning.brick_gap / 2.0;

        let mut bricks = Vec::with_capacity(columns * tuning.brick_rows);
        for row in 0..tuning.brick_rows {
            let y = tuning.brick_top_offset + row as f32 * tuning.brick_height + half_gap;
            for col in 0..columns {
                let x = margin + col as f32 * tuning.brick_width + half_gap;
                bricks.push(Brick::new(Vec2::new(x, y), width, height));
            }
        }

        log::debug!("Created {} bricks ({} x {})", bricks.len(), tuning.brick_rows, columns);
        Self { bricks }
    }

    /// Build a field from explicit bricks (custom layouts, tests)
    pub fn from_bricks(bricks: Vec<Brick>) -> Self {
        Self { bricks }
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Alive bricks, in scan order
    pub fn alive(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    /// True iff no brick is alive
    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.alive)
    }

    /// First alive brick (scan order) touching the ball
    pub fn first_hit(&self, ball: &Ball) -> Option<(usize, CollisionResult)> {
        self.bricks.iter().enumerate().find_map(|(idx, brick)| {
            if !brick.alive {
                return None;
            }
            let result = ball_rect_collision(ball.location, ball.radius, &brick.rect());
            result.hit.then_some((idx, result))
        })
    }

    /// Kill a brick. Returns false if it was already dead (or out of range)
    pub fn destroy(&mut self, idx: usize) -> bool {
        match self.bricks.get_mut(idx) {
            Some(brick) if brick.alive => {
                brick.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Alive brick lying along the field's bottom edge that the ball touches
    pub fn bottom_brick_at(&self, ball: &Ball, field_height: f32) -> Option<usize> {
        self.bricks.iter().position(|brick| {
            brick.alive
                && brick.rect().bottom() >= field_height
                && ball_rect_collision(ball.location, ball.radius, &brick.rect()).hit
        })
    }
}
