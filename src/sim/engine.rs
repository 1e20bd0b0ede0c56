//! The engine: owns paddle, ball and bricks, and runs one tick of the game
//!
//! Per tick while in a round:
//! 1. `bounces` - walls flip the velocity component heading out of the field
//! 2. `move_ball`
//! 3. `brick_collisions` - at most one brick per tick
//! 4. `paddle_hit_check` - always sends the ball upward
//! 5. `edge_checks` - a ball reaching the bottom costs a life
//!
//! `update` runs these in order, then resolves a lost life (`reset`) or a
//! cleared field (`next_round`) before returning.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::bricks::BrickField;
use super::collision::{CollisionResult, ball_rect_collision, bounce_velocity};
use super::geometry::{Direction, Rect};
use super::state::{Ball, GameEvent, GamePhase, Paddle};
use crate::consts::FIRST_ROUND;
use crate::tuning::{BouncePolicy, Tuning};

/// Read-only view for the render collaborator
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball_center: Vec2,
    pub ball_radius: f32,
    /// Alive bricks only
    pub bricks: Vec<Rect>,
    pub score: u64,
    pub lives: u32,
    pub round: u32,
    pub phase: GamePhase,
}

#[derive(Debug, Clone)]
pub struct Engine {
    tuning: Tuning,
    phase: GamePhase,
    score: u64,
    lives: u32,
    round: u32,
    paddle: Paddle,
    ball: Ball,
    bricks: BrickField,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Engine {
    /// A fresh game: full lives, first round, ball parked on the paddle.
    /// Invalid tuning is replaced by the defaults.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                log::warn!("{}, using default tuning", err);
                Tuning::default()
            }
        };
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&tuning);
        let ball = Ball::on_paddle(&paddle, tuning.ball_radius, serve_velocity(&tuning, &mut rng));
        let bricks = BrickField::create_bricks(&tuning);

        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            lives: tuning.starting_lives,
            round: FIRST_ROUND,
            paddle,
            ball,
            bricks,
            rng,
            events: Vec::new(),
            tuning,
        }
    }

    // --- Accessors ---

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether physics ticks run
    pub fn has_started(&self) -> bool {
        self.phase == GamePhase::InRound
    }

    pub fn is_in_game(&self) -> bool {
        self.has_started()
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Host-side adjustments to the ball (serve tweaks, scripted demos)
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn bricks(&self) -> &BrickField {
        &self.bricks
    }

    /// Replace the current layout (custom levels)
    pub fn set_bricks(&mut self, bricks: BrickField) {
        self.bricks = bricks;
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: self.paddle.rect(),
            ball_center: self.ball.location,
            ball_radius: self.ball.radius,
            bricks: self.bricks.alive().map(|b| b.rect()).collect(),
            score: self.score,
            lives: self.lives,
            round: self.round,
            phase: self.phase,
        }
    }

    // --- Input ---

    /// Start signal. Returns true if a round began
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted || self.lives == 0 {
            return false;
        }
        self.phase = GamePhase::InRound;
        log::debug!("Round {} in play ({} lives)", self.round, self.lives);
        true
    }

    /// Start (`true`) or park (`false`) the current round
    pub fn set_game_state(&mut self, started: bool) {
        if started {
            self.start();
        } else if self.phase == GamePhase::InRound {
            self.phase = GamePhase::NotStarted;
        }
    }

    pub fn move_paddle(&mut self, direction: Direction) {
        if self.game_over() {
            return;
        }
        self.paddle.move_paddle(direction, self.tuning.field_width);
    }

    /// Autopilot helper: slide the paddle toward `target_x`
    pub fn steer_paddle_toward(&mut self, target_x: f32) {
        if self.game_over() {
            return;
        }
        self.paddle.move_toward(target_x, self.tuning.field_width);
    }

    // --- Tick protocol ---

    /// Run one tick and resolve lifecycle transitions. No-op unless in a round
    pub fn update(&mut self) -> Vec<GameEvent> {
        if self.phase != GamePhase::InRound {
            return Vec::new();
        }

        self.bounces();
        self.move_ball();
        self.brick_collisions();
        self.paddle_hit_check();
        self.edge_checks();

        if self.life_over() {
            self.reset();
        }
        if !self.game_over() && self.is_round_over() {
            self.phase = GamePhase::RoundOver;
            self.events.push(GameEvent::RoundCleared { round: self.round });
            self.next_round();
        }

        self.take_events()
    }

    /// Flip the velocity component that would carry the ball through the
    /// left, right or top wall on this tick
    pub fn bounces(&mut self) -> bool {
        let width = self.tuning.field_width;
        let ball = &mut self.ball;
        let r = ball.radius;
        let next = ball.location + ball.velocity;
        let mut bounced = false;

        if (next.x - r < 0.0 && ball.velocity.x < 0.0) || (next.x + r > width && ball.velocity.x > 0.0) {
            ball.velocity.x = -ball.velocity.x;
            bounced = true;
        }
        if next.y - r < 0.0 && ball.velocity.y < 0.0 {
            ball.velocity.y = -ball.velocity.y;
            bounced = true;
        }

        self.keep_ball_in_field();
        if bounced {
            self.events.push(GameEvent::WallBounce);
        }
        bounced
    }

    pub fn move_ball(&mut self) {
        self.ball.move_ball();
    }

    /// Resolve the first brick (scan order) the ball touches
    pub fn brick_collisions(&mut self) -> bool {
        match self.bricks.first_hit(&self.ball) {
            Some((idx, contact)) => self.resolve_brick_hit(idx, &contact),
            None => false,
        }
    }

    /// A ball at the bottom edge touching a brick that sits on that edge is
    /// a brick hit, not a miss. Resolves the hit if so.
    pub fn bottom_brick_collision(&mut self) -> bool {
        if !self.ball_at_bottom() {
            return false;
        }
        let Some(idx) = self.bricks.bottom_brick_at(&self.ball, self.tuning.field_height) else {
            return false;
        };
        // Always struck from above: the ball goes back up
        let top = self.bricks.bricks()[idx].rect().top();
        let contact = CollisionResult {
            hit: true,
            point: Vec2::new(self.ball.location.x, top),
            normal: Vec2::NEG_Y,
            penetration: (self.ball.location.y + self.ball.radius - top).max(0.0),
        };
        self.resolve_brick_hit(idx, &contact)
    }

    /// Send the ball upward if it touches the paddle
    pub fn paddle_hit_check(&mut self) -> bool {
        let paddle_rect = self.paddle.rect();
        let contact = ball_rect_collision(self.ball.location, self.ball.radius, &paddle_rect);
        if !contact.hit {
            return false;
        }

        let ball = &mut self.ball;
        match self.tuning.bounce_policy {
            BouncePolicy::Vertical => {
                ball.velocity.y = -ball.velocity.y.abs();
            }
            BouncePolicy::Angled { max_angle } => {
                let half_width = (self.paddle.width / 2.0).max(f32::EPSILON);
                let offset = ((ball.location.x - self.paddle.center_x()) / half_width).clamp(-1.0, 1.0);
                let angle = offset * max_angle;
                let speed = ball.speed();
                ball.velocity = Vec2::new(speed * angle.sin(), -speed * angle.cos());
            }
        }

        // Sit on top of the paddle so the next tick cannot hit it again
        ball.location.y = ball.location.y.min(paddle_rect.top() - ball.radius);
        self.keep_ball_in_field();
        self.events.push(GameEvent::PaddleHit);
        true
    }

    /// A ball reaching the bottom edge costs a life
    pub fn edge_checks(&mut self) -> bool {
        if !self.ball_at_bottom() || self.ball.velocity.y <= 0.0 {
            return false;
        }
        if self.bottom_brick_collision() {
            return false;
        }

        self.ball.location.y = self.tuning.field_height - self.ball.radius;
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost { lives_left: self.lives });

        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over: score {} in round {}", self.score, self.round);
        } else {
            self.phase = GamePhase::LifeOver;
            log::info!("Life lost, {} remaining", self.lives);
        }
        true
    }

    pub fn life_over(&self) -> bool {
        self.phase == GamePhase::LifeOver
    }

    /// True iff every brick is dead
    pub fn is_round_over(&self) -> bool {
        self.bricks.all_destroyed()
    }

    // --- Lifecycle ---

    /// Respawn paddle and ball; bricks are untouched
    pub fn reset(&mut self) {
        self.paddle = Paddle::new(&self.tuning);
        let velocity = serve_velocity(&self.tuning, &mut self.rng);
        self.ball = Ball::on_paddle(&self.paddle, self.tuning.ball_radius, velocity);
        if self.phase != GamePhase::GameOver {
            self.phase = GamePhase::NotStarted;
        }
    }

    /// Advance to the next round with a fresh field
    pub fn next_round(&mut self) {
        self.round += 1;
        self.bricks = BrickField::create_bricks(&self.tuning);
        self.reset();
        log::info!("Round {} ready (score {})", self.round, self.score);
    }

    /// Start over from round one with full lives and no score
    pub fn new_game(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.round = FIRST_ROUND;
        self.bricks = BrickField::create_bricks(&self.tuning);
        self.events.clear();
        self.phase = GamePhase::NotStarted;
        self.reset();
        log::info!("New game");
    }

    // --- Helpers ---

    fn resolve_brick_hit(&mut self, idx: usize, contact: &CollisionResult) -> bool {
        if !contact.hit || !self.bricks.destroy(idx) {
            return false;
        }
        self.score += self.tuning.score_per_brick;
        self.ball.velocity = bounce_velocity(self.ball.velocity, contact.normal);
        self.ball.location += contact.normal * contact.penetration;
        self.keep_ball_in_field();
        self.events.push(GameEvent::BrickDestroyed {
            index: idx,
            points: self.tuning.score_per_brick,
        });
        true
    }

    fn ball_at_bottom(&self) -> bool {
        self.ball.location.y + self.ball.radius >= self.tuning.field_height
    }

    /// Clamp against the side and top walls. The bottom is open
    fn keep_ball_in_field(&mut self) {
        let r = self.ball.radius;
        let max_x = (self.tuning.field_width - r).max(r);
        self.ball.location.x = self.ball.location.x.clamp(r, max_x);
        self.ball.location.y = self.ball.location.y.max(r);
    }
}

/// Serve upward, horizontal direction picked by the seeded RNG
fn serve_velocity(tuning: &Tuning, rng: &mut Pcg32) -> Vec2 {
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    Vec2::new(tuning.ball_serve_vx.abs() * sign, -tuning.ball_serve_vy.abs())
}
