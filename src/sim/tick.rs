//! Per-frame input application and engine update
//!
//! The host gathers input for a frame into a `TickInput` and calls `tick`
//! once per frame.

use super::engine::Engine;
use super::geometry::Direction;
use super::state::GameEvent;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Paddle move request (arrow keys / A-D)
    pub direction: Option<Direction>,
    /// Start/confirm signal (Enter)
    pub start: bool,
    /// Idle/demo mode - the paddle follows the ball
    pub autopilot: bool,
}

/// Apply one frame of input, then advance the engine by one tick
pub fn tick(engine: &mut Engine, input: &TickInput, frame: u64) -> Vec<GameEvent> {
    let mut input = input.clone();

    if input.autopilot {
        // Serve automatically
        if !engine.has_started() && !engine.game_over() {
            input.start = true;
        }

        // Aim slightly off the ball, drifting over time, so demo play
        // does not lock into a perfect loop
        let time_factor = frame as f32 * 0.01;
        let offset = (time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15)
            * engine.paddle().width;
        let target = engine.ball().location.x + offset;
        engine.steer_paddle_toward(target);
    } else if let Some(direction) = input.direction {
        engine.move_paddle(direction);
    }

    if input.start {
        engine.start();
    }

    engine.update()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    #[test]
    fn test_tick_not_started_to_in_round() {
        let mut engine = Engine::new(Tuning::default(), 12345);
        assert_eq!(engine.phase(), GamePhase::NotStarted);

        // Tick without start - stays parked
        tick(&mut engine, &TickInput::default(), 0);
        assert_eq!(engine.phase(), GamePhase::NotStarted);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut engine, &input, 1);
        assert_eq!(engine.phase(), GamePhase::InRound);
    }

    #[test]
    fn test_tick_moves_paddle() {
        let mut engine = Engine::new(Tuning::default(), 1);
        let x = engine.paddle().location.x;
        let input = TickInput {
            direction: Some(Direction::Right),
            ..Default::default()
        };
        tick(&mut engine, &input, 0);
        assert_eq!(engine.paddle().location.x, x + engine.tuning().paddle_step);
    }

    #[test]
    fn test_autopilot_serves_and_plays() {
        let mut engine = Engine::new(Tuning::default(), 42);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let mut destroyed = 0;
        for frame in 0..3_000 {
            let events = tick(&mut engine, &input, frame);
            destroyed += events
                .iter()
                .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
                .count();
            if engine.game_over() {
                break;
            }
        }
        assert!(destroyed > 0);
        assert_eq!(engine.score(), destroyed as u64 * engine.tuning().score_per_brick);
    }

    #[test]
    fn test_determinism() {
        // Two engines with same seed and inputs stay identical
        let mut engine1 = Engine::new(Tuning::default(), 99999);
        let mut engine2 = Engine::new(Tuning::default(), 99999);

        let inputs = [
            TickInput {
                direction: Some(Direction::Left),
                ..Default::default()
            },
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                direction: Some(Direction::Right),
                ..Default::default()
            },
            TickInput::default(),
        ];

        for (frame, input) in inputs.iter().enumerate() {
            tick(&mut engine1, input, frame as u64);
            tick(&mut engine2, input, frame as u64);
        }

        assert_eq!(engine1.ball().location, engine2.ball().location);
        assert_eq!(engine1.paddle().location, engine2.paddle().location);
        assert_eq!(engine1.phase(), engine2.phase());
    }
}
