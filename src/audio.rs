//! Audio cues derived from engine state
//!
//! The simulation owns no audio handles. The host polls the engine each frame
//! through `AudioDirector` and plays whatever the returned commands ask for.

use crate::sim::{Engine, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a side or top wall
    WallHit,
    /// Brick destroyed
    BrickBreak,
    /// Ball missed
    LifeLost,
    /// Field cleared
    RoundClear,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// The cue for an engine event
    pub fn for_event(event: &GameEvent) -> SoundEffect {
        match event {
            GameEvent::BrickDestroyed { .. } => SoundEffect::BrickBreak,
            GameEvent::WallBounce => SoundEffect::WallHit,
            GameEvent::PaddleHit => SoundEffect::PaddleHit,
            GameEvent::LifeLost { .. } => SoundEffect::LifeLost,
            GameEvent::RoundCleared { .. } => SoundEffect::RoundClear,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
        }
    }
}

/// What the host should do with the background music
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    StartLoop,
    StopLoop,
    PlayGameOver,
}

/// Turns engine state changes into music commands
#[derive(Debug, Default)]
pub struct AudioDirector {
    playing: bool,
    game_over_played: bool,
}

impl AudioDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the background loop should currently be playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Poll once per frame
    pub fn poll(&mut self, engine: &Engine) -> Vec<MusicCommand> {
        let mut commands = Vec::new();

        if engine.game_over() {
            if !self.game_over_played {
                if self.playing {
                    commands.push(MusicCommand::StopLoop);
                    self.playing = false;
                }
                commands.push(MusicCommand::PlayGameOver);
                self.game_over_played = true;
            }
        } else {
            self.game_over_played = false;
            if !self.playing {
                commands.push(MusicCommand::StartLoop);
                self.playing = true;
            }
        }

        commands
    }
}
