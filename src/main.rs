//! Brick Breaker headless host
//!
//! Plays one autopilot game, records the score and prints the leaderboard.
//!
//! Environment:
//! - `BRICK_BREAKER_SETTINGS` - settings file (default `settings.json`)
//! - `BRICK_BREAKER_TUNING` - gameplay tuning file, overrides `tuning_path`
//!
//! The first argument, if present, is the player name.

use std::path::PathBuf;

use brick_breaker::audio::{AudioDirector, MusicCommand, SoundEffect};
use brick_breaker::persistence::JsonLinesStore;
use brick_breaker::sim::{Engine, GameEvent, TickInput, tick};
use brick_breaker::{Leaderboard, LeaderboardError, Player, Settings, Tuning};

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let settings_path = std::env::var_os("BRICK_BREAKER_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let mut settings = Settings::load(&settings_path);
    if let Some(name) = std::env::args().nth(1) {
        settings.player_name = name;
    }

    let tuning = match std::env::var_os("BRICK_BREAKER_TUNING")
        .map(PathBuf::from)
        .or_else(|| settings.tuning_path.clone())
    {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    let score = play_demo(tuning, &settings);
    println!("{} finished with {}", settings.player_name, score);

    if let Err(err) = record_and_report(&settings, score) {
        // The game itself is done; a missing leaderboard only costs the table
        log::warn!("Leaderboard unavailable: {}", err);
    }
}

/// Run the autopilot until game over or the tick cap
fn play_demo(tuning: Tuning, settings: &Settings) -> u64 {
    let mut engine = Engine::new(tuning, settings.seed);
    let mut director = AudioDirector::new();
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    let mut frame = 0u64;
    while frame < settings.max_demo_ticks {
        play_music(director.poll(&engine), settings);

        let events = tick(&mut engine, &input, frame);
        for event in &events {
            log::trace!("{:?} -> {:?}", event, SoundEffect::for_event(event));
            if let GameEvent::RoundCleared { round } = event {
                log::info!("Round {} cleared, score {}", round, engine.score());
            }
        }

        if engine.game_over() {
            play_music(director.poll(&engine), settings);
            break;
        }
        frame += 1;
    }

    if !engine.game_over() {
        log::info!("Tick cap reached in round {}", engine.round());
    }
    engine.score()
}

fn play_music(commands: Vec<MusicCommand>, settings: &Settings) {
    for command in commands {
        log::debug!(
            "Music {:?} at volume {:.2}",
            command,
            settings.effective_music_volume()
        );
    }
}

fn record_and_report(settings: &Settings, score: u64) -> Result<(), LeaderboardError> {
    let store = JsonLinesStore::open(&settings.leaderboard_path)?;
    let mut leaderboard = Leaderboard::new(store);
    let player = Player::new(settings.player_name.clone(), score);
    leaderboard.add_score(&player)?;

    println!("\nTop scores:");
    for (rank, row) in leaderboard
        .top_scores(settings.scores_to_show)?
        .iter()
        .enumerate()
    {
        println!("{:>3}. {}", rank + 1, row);
    }

    println!("\n{}'s top scores:", player.name());
    for row in leaderboard.player_scores(player.name(), settings.scores_to_show)? {
        println!("     {}", row);
    }

    println!("\nAround you:");
    for row in leaderboard.scores_around(&player, settings.scores_to_show)? {
        println!("     {}", row);
    }
    Ok(())
}
