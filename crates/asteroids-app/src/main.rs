//! Headless asteroids session.
//!
//! Usage: `asteroids-app [config.toml]`. Runs the game loop thread, feeds it a
//! scripted pilot, paints each polled snapshot onto a recording surface, and
//! logs the HUD once per second.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use asteroids_app::config::AppConfig;
use asteroids_app::error::AppResult;
use asteroids_app::game_loop;
use asteroids_app::render::{draw_frame, CommandRecorder};
use asteroids_core::commands::PlayerCommand;
use asteroids_core::enums::{GamePhase, Key};
use asteroids_core::input::InputState;
use asteroids_core::types::CanvasBounds;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Keys the scripted pilot holds at a given point in the session.
fn pilot(elapsed: Duration) -> InputState {
    let beat = elapsed.as_millis() / 100;
    let mut keys = vec![];
    match beat % 30 {
        0..=7 => keys.push(Key::ArrowLeft),
        8..=11 => keys.push(Key::ArrowUp),
        20..=23 => keys.push(Key::ArrowRight),
        _ => {}
    }
    if beat % 3 == 0 {
        keys.push(Key::Space);
    }
    InputState::with_keys(keys)
}

fn run(config: AppConfig) -> AppResult<()> {
    let handle = game_loop::spawn_game_loop(&config)?;
    handle.player(PlayerCommand::StartGame)?;

    let mut recorder = CommandRecorder::new(CanvasBounds::new(
        config.canvas_width,
        config.canvas_height,
    ));
    let started = Instant::now();
    let session = Duration::from_secs(config.demo_seconds);
    let mut next_report = Duration::from_secs(1);

    while started.elapsed() < session {
        let elapsed = started.elapsed();
        handle.set_input(pilot(elapsed))?;

        if let Some(snapshot) = handle.latest() {
            recorder.reset();
            draw_frame(&snapshot, &mut recorder);
            debug!(
                tick = snapshot.time.tick,
                draw_calls = recorder.commands.len(),
                "frame"
            );

            if snapshot.phase == GamePhase::GameOver {
                handle.player(PlayerCommand::Restart)?;
            }
            if elapsed >= next_report {
                let hud = snapshot.hud;
                info!(
                    phase = ?snapshot.phase,
                    score = hud.score,
                    high_score = hud.high_score,
                    lives = hud.lives,
                    bullets = hud.bullets_remaining,
                    asteroids = snapshot.asteroids.len(),
                    "hud"
                );
                next_report += Duration::from_secs(1);
            }
        }

        std::thread::sleep(Duration::from_millis(50));
    }

    handle.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match AppConfig::load(&path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded config");
                config
            }
            Err(err) => {
                error!(%err, "config error");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session failed");
            ExitCode::FAILURE
        }
    }
}
