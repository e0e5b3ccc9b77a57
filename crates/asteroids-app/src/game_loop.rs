//! Game loop thread: steps the simulation engine at a fixed rate.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via `mpsc` channel; the latest snapshot is stored in shared
//! state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use asteroids_core::input::InputState;
use asteroids_core::state::GameStateSnapshot;
use asteroids_sim::engine::{SimConfig, SimulationEngine};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::state::{GameHandle, GameLoopCommand};

/// Nominal duration of one tick at the given rate.
pub fn tick_duration(tick_rate_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate_hz.max(1)))
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: &AppConfig) -> AppResult<GameHandle> {
    config.validate()?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let sim_config = config.to_sim_config();
    let tick = tick_duration(config.tick_rate_hz);

    let shared = Arc::clone(&latest_snapshot);
    let thread = std::thread::Builder::new()
        .name("asteroids-game-loop".into())
        .spawn(move || {
            run_game_loop(sim_config, tick, cmd_rx, &shared);
        })
        .map_err(AppError::Spawn)?;

    info!(tick_rate_hz = config.tick_rate_hz, seed = config.seed, "game loop started");
    Ok(GameHandle::new(cmd_tx, latest_snapshot, thread))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    sim_config: SimConfig,
    tick: Duration,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(sim_config);
    let mut input = InputState::new();
    let mut phase = engine.phase();
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::SetInput(held)) => input = held,
                Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick by the real time since the previous one
        let now = Instant::now();
        let snapshot = engine.tick(&input, now - last_tick);
        last_tick = now;

        if snapshot.phase != phase {
            debug!(from = ?phase, to = ?snapshot.phase, "phase changed");
            phase = snapshot.phase;
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += tick;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids_core::commands::PlayerCommand;
    use asteroids_core::enums::{GamePhase, Key};

    fn wait_for(handle: &GameHandle, pred: impl Fn(&GameStateSnapshot) -> bool) -> GameStateSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snap) = handle.latest() {
                if pred(&snap) {
                    return snap;
                }
            }
            assert!(Instant::now() < deadline, "game loop never reached expected state");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    fn fast_config() -> AppConfig {
        AppConfig {
            tick_rate_hz: 500,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::SetInput(InputState::with_keys([Key::Space])))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartGame)
        ));
        assert!(matches!(&commands[1], GameLoopCommand::SetInput(i) if i.fire()));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(60).as_nanos(), 1_000_000_000u128 / 60);
        assert_eq!(tick_duration(30).as_nanos(), 1_000_000_000u128 / 30);
    }

    #[test]
    fn test_loop_starts_round_and_shuts_down() {
        let handle = spawn_game_loop(&fast_config()).unwrap();
        assert!(handle.is_running());

        let snap = wait_for(&handle, |_| true);
        assert_eq!(snap.phase, GamePhase::Splash);

        handle.player(PlayerCommand::StartGame).unwrap();
        let snap = wait_for(&handle, |s| s.phase == GamePhase::Playing);
        assert_eq!(snap.asteroids.len(), 4);
        assert!(snap.ship.is_some());

        handle.shutdown();
    }

    #[test]
    fn test_held_input_reaches_engine() {
        let handle = spawn_game_loop(&fast_config()).unwrap();
        handle
            .set_input(InputState::with_keys([Key::ArrowLeft]))
            .unwrap();
        // Leaving the splash screen, then turning every tick.
        let snap = wait_for(&handle, |s| {
            s.ship
                .as_ref()
                .is_some_and(|ship| (ship.rotation - std::f32::consts::PI).abs() < 1.0)
        });
        assert_eq!(snap.phase, GamePhase::Playing);
        handle.shutdown();
    }

    #[test]
    fn test_invalid_config_does_not_spawn() {
        let config = AppConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert!(matches!(
            spawn_game_loop(&config),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_snapshot_serialization_is_fast() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame);
        for _ in 0..50 {
            engine.tick(&InputState::new(), tick_duration(60));
        }

        let snapshot = engine.tick(&InputState::new(), tick_duration(60));
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
