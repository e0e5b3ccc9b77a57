//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world (ship, bullets, asteroids), the
//! particle system, score, and the game phase. It reads the held keys once
//! per tick, runs every system in a fixed order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::time::Duration;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use asteroids_core::commands::PlayerCommand;
use asteroids_core::components::Ship;
use asteroids_core::constants::*;
use asteroids_core::enums::GamePhase;
use asteroids_core::events::GameEvent;
use asteroids_core::input::InputState;
use asteroids_core::state::GameStateSnapshot;
use asteroids_core::types::{CanvasBounds, SimTime};

use crate::particles::ParticleSystem;
use crate::systems;
use crate::systems::collision::ShipHit;
use crate::timer::{self, OneShotTimer, TimerToken};
use crate::world_setup;

/// Configuration for a game session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Canvas size; fixed for the whole session.
    pub canvas: CanvasBounds,
    pub starting_lives: u32,
    /// Asteroids seeded at the start of each round.
    pub asteroid_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            canvas: CanvasBounds::default(),
            starting_lives: STARTING_LIVES,
            asteroid_count: INITIAL_ASTEROID_COUNT,
        }
    }
}

/// Score for the current round plus the best score this process has seen.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub score: u32,
    pub high_score: u32,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    particles: ParticleSystem,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    score: ScoreState,
    /// Incremented on every round start; keys the game-over timer.
    round: u64,
    game_over_timer: Option<OneShotTimer>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine sitting on the splash screen.
    pub fn new(config: SimConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world: World::new(),
            particles: ParticleSystem::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            score: ScoreState::default(),
            round: 0,
            game_over_timer: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one frame that took `elapsed` of real time,
    /// with `input` holding the keys currently down.
    pub fn tick(&mut self, input: &InputState, elapsed: Duration) -> GameStateSnapshot {
        self.time.advance(elapsed);

        let was_playing = self.phase == GamePhase::Playing;
        self.process_commands();
        self.process_input(input);

        // The frame that starts a round only builds it.
        if was_playing && self.phase == GamePhase::Playing {
            self.run_systems(input);
        }
        self.particles.update();
        self.fire_due_timers();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.particles,
            &self.time,
            self.phase,
            self.config.canvas,
            &self.score,
            self.config.starting_lives,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score
    }

    /// Lives left on the ship, or the starting lives before the first round.
    pub fn lives(&self) -> u32 {
        self.world
            .query::<&Ship>()
            .iter()
            .next()
            .map(|(_, ship)| ship.lives)
            .unwrap_or(self.config.starting_lives)
    }

    pub fn canvas(&self) -> CanvasBounds {
        self.config.canvas
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Mutable world access for tests that stage exact scenes.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Whether a game-over transition is still pending.
    #[cfg(test)]
    pub fn game_over_pending(&self) -> bool {
        self.game_over_timer.is_some()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match (command, self.phase) {
                (PlayerCommand::StartGame, GamePhase::Splash)
                | (PlayerCommand::Restart, GamePhase::GameOver) => self.start_round(),
                _ => {}
            }
        }
    }

    /// Any key leaves the splash screen; Enter restarts after game over.
    fn process_input(&mut self, input: &InputState) {
        match self.phase {
            GamePhase::Splash if input.any_down() => self.start_round(),
            GamePhase::GameOver if input.confirm() => self.start_round(),
            _ => {}
        }
    }

    /// Tear down whatever is left and build a fresh round.
    fn start_round(&mut self) {
        self.round += 1;
        self.game_over_timer = None;
        self.world.clear();
        self.particles.clear();
        self.score.score = 0;

        world_setup::setup_round(
            &mut self.world,
            &mut self.rng,
            &self.config.canvas,
            self.config.starting_lives,
            self.config.asteroid_count,
        );

        self.phase = GamePhase::Playing;
        info!(round = self.round, lives = self.config.starting_lives, "round started");
        self.events.push(GameEvent::RoundStarted {
            lives: self.config.starting_lives,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self, input: &InputState) {
        let bounds = self.config.canvas;

        // 1. Ship: turn, thrust, move, fire latch, invulnerability countdown
        let shots = systems::ship::run(&mut self.world, input, &bounds, &mut self.events);
        // 2. Bullets in flight (this tick's shots start moving next tick)
        systems::bullets::run(&mut self.world, &bounds);
        for shot in shots {
            systems::bullets::spawn(&mut self.world, shot);
        }
        // 3. Asteroid drift and spin
        systems::asteroid::run(&mut self.world, &bounds);
        // 4. Bullet × asteroid
        let hits = systems::collision::bullets_vs_asteroids(
            &mut self.world,
            &mut self.rng,
            &mut self.particles,
            &mut self.events,
        );
        self.score.score += hits.points;
        // 5. Ship × asteroid
        let ship_hit = systems::collision::ship_vs_asteroids(
            &mut self.world,
            &bounds,
            &mut self.rng,
            &mut self.particles,
            &mut self.events,
        );
        if ship_hit == Some(ShipHit::OutOfLives) {
            self.game_over_timer = Some(OneShotTimer::new(
                TimerToken(self.round),
                self.time.elapsed,
                GAME_OVER_DELAY,
            ));
        }
        // 6. Prune expired bullets
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 7. Reload once the magazine is empty and the sky is clear
        systems::ship::refill_ammo(&mut self.world, &mut self.events);
    }

    /// Fire the game-over timer if its deadline has passed.
    fn fire_due_timers(&mut self) {
        let due = timer::take_due(
            &mut self.game_over_timer,
            TimerToken(self.round),
            self.time.elapsed,
        );
        if due && self.phase == GamePhase::Playing {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.score.high_score = self.score.high_score.max(self.score.score);
        self.phase = GamePhase::GameOver;
        info!(
            score = self.score.score,
            high_score = self.score.high_score,
            "game over"
        );
        self.events.push(GameEvent::GameOver {
            score: self.score.score,
            high_score: self.score.high_score,
        });
    }
}
