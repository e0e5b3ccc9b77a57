//! Runtime configuration loaded from an optional TOML file.
//!
//! Every field defaults to the compile-time constant in
//! `asteroids_core::constants`, so a file only needs the keys it changes:
//!
//! ```toml
//! seed = 7
//! starting_lives = 5
//! ```

use std::path::Path;

use serde::Deserialize;

use asteroids_core::constants::*;
use asteroids_core::types::CanvasBounds;
use asteroids_sim::SimConfig;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // ── Canvas ───────────────────────────────────────────────────────────
    pub canvas_width: f32,
    pub canvas_height: f32,

    // ── Round ────────────────────────────────────────────────────────────
    pub seed: u64,
    pub starting_lives: u32,
    pub asteroid_count: usize,

    // ── Loop ─────────────────────────────────────────────────────────────
    pub tick_rate_hz: u32,
    /// How long the headless binary plays its scripted session.
    pub demo_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            seed: 42,
            starting_lives: STARTING_LIVES,
            asteroid_count: INITIAL_ASTEROID_COUNT,
            tick_rate_hz: TICK_RATE,
            demo_seconds: 10,
        }
    }
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> AppResult<Self> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(AppError::InvalidConfig(format!(
                "canvas must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(AppError::InvalidConfig("tick_rate_hz must be non-zero".into()));
        }
        if self.starting_lives == 0 {
            return Err(AppError::InvalidConfig("starting_lives must be non-zero".into()));
        }
        Ok(())
    }

    pub fn to_sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            canvas: CanvasBounds::new(self.canvas_width, self.canvas_height),
            starting_lives: self.starting_lives,
            asteroid_count: self.asteroid_count,
        }
    }
}
