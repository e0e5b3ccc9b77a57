//! Errors raised at the application's fallible edges.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("game loop is not running")]
    LoopStopped,
}

pub type AppResult<T> = Result<T, AppError>;
