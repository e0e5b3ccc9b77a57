//! Explicit player commands, processed at the next tick boundary.
//!
//! Held keys drive the same transitions; commands exist for frontends
//! that expose start/restart as buttons.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Leave the splash screen and start the first round.
    StartGame,
    /// Start a new round from the game-over screen.
    Restart,
}
