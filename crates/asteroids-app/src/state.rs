//! Handle shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use asteroids_core::commands::PlayerCommand;
use asteroids_core::input::InputState;
use asteroids_core::state::GameStateSnapshot;

use crate::error::{AppError, AppResult};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Replace the set of held keys read by every following tick.
    SetInput(InputState),
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Owner's side of a running game loop.
///
/// The latest snapshot lives behind `Arc<Mutex<..>>` so a reader can poll it
/// without waiting on the loop.
pub struct GameHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    thread: Option<JoinHandle<()>>,
}

impl GameHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<GameLoopCommand>,
        latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            latest_snapshot,
            thread: Some(thread),
        }
    }

    pub fn send(&self, command: GameLoopCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .map_err(|_| AppError::LoopStopped)
    }

    pub fn set_input(&self, input: InputState) -> AppResult<()> {
        self.send(GameLoopCommand::SetInput(input))
    }

    pub fn player(&self, command: PlayerCommand) -> AppResult<()> {
        self.send(GameLoopCommand::Player(command))
    }

    /// Clone of the most recent snapshot, if any tick has run yet.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
