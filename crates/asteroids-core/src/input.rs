//! Snapshot of the keys currently held down.
//!
//! Maintained by whatever owns the keyboard; the simulation only reads it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Key;

/// The set of keys held at the moment a tick runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: BTreeSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an input state with the given keys held.
    pub fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: keys.into_iter().collect(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn any_down(&self) -> bool {
        !self.held.is_empty()
    }

    pub fn turn_left(&self) -> bool {
        self.is_down(Key::ArrowLeft)
    }

    pub fn turn_right(&self) -> bool {
        self.is_down(Key::ArrowRight)
    }

    pub fn thrust(&self) -> bool {
        self.is_down(Key::ArrowUp)
    }

    pub fn fire(&self) -> bool {
        self.is_down(Key::Space)
    }

    pub fn confirm(&self) -> bool {
        self.is_down(Key::Enter)
    }
}
