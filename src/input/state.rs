//! Input state management
//!
//! Polls the macroquad keyboard through a binding table and condenses it
//! into the per-tick `InputSnapshot` the simulation reads.

use macroquad::prelude::*;

use super::{default_bindings, Action};
use crate::game::InputSnapshot;

pub struct InputState {
    bindings: Vec<(Action, KeyCode)>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }

    fn keys(&self, action: Action) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(a, _)| *a == action)
            .map(|(_, key)| *key)
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keys(action).any(is_key_down)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keys(action).any(is_key_pressed)
    }

    /// Movement is held, jump is an edge, fire is held.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            jump_pressed: self.action_pressed(Action::Jump),
            fire_held: self.action_down(Action::Fire),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
