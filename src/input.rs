//! Keyboard state tracking
//!
//! Turns key-down/key-up events into the `InputState` a tick reads. Movement
//! keys are level-triggered (held = pressed). Shoot and jump are
//! edge-triggered: one press fires once, no matter how long the key is held
//! or how many auto-repeat events arrive.

use serde::{Deserialize, Serialize};

use crate::sim::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Forward,
    Backward,
    Shoot,
    Jump,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyA" => Some(Key::Left),
            "KeyD" => Some(Key::Right),
            "KeyW" => Some(Key::Forward),
            "KeyS" => Some(Key::Backward),
            "KeyE" => Some(Key::Shoot),
            "Space" => Some(Key::Jump),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Left => "A",
            Key::Right => "D",
            Key::Forward => "W",
            Key::Backward => "S",
            Key::Shoot => "E",
            Key::Jump => "Space",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    held: InputState,
    shoot_latched: bool,
    jump_latched: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.held.move_left = true,
            Key::Right => self.held.move_right = true,
            Key::Forward => self.held.move_forward = true,
            Key::Backward => self.held.move_backward = true,
            Key::Shoot => {
                if !self.held.shoot {
                    self.shoot_latched = true;
                }
                self.held.shoot = true;
            }
            Key::Jump => {
                if !self.held.jump {
                    self.jump_latched = true;
                }
                self.held.jump = true;
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.held.move_left = false,
            Key::Right => self.held.move_right = false,
            Key::Forward => self.held.move_forward = false,
            Key::Backward => self.held.move_backward = false,
            Key::Shoot => self.held.shoot = false,
            Key::Jump => self.held.jump = false,
        }
    }

    /// `code`-based convenience for DOM-style events; unknown codes are ignored
    pub fn handle_code(&mut self, code: &str, pressed: bool) {
        if let Some(key) = Key::from_code(code) {
            if pressed {
                self.key_down(key);
            } else {
                self.key_up(key);
            }
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.held.move_left,
            Key::Right => self.held.move_right,
            Key::Forward => self.held.move_forward,
            Key::Backward => self.held.move_backward,
            Key::Shoot => self.held.shoot,
            Key::Jump => self.held.jump,
        }
    }

    /// Copy held movement into `input` and hand over pending one-shots
    ///
    /// A one-shot already pending in `input` (not yet consumed by a tick) is
    /// kept rather than overwritten.
    pub fn apply(&mut self, input: &mut InputState) {
        input.move_left = self.held.move_left;
        input.move_right = self.held.move_right;
        input.move_forward = self.held.move_forward;
        input.move_backward = self.held.move_backward;
        input.shoot |= std::mem::take(&mut self.shoot_latched);
        input.jump |= std::mem::take(&mut self.jump_latched);
    }

    /// Forget all keys (new round, focus lost)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
