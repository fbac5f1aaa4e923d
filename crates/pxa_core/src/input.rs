//! Keyboard and pointer state, fed by window events and read by the fixed step.
//!
//! Keys are tracked two ways. `is_held` is level-triggered and true on every
//! frame the key is down; movement and jumping read it. `is_just_pressed` is
//! edge-triggered and true only until `end_frame()`, which the main loop calls
//! after at least one fixed step ran, so a press is never dropped on a frame
//! with zero steps.
//!
//! Pointer presses are additionally queued as clicks carrying the cursor
//! position at press time. The queue is drained by whoever dispatches clicks.

use std::collections::HashSet;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    Space,
    Escape,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub button: MouseBtn,
    /// Cursor position in window pixels.
    pub position: Vec2,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    mouse_held: HashSet<MouseBtn>,
    clicks: Vec<Click>,
    pub cursor: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Buttons do not auto-repeat, so every press is a click even if the
    /// matching release never arrived.
    pub fn mouse_down(&mut self, button: MouseBtn) {
        self.mouse_held.insert(button);
        self.clicks.push(Click {
            button,
            position: self.cursor,
        });
    }

    pub fn mouse_up(&mut self, button: MouseBtn) {
        self.mouse_held.remove(&button);
    }

    /// Drop every held key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.mouse_held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// True if any of `keys` is held.
    pub fn any_held(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.held.contains(k))
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_mouse_held(&self, button: MouseBtn) -> bool {
        self.mouse_held.contains(&button)
    }

    pub fn pending_clicks(&self) -> usize {
        self.clicks.len()
    }

    /// Take every queued click in press order.
    pub fn drain_clicks(&mut self) -> Vec<Click> {
        std::mem::take(&mut self.clicks)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }
}
