//! Input events and the per-game input queue
//!
//! Host callbacks only ever push events here. The owning game drains the
//! queue once at the start of each `update`, which keeps the simulation
//! deterministic with respect to the order events arrived in.

use std::collections::{BTreeSet, VecDeque};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent` (`key`, `code`) pair to a logical key
    pub fn from_dom(key: &str, code: &str) -> Option<Self> {
        if code == "Space" || key == " " {
            return Some(Key::Space);
        }
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map `MouseEvent.button` to a pointer button
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

/// A discrete input event, positions in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown { button: PointerButton, pos: Vec2 },
    PointerUp { button: PointerButton, pos: Vec2 },
}

/// Pending events plus the set of currently held keys
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputQueue {
    pending: VecDeque<InputEvent>,
    held: BTreeSet<Key>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next update
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Number of events waiting to be drained
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply queued key transitions to the held set and hand back every
    /// queued event, oldest first, for one-shot handling
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let events: Vec<InputEvent> = self.pending.drain(..).collect();
        for event in &events {
            match *event {
                InputEvent::KeyDown(key) => {
                    self.held.insert(key);
                }
                InputEvent::KeyUp(key) => {
                    self.held.remove(&key);
                }
                _ => {}
            }
        }
        events
    }

    /// Like `drain`, but throws the one-shot events away
    pub fn settle(&mut self) {
        let _ = self.drain();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Direction from the held arrow keys (diagonals normalized)
    pub fn direction(&self) -> Vec2 {
        crate::axis_direction(
            self.is_held(Key::Left),
            self.is_held(Key::Right),
            self.is_held(Key::Up),
            self.is_held(Key::Down),
        )
    }
}
