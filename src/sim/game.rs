//! The update/draw contract every game implements

use serde::{Deserialize, Serialize};

use super::input::InputEvent;
use super::state::{GamePhase, World};
use crate::consts::DEFAULT_DIFFICULTY;
use crate::renderer::RenderCommands;

/// Per-frame values supplied by the driver
///
/// Rebuilt every frame, so a difficulty change applies on the next update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
    difficulty: f32,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

impl FrameContext {
    /// Non-finite or non-positive multipliers fall back to 1.0
    pub fn with_difficulty(difficulty: f32) -> Self {
        let difficulty = if difficulty.is_finite() && difficulty > 0.0 {
            difficulty
        } else {
            DEFAULT_DIFFICULTY
        };
        Self { difficulty }
    }

    /// Multiplier for actor speeds and spawn cadence (always > 0)
    #[inline]
    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }
}

/// One self-contained game driven by an external frame scheduler
pub trait Game {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    fn world(&self) -> &World;

    fn world_mut(&mut self) -> &mut World;

    /// Advance by `dt` seconds; a no-op unless the game is running
    fn update(&mut self, dt: f32, ctx: &FrameContext);

    /// Primitives for the current state; never mutates
    fn draw(&self) -> RenderCommands;

    /// Restore the initial configuration
    fn reset(&mut self);

    /// Queue an input event for the next update
    fn on_input(&mut self, event: InputEvent) {
        self.world_mut().input.push(event);
    }

    /// Serializable view of the whole game (RNG excluded)
    fn snapshot(&self) -> serde_json::Value;

    fn phase(&self) -> GamePhase {
        self.world().phase
    }

    fn score(&self) -> f32 {
        self.world().score
    }

    fn start(&mut self) -> bool {
        let started = self.world_mut().start();
        if started {
            log::info!("{} started", self.name());
        }
        started
    }

    fn pause(&mut self) -> bool {
        let paused = self.world_mut().pause();
        if paused {
            log::info!("{} paused", self.name());
        }
        paused
    }
}
