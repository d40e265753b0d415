//! Mini Arcade - four small canvas games on one frame loop
//!
//! Core modules:
//! - `sim`: Deterministic simulation primitives (world state, collisions, input, spawning)
//! - `games`: The collector, chaser, runner and stickman games
//! - `renderer`: Draw primitives emitted by `Game::draw` (plus a Canvas 2D sink on wasm)
//! - `driver`: Frame driver turning timestamps and button presses into updates
//! - `settings`: Difficulty presets and host configuration

pub mod driver;
pub mod games;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{ControlCommand, ControlState, FrameDriver};
pub use settings::{Difficulty, DifficultyPreset, Settings};

use glam::Vec2;

/// Frame loop configuration constants
pub mod consts {
    /// Largest frame delta fed to `update` (seconds); longer gaps are clamped
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Delta used for the first frame after (re)starting the driver
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Fallback difficulty multiplier
    pub const DEFAULT_DIFFICULTY: f32 = 1.0;
}

/// Clamp each component of `v` into `[min, max]`, tolerating `max < min`
///
/// A world smaller than the actor pins it to `min` instead of panicking like
/// `f32::clamp` would.
#[inline]
pub fn clamp_vec(v: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(v.x.min(max.x).max(min.x), v.y.min(max.y).max(min.y))
}

/// Unit direction from a set of held arrow keys, diagonals normalized
#[inline]
pub fn axis_direction(left: bool, right: bool, up: bool, down: bool) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if left {
        dir.x = -1.0;
    }
    if right {
        dir.x = 1.0;
    }
    if up {
        dir.y = -1.0;
    }
    if down {
        dir.y = 1.0;
    }
    if dir.x != 0.0 && dir.y != 0.0 {
        dir *= std::f32::consts::FRAC_1_SQRT_2;
    }
    dir
}
