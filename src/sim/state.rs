//! World state and core simulation types
//!
//! Every game owns exactly one `World` plus its own actors and entities.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::input::InputQueue;
use crate::clamp_vec;
use crate::consts::DEFAULT_DIFFICULTY;

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Reset, waiting for Start
    Idle,
    /// Active gameplay
    Running,
    /// Stopped by Pause, Start resumes
    Paused,
    /// Run ended, only Reset leaves this phase
    GameOver,
}

/// Playfield size in world units (canvas pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamp a point into the playfield
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        clamp_vec(p, Vec2::ZERO, self.size())
    }
}

/// Collision shape of an actor or entity
///
/// Rect positions are the top-left corner, circle positions the center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect { w: f32, h: f32 },
    Circle { r: f32 },
}

impl Shape {
    /// Smallest and largest legal position for this shape inside `bounds`
    pub fn position_range(&self, bounds: &Bounds) -> (Vec2, Vec2) {
        match *self {
            Shape::Rect { w, h } => (
                Vec2::ZERO,
                Vec2::new(bounds.width - w, bounds.height - h),
            ),
            Shape::Circle { r } => (
                Vec2::splat(r),
                Vec2::new(bounds.width - r, bounds.height - r),
            ),
        }
    }

    /// Axis-aligned box covering the shape at `pos`
    pub fn aabb(&self, pos: Vec2) -> Rect {
        match *self {
            Shape::Rect { w, h } => Rect::new(pos, Vec2::new(w, h)),
            Shape::Circle { r } => Rect::new(pos - Vec2::splat(r), Vec2::splat(2.0 * r)),
        }
    }
}

/// A player, monster or swinging bob driven by integration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: Shape,
    /// Base speed in units/second, before difficulty scaling
    pub speed: f32,
}

impl Actor {
    pub fn rect(pos: Vec2, w: f32, h: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Rect { w, h },
            speed,
        }
    }

    pub fn circle(pos: Vec2, r: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Circle { r },
            speed: 0.0,
        }
    }

    /// Bounding rectangle at the current position
    pub fn bbox(&self) -> Rect {
        self.shape.aabb(self.pos)
    }

    /// Center point regardless of shape
    pub fn center(&self) -> Vec2 {
        self.bbox().center()
    }

    /// Whether the actor currently sits inside the playfield
    pub fn within(&self, bounds: &Bounds) -> bool {
        let (min, max) = self.shape.position_range(bounds);
        self.pos.x >= min.x && self.pos.y >= min.y && self.pos.x <= max.x && self.pos.y <= max.y
    }

    /// Clamp position into the playfield; returns true if it had to move
    pub fn clamp_to(&mut self, bounds: &Bounds) -> bool {
        let (min, max) = self.shape.position_range(bounds);
        let clamped = clamp_vec(self.pos, min, max);
        let moved = clamped != self.pos;
        self.pos = clamped;
        moved
    }
}

/// A transient obstacle or collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnedEntity {
    pub id: u32,
    pub pos: Vec2,
    pub shape: Shape,
    /// `World::time_ticks` at creation
    pub created_tick: u64,
}

impl SpawnedEntity {
    pub fn bbox(&self) -> Rect {
        self.shape.aabb(self.pos)
    }
}

/// Fixed pivot of an active rope constraint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub pos: Vec2,
    pub rope_len: f32,
}

fn seeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Shared mutable state of one game instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub bounds: Bounds,
    pub phase: GamePhase,
    /// Score (points for collectors, distance for the runner, tenths of a second for stickman)
    pub score: f32,
    /// Difficulty multiplier seen on the latest frame
    pub difficulty: f32,
    /// Seconds spent in `Running`
    pub elapsed: f32,
    /// Number of running updates
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Pending input and held keys
    pub input: InputQueue,
    #[serde(skip, default = "seeded_rng")]
    rng: Pcg32,
    /// Phase entered on reset
    initial_phase: GamePhase,
    next_id: u32,
}

impl World {
    pub fn new(seed: u64, bounds: Bounds, initial_phase: GamePhase) -> Self {
        Self {
            bounds,
            phase: initial_phase,
            score: 0.0,
            difficulty: DEFAULT_DIFFICULTY,
            elapsed: 0.0,
            time_ticks: 0,
            seed,
            input: InputQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            initial_phase,
            next_id: 1,
        }
    }

    /// Restore defaults and reseed the RNG from the run seed
    ///
    /// Held keys survive (they mirror the physical keyboard); queued one-shot
    /// events are dropped.
    pub fn reset(&mut self) {
        self.input.settle();
        self.phase = self.initial_phase;
        self.score = 0.0;
        self.difficulty = DEFAULT_DIFFICULTY;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Idle or Paused -> Running
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Idle | GamePhase::Paused => {
                self.phase = GamePhase::Running;
                true
            }
            _ => false,
        }
    }

    /// Running -> Paused
    pub fn pause(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            true
        } else {
            false
        }
    }

    /// Running -> GameOver
    pub fn end(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::GameOver;
            log::info!("Game over (score {})", self.score.floor());
        }
    }

    /// Record one running step of `dt` seconds
    pub fn advance_clock(&mut self, dt: f32) {
        self.time_ticks += 1;
        self.elapsed += dt;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform sample in `[min, max)`; returns `min` for an empty range
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Uniform sample in `[0, 1)`
    pub fn random_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Build a new entity stamped with a fresh id and the current tick
    pub fn make_entity(&mut self, pos: Vec2, shape: Shape) -> SpawnedEntity {
        SpawnedEntity {
            id: self.next_entity_id(),
            pos,
            shape,
            created_tick: self.time_ticks,
        }
    }
}
