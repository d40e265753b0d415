//! Endless runner: jump over obstacles scrolling in from the right
//!
//! Starts running immediately. Space jumps, or restarts after a crash.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{RenderCommands, TextAlign, colors};
use crate::sim::{
    Actor, Bounds, FrameContext, Game, GamePhase, InputEvent, Key, Shape, SpawnTimer,
    SpawnedEntity, World,
};

pub const DEFAULT_BOUNDS: Bounds = Bounds::new(800.0, 300.0);

pub const PLAYER_X: f32 = 80.0;
/// Player starts this far above the bottom edge
pub const PLAYER_START_OFFSET: f32 = 60.0;
pub const PLAYER_SIZE: f32 = 36.0;
pub const GROUND_HEIGHT: f32 = 20.0;
/// Pixels per second squared
pub const GRAVITY: f32 = 1500.0;
pub const JUMP_VELOCITY: f32 = -420.0;
/// How close to the ground still counts as standing
pub const GROUNDED_TOLERANCE: f32 = 0.5;

/// Initial scroll speed (pixels per second) and its growth per second
pub const BASE_SPEED: f32 = 320.0;
pub const SPEED_GAIN: f32 = 6.0;

pub const SPAWN_INTERVAL: f32 = 1.2;
/// Obstacles enter this far past the right edge
pub const SPAWN_OFFSET: f32 = 40.0;
/// Obstacles are dropped once fully this far past the left edge
pub const CULL_MARGIN: f32 = 50.0;
pub const OBSTACLE_MIN_HEIGHT: f32 = 28.0;
pub const OBSTACLE_MAX_HEIGHT: f32 = 88.0;
pub const OBSTACLE_MIN_WIDTH: f32 = 26.0;
pub const OBSTACLE_MAX_WIDTH: f32 = 62.0;

/// Points per second survived
pub const SCORE_RATE: f32 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerGame {
    pub world: World,
    pub player: Actor,
    pub obstacles: Vec<SpawnedEntity>,
    pub spawn: SpawnTimer,
    /// Scroll speed before difficulty scaling
    pub speed: f32,
}

impl RunnerGame {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            world: World::new(seed, bounds, GamePhase::Running),
            player: Self::initial_player(&bounds),
            obstacles: Vec::new(),
            spawn: SpawnTimer::new(SPAWN_INTERVAL),
            speed: BASE_SPEED,
        }
    }

    fn initial_player(bounds: &Bounds) -> Actor {
        Actor::rect(
            Vec2::new(PLAYER_X, bounds.height - PLAYER_START_OFFSET),
            PLAYER_SIZE,
            PLAYER_SIZE,
            0.0,
        )
    }

    /// Top of the ground strip
    pub fn ground_y(&self) -> f32 {
        self.world.bounds.height - GROUND_HEIGHT
    }

    /// Resting y of the player's top edge
    fn floor_y(&self) -> f32 {
        self.ground_y() - PLAYER_SIZE
    }

    pub fn grounded(&self) -> bool {
        self.player.pos.y >= self.floor_y() - GROUNDED_TOLERANCE
    }

    /// Append an obstacle standing on the ground just past the right edge
    pub fn spawn_obstacle(&mut self) -> u32 {
        let h = self
            .world
            .random_range(OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT);
        let w = self
            .world
            .random_range(OBSTACLE_MIN_WIDTH, OBSTACLE_MAX_WIDTH);
        let pos = Vec2::new(self.world.bounds.width + SPAWN_OFFSET, self.ground_y() - h);
        let obstacle = self.world.make_entity(pos, Shape::Rect { w, h });
        let id = obstacle.id;
        self.obstacles.push(obstacle);
        log::debug!("Spawned obstacle {} ({:.0}x{:.0})", id, w, h);
        id
    }

    fn apply_jump(&mut self, events: &[InputEvent]) {
        let jump = events
            .iter()
            .any(|e| matches!(e, InputEvent::KeyDown(Key::Space)));
        if jump && self.grounded() {
            self.player.vel.y = JUMP_VELOCITY;
        }
    }

    fn integrate_player(&mut self, dt: f32) {
        self.player.vel.y += GRAVITY * dt;
        self.player.pos.y += self.player.vel.y * dt;

        let floor = self.floor_y();
        if self.player.pos.y > floor {
            self.player.pos.y = floor;
            self.player.vel.y = 0.0;
        }
        if self.player.clamp_to(&self.world.bounds) && self.player.vel.y < 0.0 {
            self.player.vel.y = 0.0;
        }
    }

    /// Scroll, cull, then maybe spawn; a new obstacle keeps its spawn x for this frame
    fn advance_obstacles(&mut self, dt: f32, difficulty: f32) {
        let dx = self.speed * difficulty * dt;
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= dx;
        }
        self.obstacles
            .retain(|o| o.bbox().max().x >= -CULL_MARGIN);

        if self.spawn.tick(dt, difficulty) {
            self.spawn_obstacle();
        }
    }

    pub fn crashed(&self) -> bool {
        let player = self.player.bbox();
        self.obstacles.iter().any(|o| o.bbox().overlaps(&player))
    }
}

impl Game for RunnerGame {
    fn name(&self) -> &'static str {
        "Runner"
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn update(&mut self, dt: f32, ctx: &FrameContext) {
        let events = self.world.input.drain();
        if !self.world.is_running() {
            return;
        }
        let difficulty = ctx.difficulty();
        self.world.difficulty = difficulty;
        self.world.advance_clock(dt);

        self.apply_jump(&events);
        self.integrate_player(dt);
        self.advance_obstacles(dt, difficulty);

        if self.crashed() {
            self.world.end();
        }

        self.world.score += dt * SCORE_RATE;
        self.speed += dt * SPEED_GAIN;
    }

    fn draw(&self) -> RenderCommands {
        let bounds = self.world.bounds;
        let mut frame = RenderCommands::new();
        frame.clear();
        frame.fill_rect(Vec2::ZERO, bounds.size(), colors::BACKGROUND);
        frame.fill_rect(
            Vec2::new(0.0, self.ground_y()),
            Vec2::new(bounds.width, GROUND_HEIGHT),
            colors::GROUND,
        );
        frame.fill_rect(self.player.pos, Vec2::splat(PLAYER_SIZE), colors::PLAYER);
        for obstacle in &self.obstacles {
            let rect = obstacle.bbox();
            frame.fill_rect(rect.pos, rect.size, colors::HAZARD);
        }
        frame.text(
            format!("Score: {}", self.world.score.floor() as u64),
            Vec2::new(12.0, 22.0),
            16.0,
            TextAlign::Start,
            colors::TEXT,
        );
        if self.world.is_game_over() {
            frame.overlay(bounds.size(), "Game Over");
        }
        frame
    }

    fn reset(&mut self) {
        self.world.reset();
        self.player = Self::initial_player(&self.world.bounds);
        self.obstacles.clear();
        self.spawn.reset();
        self.speed = BASE_SPEED;
        log::info!("Runner reset");
    }

    /// Space after a crash restarts at once; everything else is queued
    fn on_input(&mut self, event: InputEvent) {
        if self.world.is_game_over() && event == InputEvent::KeyDown(Key::Space) {
            self.reset();
            return;
        }
        self.world.input.push(event);
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
