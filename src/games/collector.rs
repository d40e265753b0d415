//! Top-down collector: steer a square around and pick up coins
//!
//! Never ends on its own; the host pauses or resets it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{RenderCommands, TextAlign, colors};
use crate::sim::{
    Actor, Bounds, FrameContext, Game, GamePhase, Shape, SpawnTimer, SpawnedEntity, World,
    circle_rect_overlap,
};

pub const DEFAULT_BOUNDS: Bounds = Bounds::new(720.0, 480.0);

pub const PLAYER_START: Vec2 = Vec2::new(40.0, 40.0);
pub const PLAYER_SIZE: f32 = 28.0;
/// Pixels per second at difficulty 1.0
pub const PLAYER_SPEED: f32 = 180.0;

/// Seconds between coins at difficulty 1.0
pub const SPAWN_INTERVAL: f32 = 2.0;
pub const COLLECTIBLE_RADIUS: f32 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorGame {
    pub world: World,
    pub player: Actor,
    pub collectibles: Vec<SpawnedEntity>,
    pub spawn: SpawnTimer,
}

impl CollectorGame {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            world: World::new(seed, bounds, GamePhase::Idle),
            player: Self::initial_player(),
            collectibles: Vec::new(),
            spawn: SpawnTimer::new(SPAWN_INTERVAL),
        }
    }

    fn initial_player() -> Actor {
        Actor::rect(PLAYER_START, PLAYER_SIZE, PLAYER_SIZE, PLAYER_SPEED)
    }

    /// Drop a coin at an explicit center; returns its id
    pub fn place_collectible(&mut self, center: Vec2, radius: f32) -> u32 {
        let coin = self.world.make_entity(center, Shape::Circle { r: radius });
        let id = coin.id;
        self.collectibles.push(coin);
        id
    }

    /// Drop a coin at a random spot fully inside the field
    pub fn spawn_collectible(&mut self) -> u32 {
        let r = COLLECTIBLE_RADIUS;
        let x = self.world.random_range(r, self.world.bounds.width - r);
        let y = self.world.random_range(r, self.world.bounds.height - r);
        let id = self.place_collectible(Vec2::new(x, y), r);
        log::debug!("Spawned collectible {} at ({:.0}, {:.0})", id, x, y);
        id
    }

    /// One running step: move, spawn, collect
    ///
    /// Assumes input has been drained and the game is running.
    pub(crate) fn step(&mut self, dt: f32, difficulty: f32) {
        self.move_player(dt, difficulty);

        if self.spawn.tick(dt, difficulty) {
            self.spawn_collectible();
        }

        let collected = self.collect();
        if collected > 0 {
            self.world.score += collected as f32;
        }
    }

    fn move_player(&mut self, dt: f32, difficulty: f32) {
        let speed = self.player.speed * difficulty;
        self.player.vel = self.world.input.direction() * speed;
        self.player.pos += self.player.vel * dt;
        self.player.clamp_to(&self.world.bounds);
    }

    /// Remove every coin touching the player; returns how many
    fn collect(&mut self) -> usize {
        let player = self.player.bbox();
        let before = self.collectibles.len();
        self.collectibles.retain(|coin| match coin.shape {
            Shape::Circle { r } => !circle_rect_overlap(coin.pos, r, &player),
            Shape::Rect { .. } => !coin.bbox().overlaps(&player),
        });
        before - self.collectibles.len()
    }

    pub(crate) fn draw_field(&self, frame: &mut RenderCommands) {
        frame.clear();
        frame.fill_rect(
            self.player.pos,
            Vec2::splat(PLAYER_SIZE),
            colors::PLAYER,
        );
        for coin in &self.collectibles {
            if let Shape::Circle { r } = coin.shape {
                frame.fill_circle(coin.pos, r, colors::COLLECTIBLE);
                frame.stroke_circle(coin.pos, r, 1.0, colors::COLLECTIBLE_RIM);
            }
        }
    }

    pub(crate) fn draw_hud(&self, frame: &mut RenderCommands) {
        frame.fill_rect(Vec2::new(6.0, 6.0), Vec2::new(130.0, 26.0), colors::HUD_PANEL);
        frame.text(
            format!("Score: {}", self.world.score as u64),
            Vec2::new(12.0, 24.0),
            14.0,
            TextAlign::Start,
            colors::TEXT,
        );
    }

    pub(crate) fn reset_field(&mut self) {
        self.world.reset();
        self.player = Self::initial_player();
        self.collectibles.clear();
        self.spawn.reset();
    }
}

impl Game for CollectorGame {
    fn name(&self) -> &'static str {
        "Collector"
    }

    fn world(&self) -> &World {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn update(&mut self, dt: f32, ctx: &FrameContext) {
        self.world.input.settle();
        if !self.world.is_running() {
            return;
        }
        let difficulty = ctx.difficulty();
        self.world.difficulty = difficulty;
        self.world.advance_clock(dt);
        self.step(dt, difficulty);
    }

    fn draw(&self) -> RenderCommands {
        let mut frame = RenderCommands::new();
        self.draw_field(&mut frame);
        self.draw_hud(&mut frame);
        frame
    }

    fn reset(&mut self) {
        self.reset_field();
        log::info!("Collector reset");
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
