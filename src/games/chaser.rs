//! Collector with a monster in pursuit
//!
//! Same coins and controls as the collector; touching the monster ends the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collector::CollectorGame;
use crate::renderer::{RenderCommands, colors};
use crate::sim::{Actor, Bounds, FrameContext, Game, World};

pub const MONSTER_SIZE: f32 = 32.0;
/// Pixels per second at difficulty 1.0 (slower than the player)
pub const MONSTER_SPEED: f32 = 110.0;
/// Monster spawns this far from the bottom-right corner
pub const MONSTER_CORNER_OFFSET: f32 = 80.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaserGame {
    pub field: CollectorGame,
    pub monster: Actor,
}

impl ChaserGame {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            field: CollectorGame::new(seed, bounds),
            monster: Self::initial_monster(&bounds),
        }
    }

    fn initial_monster(bounds: &Bounds) -> Actor {
        let mut monster = Actor::rect(
            Vec2::new(
                bounds.width - MONSTER_CORNER_OFFSET,
                bounds.height - MONSTER_CORNER_OFFSET,
            ),
            MONSTER_SIZE,
            MONSTER_SIZE,
            MONSTER_SPEED,
        );
        monster.clamp_to(bounds);
        monster
    }

    /// Move the monster toward the player's center without overshooting
    fn chase(&mut self, dt: f32, difficulty: f32) {
        let to_player = self.field.player.center() - self.monster.center();
        let dist = to_player.length();
        let max_step = self.monster.speed * difficulty * dt;

        if dist <= max_step {
            self.monster.pos += to_player;
            self.monster.vel = Vec2::ZERO;
        } else {
            let dir = to_player / dist;
            self.monster.vel = dir * self.monster.speed * difficulty;
            self.monster.pos += dir * max_step;
        }
        self.monster.clamp_to(&self.field.world.bounds);
    }

    pub fn caught(&self) -> bool {
        self.monster.bbox().overlaps(&self.field.player.bbox())
    }
}

impl Game for ChaserGame {
    fn name(&self) -> &'static str {
        "Chaser"
    }

    fn world(&self) -> &World {
        &self.field.world
    }

    fn world_mut(&mut self) -> &mut World {
        &mut self.field.world
    }

    fn update(&mut self, dt: f32, ctx: &FrameContext) {
        self.field.world.input.settle();
        if !self.field.world.is_running() {
            return;
        }
        let difficulty = ctx.difficulty();
        self.field.world.difficulty = difficulty;
        self.field.world.advance_clock(dt);

        self.field.step(dt, difficulty);
        self.chase(dt, difficulty);

        if self.caught() {
            self.field.world.end();
        }
    }

    fn draw(&self) -> RenderCommands {
        let mut frame = RenderCommands::new();
        self.field.draw_field(&mut frame);
        frame.fill_rect(
            self.monster.pos,
            Vec2::splat(MONSTER_SIZE),
            colors::HAZARD,
        );
        self.field.draw_hud(&mut frame);
        if self.field.world.is_game_over() {
            frame.overlay(self.field.world.bounds.size(), "Game Over");
        }
        frame
    }

    fn reset(&mut self) {
        self.field.reset_field();
        self.monster = Self::initial_monster(&self.field.world.bounds);
        log::info!("Chaser reset");
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::collector::{DEFAULT_BOUNDS, PLAYER_START};
    use crate::sim::{GamePhase, InputEvent, Key};

    const DT: f32 = 1.0 / 60.0;

    fn running_game() -> ChaserGame {
        let mut game = ChaserGame::new(777, DEFAULT_BOUNDS);
        assert!(game.start());
        game
    }

    #[test]
    fn test_monster_starts_in_corner() {
        let game = ChaserGame::new(1, DEFAULT_BOUNDS);
        assert_eq!(game.monster.pos, Vec2::new(640.0, 400.0));
        assert!(!game.caught());
    }

    #[test]
    fn test_monster_closes_distance() {
        let mut game = running_game();
        let before = game.monster.center().distance(game.field.player.center());
        game.update(0.5, &FrameContext::default());
        let after = game.monster.center().distance(game.field.player.center());
        assert!((before - after - MONSTER_SPEED * 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_monster_speed_follows_difficulty_each_frame() {
        let mut game = running_game();
        let gap = |g: &ChaserGame| g.monster.center().distance(g.field.player.center());

        let before = gap(&game);
        game.update(0.25, &FrameContext::with_difficulty(1.0));
        let mid = gap(&game);
        assert!((before - mid - MONSTER_SPEED * 0.25).abs() < 1e-2);

        game.update(0.25, &FrameContext::with_difficulty(1.5));
        let after = gap(&game);
        assert!((mid - after - MONSTER_SPEED * 1.5 * 0.25).abs() < 1e-2);
    }

    #[test]
    fn test_overlap_ends_run_and_freezes() {
        let mut game = running_game();
        game.field.player.pos = Vec2::new(200.0, 200.0);
        game.monster.pos = Vec2::new(210.0, 210.0);

        game.update(DT, &FrameContext::default());
        assert_eq!(game.phase(), GamePhase::GameOver);

        let score = game.score();
        let player = game.field.player.pos;
        let monster = game.monster.pos;
        game.on_input(InputEvent::KeyDown(Key::Right));
        for _ in 0..30 {
            game.update(DT, &FrameContext::default());
        }
        assert_eq!(game.score(), score);
        assert_eq!(game.field.player.pos, player);
        assert_eq!(game.monster.pos, monster);
        assert!(!game.start());
    }

    #[test]
    fn test_game_over_overlay_drawn() {
        let mut game = running_game();
        game.monster.pos = game.field.player.pos;
        game.update(DT, &FrameContext::default());
        assert!(game.draw().texts().contains(&"Game Over"));
    }

    #[test]
    fn test_reset_restores_monster_and_phase() {
        let mut game = running_game();
        game.monster.pos = game.field.player.pos;
        game.update(DT, &FrameContext::default());
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.reset();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.field.player.pos, PLAYER_START);
        assert_eq!(game.monster.pos, Vec2::new(640.0, 400.0));
    }

    #[test]
    fn test_monster_does_not_overshoot() {
        let mut game = running_game();
        game.field.player.pos = Vec2::new(300.0, 300.0);
        game.monster.pos = Vec2::new(296.0, 296.0);
        game.chase(1.0, 1.0);
        // Centers line up exactly instead of flying past
        assert_eq!(game.monster.center(), game.field.player.center());
    }
}
