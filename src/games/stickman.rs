//! Grappling-hook swing game
//!
//! Press the pointer to throw a rope at that point, release to let go.
//! Space gives the bob a hop. Runs until paused; the score is time aloft.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{RenderCommands, TextAlign, colors};
use crate::sim::{Actor, Anchor, Bounds, FrameContext, Game, GamePhase, InputEvent, Key, World, rope};

pub const DEFAULT_BOUNDS: Bounds = Bounds::new(720.0, 420.0);

pub const BOB_START: Vec2 = Vec2::new(120.0, 320.0);
pub const BOB_RADIUS: f32 = 12.0;
/// Pixels per second squared
pub const GRAVITY: f32 = 900.0;

/// Velocity kept (and flipped) on free floor or ceiling contact
pub const FLOOR_RESTITUTION: f32 = 0.35;
/// Velocity kept (and flipped) on side wall contact
pub const WALL_RESTITUTION: f32 = 0.3;

/// Space impulse
pub const HOP_IMPULSE: Vec2 = Vec2::new(60.0, -220.0);
/// Horizontal kick on attach spans `[-KICK_SPREAD/2, KICK_SPREAD/2)`
pub const ATTACH_KICK_SPREAD: f32 = 80.0;
pub const ATTACH_KICK_UP: f32 = 60.0;

pub const ANCHOR_DOT_RADIUS: f32 = 6.0;
pub const ROPE_WIDTH: f32 = 2.0;

/// Score ticks per second aloft
pub const SCORE_RATE: f32 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StickmanGame {
    pub world: World,
    pub bob: Actor,
    pub anchor: Option<Anchor>,
}

impl StickmanGame {
    pub fn new(seed: u64, bounds: Bounds) -> Self {
        Self {
            world: World::new(seed, bounds, GamePhase::Idle),
            bob: Actor::circle(BOB_START, BOB_RADIUS),
            anchor: None,
        }
    }

    /// Throw the rope at `point`, replacing any current anchor
    pub fn attach(&mut self, point: Vec2) {
        let point = self.world.bounds.clamp_point(point);
        let anchor = rope::attach(self.bob.pos, point);
        self.anchor = Some(anchor);

        let u = self.world.random_unit();
        self.bob.vel.x += (u - 0.5) * ATTACH_KICK_SPREAD;
        self.bob.vel.y -= ATTACH_KICK_UP;
        log::debug!(
            "Rope attached at ({:.0}, {:.0}), length {:.1}",
            point.x,
            point.y,
            anchor.rope_len
        );
    }

    pub fn detach(&mut self) {
        if self.anchor.take().is_some() {
            log::debug!("Rope released");
        }
    }

    fn apply_input(&mut self, events: &[InputEvent]) {
        for event in events {
            match *event {
                InputEvent::PointerDown { pos, .. } => self.attach(pos),
                InputEvent::PointerUp { .. } => self.detach(),
                InputEvent::KeyDown(Key::Space) => self.bob.vel += HOP_IMPULSE,
                _ => {}
            }
        }
    }

    /// Keep a roped bob that swung into the floor on both the floor and the
    /// rope circle, with no velocity left pointing into the floor
    fn ride_floor(&mut self, anchor: &Anchor) {
        let (_, max) = self.bob.shape.position_range(&self.world.bounds);
        if self.bob.pos.y <= max.y {
            return;
        }
        let Some(pos) = rope::floor_point(anchor, self.bob.pos, max.y) else {
            return;
        };
        self.bob.pos = pos;
        self.bob.vel.y = self.bob.vel.y.min(0.0);
        self.bob.vel = rope::tangential_velocity(anchor, pos, self.bob.vel);
        if self.bob.vel.y > 0.0 {
            self.bob.vel = Vec2::ZERO;
        }
    }

    /// Bounce off the playfield edges; returns true on any contact
    fn bounce(&mut self) -> bool {
        let (min, max) = self.bob.shape.position_range(&self.world.bounds);
        let mut contact = false;

        if self.bob.pos.y > max.y {
            self.bob.pos.y = max.y;
            self.bob.vel.y *= -FLOOR_RESTITUTION;
            contact = true;
        } else if self.bob.pos.y < min.y {
            self.bob.pos.y = min.y;
            self.bob.vel.y *= -FLOOR_RESTITUTION;
            contact = true;
        }
        if self.bob.pos.x < min.x {
            self.bob.pos.x = min.x;
            self.bob.vel.x *= -WALL_RESTITUTION;
            contact = true;
        } else if self.bob.pos.x > max.x {
            self.bob.pos.x = max.x;
            self.bob.vel.x *= -WALL_RESTITUTION;
            contact = true;
        }
        contact
    }
}

impl Game for StickmanGame {
    fn name(&self) -> &'static str {
        "Stickman"
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
        self.world.difficulty = ctx.difficulty();
        self.world.advance_clock(dt);

        self.apply_input(&events);

        let gravity = Vec2::new(0.0, GRAVITY);
        match self.anchor {
            Some(anchor) => {
                rope::step(&mut self.bob, &anchor, gravity, dt);
                self.ride_floor(&anchor);
            }
            None => {
                self.bob.vel += gravity * dt;
                self.bob.pos += self.bob.vel * dt;
            }
        }

        // The rope cannot hold the bob through a side wall or the ceiling
        if self.bounce() && self.anchor.is_some() {
            self.anchor = None;
            log::debug!("Rope snapped on wall contact");
        }

        self.world.score = (self.world.elapsed * SCORE_RATE).floor();
    }

    fn draw(&self) -> RenderCommands {
        let bounds = self.world.bounds;
        let mut frame = RenderCommands::new();
        frame.clear();
        frame.fill_rect(Vec2::ZERO, bounds.size(), colors::BACKGROUND);

        if let Some(anchor) = &self.anchor {
            frame.line(anchor.pos, self.bob.pos, ROPE_WIDTH, colors::ROPE);
            frame.fill_circle(anchor.pos, ANCHOR_DOT_RADIUS, colors::ANCHOR);
        }

        frame.fill_circle(self.bob.pos, BOB_RADIUS, colors::PLAYER);
        frame.text(
            format!("Time: {}s", self.world.score / SCORE_RATE),
            Vec2::new(12.0, 22.0),
            16.0,
            TextAlign::Start,
            colors::TEXT,
        );
        frame
    }

    fn reset(&mut self) {
        self.world.reset();
        self.bob = Actor::circle(BOB_START, BOB_RADIUS);
        self.anchor = None;
        log::info!("Stickman reset");
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use crate::sim::PointerButton;

    const DT: f32 = 1.0 / 60.0;

    fn running_game() -> StickmanGame {
        let mut game = StickmanGame::new(31337, DEFAULT_BOUNDS);
        assert!(game.start());
        game
    }

    fn press(pos: Vec2) -> InputEvent {
        InputEvent::PointerDown {
            button: PointerButton::Primary,
            pos,
        }
    }

    #[test]
    fn test_rope_length_holds_while_attached() {
        let mut game = running_game();
        game.on_input(press(Vec2::new(200.0, 100.0)));
        game.update(DT, &FrameContext::default());

        let anchor = game.anchor.expect("anchor attached");
        assert!((anchor.rope_len - 80.0f32.hypot(220.0)).abs() < 1e-3);

        for _ in 0..600 {
            let dist = game.bob.pos.distance(anchor.pos);
            assert!((dist - anchor.rope_len).abs() < 1e-2, "dist {dist}");
            game.update(DT, &FrameContext::default());
        }
        assert_eq!(game.anchor, Some(anchor));
    }

    #[test]
    fn test_release_detaches() {
        let mut game = running_game();
        game.on_input(press(Vec2::new(200.0, 100.0)));
        game.update(DT, &FrameContext::default());
        assert!(game.anchor.is_some());

        game.on_input(InputEvent::PointerUp {
            button: PointerButton::Primary,
            pos: Vec2::ZERO,
        });
        game.update(DT, &FrameContext::default());
        assert!(game.anchor.is_none());
    }

    #[test]
    fn test_second_attach_replaces_anchor() {
        let mut game = running_game();
        game.on_input(press(Vec2::new(200.0, 100.0)));
        game.on_input(press(Vec2::new(300.0, 50.0)));
        game.update(DT, &FrameContext::default());
        assert_eq!(game.anchor.map(|a| a.pos), Some(Vec2::new(300.0, 50.0)));
    }

    #[test]
    fn test_anchor_clamped_into_field() {
        let mut game = running_game();
        game.attach(Vec2::new(-50.0, 900.0));
        assert_eq!(
            game.anchor.map(|a| a.pos),
            Some(Vec2::new(0.0, DEFAULT_BOUNDS.height))
        );
    }

    #[test]
    fn test_free_fall_bounces_on_floor() {
        let mut game = running_game();
        for _ in 0..120 {
            game.update(DT, &FrameContext::default());
            assert!(game.bob.within(&game.world.bounds));
        }
        assert!(game.bob.pos.y <= DEFAULT_BOUNDS.height - BOB_RADIUS);
    }

    #[test]
    fn test_hop_impulse() {
        let mut game = running_game();
        game.on_input(InputEvent::KeyDown(Key::Space));
        game.update(DT, &FrameContext::default());
        assert!((game.bob.vel.x - HOP_IMPULSE.x).abs() < 1e-3);
        assert!((game.bob.vel.y - (HOP_IMPULSE.y + GRAVITY * DT)).abs() < 1e-3);
    }

    #[test]
    fn test_wall_contact_snaps_rope() {
        let mut game = running_game();
        // Hanging straight below an anchor close to the left wall
        game.bob.pos = Vec2::new(30.0, 300.0);
        game.attach(Vec2::new(30.0, 200.0));
        game.bob.vel = Vec2::new(-2000.0, 0.0);
        game.update(DT, &FrameContext::default());
        assert!(game.anchor.is_none());
        assert!(game.bob.within(&game.world.bounds));
    }

    #[test]
    fn test_score_counts_tenths() {
        let mut game = running_game();
        for _ in 0..30 {
            game.update(0.05, &FrameContext::default());
        }
        assert!((game.score() - 15.0).abs() <= 1.0);
        assert!(game.draw().texts()[0].starts_with("Time: 1."));
    }

    #[test]
    fn test_whole_seconds_print_without_decimals() {
        let mut game = running_game();
        game.world.score = 20.0;
        assert_eq!(game.draw().texts()[0], "Time: 2s");
        game.world.score = 23.0;
        assert_eq!(game.draw().texts()[0], "Time: 2.3s");
    }

    #[test]
    fn test_rope_thrown_from_floor_holds() {
        let mut game = running_game();
        for _ in 0..120 {
            game.update(DT, &FrameContext::default());
        }
        let floor = DEFAULT_BOUNDS.height - BOB_RADIUS;
        assert!((game.bob.pos.y - floor).abs() < 1.0, "bob at {}", game.bob.pos);

        game.on_input(press(Vec2::new(200.0, 100.0)));
        game.update(DT, &FrameContext::default());
        let anchor = game.anchor.expect("anchor attached");

        for frame in 0..90 {
            game.update(DT, &FrameContext::default());
            assert_eq!(game.anchor, Some(anchor), "rope lost on frame {frame}");
            assert!(game.bob.within(&game.world.bounds));
            let dist = game.bob.pos.distance(anchor.pos);
            assert!((dist - anchor.rope_len).abs() < 1e-2, "dist {dist}");
        }
    }

    #[test]
    fn test_idle_ignores_input() {
        let mut game = StickmanGame::new(5, DEFAULT_BOUNDS);
        game.on_input(press(Vec2::new(200.0, 100.0)));
        game.update(DT, &FrameContext::default());
        assert!(game.anchor.is_none());
        assert_eq!(game.bob.pos, BOB_START);
    }

    #[test]
    fn test_draw_rope_when_attached() {
        let mut game = running_game();
        game.attach(Vec2::new(200.0, 100.0));
        let frame = game.draw();
        assert!(
            frame
                .iter()
                .any(|c| matches!(c, DrawCommand::Line { .. }))
        );
    }
}
