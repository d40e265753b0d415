//! Frame driver: owns one game and feeds it frames
//!
//! The host calls `frame(now_ms)` once per display refresh and forwards
//! button presses as `ControlCommand`s and input as `InputEvent`s.

use serde::{Deserialize, Serialize};

use crate::consts::FIRST_FRAME_DT;
use crate::games::GameKind;
use crate::renderer::RenderCommands;
use crate::settings::{Difficulty, Settings};
use crate::sim::{Bounds, FrameContext, Game, GamePhase, InputEvent};

/// Buttons on the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCommand {
    Start,
    Pause,
    Reset,
}

/// Which control buttons should be clickable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub start_enabled: bool,
    pub pause_enabled: bool,
}

impl ControlState {
    pub fn for_phase(phase: GamePhase) -> Self {
        let running = phase == GamePhase::Running;
        Self {
            start_enabled: !running,
            pause_enabled: running,
        }
    }
}

pub struct FrameDriver {
    kind: GameKind,
    game: Box<dyn Game>,
    difficulty: Difficulty,
    max_frame_dt: f32,
    /// Timestamp of the previous running frame
    last_time_ms: Option<f64>,
}

impl FrameDriver {
    pub fn new(kind: GameKind, seed: u64, bounds: Bounds, settings: &Settings) -> Self {
        log::info!(
            "Creating {} ({}x{}) with seed {}",
            kind.as_str(),
            bounds.width,
            bounds.height,
            seed
        );
        Self {
            kind,
            game: kind.create(seed, bounds),
            difficulty: settings.difficulty,
            max_frame_dt: settings.max_frame_dt,
            last_time_ms: None,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn game(&self) -> &dyn Game {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> &mut dyn Game {
        self.game.as_mut()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect on the next frame
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn controls(&self) -> ControlState {
        ControlState::for_phase(self.game.phase())
    }

    /// Whether frames currently advance the simulation
    pub fn is_scheduling(&self) -> bool {
        self.game.phase() == GamePhase::Running
    }

    pub fn on_input(&mut self, event: InputEvent) {
        self.game.on_input(event);
    }

    /// Apply a control button; returns the frame to show afterwards
    pub fn command(&mut self, command: ControlCommand) -> RenderCommands {
        match command {
            ControlCommand::Start => {
                if self.game.phase() == GamePhase::GameOver {
                    self.game.reset();
                }
                self.game.start();
            }
            ControlCommand::Pause => {
                self.game.pause();
            }
            ControlCommand::Reset => {
                self.game.reset();
            }
        }
        self.last_time_ms = None;
        self.game.draw()
    }

    /// Seconds since the previous running frame, clamped to `[0, max_frame_dt]`
    pub fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => FIRST_FRAME_DT,
        };
        self.last_time_ms = Some(now_ms);
        dt.max(0.0).min(self.max_frame_dt)
    }

    /// One display refresh at timestamp `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> RenderCommands {
        if !self.is_scheduling() {
            self.last_time_ms = None;
            // Still drain input so held keys stay in sync while stopped
            self.game.update(0.0, &self.context());
            return self.game.draw();
        }
        let dt = self.frame_dt(now_ms);
        self.step(dt)
    }

    /// Update by an explicit `dt`, then draw
    pub fn step(&mut self, dt: f32) -> RenderCommands {
        let before = self.game.phase();
        self.game.update(dt, &self.context());
        if before == GamePhase::Running && self.game.phase() == GamePhase::GameOver {
            log::info!(
                "{} finished with score {}",
                self.game.name(),
                self.game.score().floor()
            );
        }
        self.game.draw()
    }

    /// Difficulty is re-read here on every frame
    fn context(&self) -> FrameContext {
        FrameContext::with_difficulty(self.difficulty.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;
    use crate::sim::Key;

    fn driver(kind: GameKind) -> FrameDriver {
        FrameDriver::new(kind, 99, kind.default_bounds(), &Settings::default())
    }

    #[test]
    fn test_frame_dt_clamped() {
        let mut d = driver(GameKind::Collector);
        assert_eq!(d.frame_dt(1000.0), FIRST_FRAME_DT);
        assert!((d.frame_dt(1016.0) - 0.016).abs() < 1e-6);
        assert_eq!(d.frame_dt(6000.0), MAX_FRAME_DT);
        // Clock going backwards never yields a negative step
        assert_eq!(d.frame_dt(5000.0), 0.0);
    }

    #[test]
    fn test_controls_follow_phase() {
        let mut d = driver(GameKind::Collector);
        assert_eq!(
            d.controls(),
            ControlState {
                start_enabled: true,
                pause_enabled: false
            }
        );
        d.command(ControlCommand::Start);
        assert_eq!(
            d.controls(),
            ControlState {
                start_enabled: false,
                pause_enabled: true
            }
        );
        d.command(ControlCommand::Pause);
        assert!(d.controls().start_enabled);
        assert!(!d.is_scheduling());
    }

    #[test]
    fn test_paused_frames_do_not_advance() {
        let mut d = driver(GameKind::Stickman);
        d.frame(0.0);
        d.frame(16.0);
        assert_eq!(d.game().world().time_ticks, 0);

        d.command(ControlCommand::Start);
        d.frame(100.0);
        d.frame(116.0);
        assert_eq!(d.game().world().time_ticks, 2);
    }

    #[test]
    fn test_start_after_game_over_restarts() {
        let mut d = driver(GameKind::Runner);
        d.game_mut().world_mut().end();
        assert_eq!(
            d.controls(),
            ControlState {
                start_enabled: true,
                pause_enabled: false
            }
        );
        d.command(ControlCommand::Start);
        assert_eq!(d.game().phase(), GamePhase::Running);
        assert_eq!(d.game().score(), 0.0);
    }

    #[test]
    fn test_difficulty_change_applies_next_frame() {
        let mut d = driver(GameKind::Collector);
        d.command(ControlCommand::Start);
        d.on_input(InputEvent::KeyDown(Key::Right));
        d.step(0.1);
        assert_eq!(d.game().world().difficulty, 1.0);

        d.set_difficulty(Difficulty::new(1.5));
        d.step(0.1);
        assert_eq!(d.game().world().difficulty, 1.5);
    }

    #[test]
    fn test_reset_command_redraws() {
        let mut d = driver(GameKind::Collector);
        d.command(ControlCommand::Start);
        d.step(0.5);
        let frame = d.command(ControlCommand::Reset);
        assert!(!frame.is_empty());
        assert_eq!(d.game().phase(), GamePhase::Idle);
        assert_eq!(d.game().world().elapsed, 0.0);
    }
}
