//! The four games and a selector for building them by name

pub mod chaser;
pub mod collector;
pub mod runner;
pub mod stickman;

pub use chaser::ChaserGame;
pub use collector::CollectorGame;
pub use runner::RunnerGame;
pub use stickman::StickmanGame;

use serde::{Deserialize, Serialize};

use crate::sim::{Bounds, Game};

/// Which game to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Collector,
    Chaser,
    Runner,
    Stickman,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [
        GameKind::Collector,
        GameKind::Chaser,
        GameKind::Runner,
        GameKind::Stickman,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Collector => "collector",
            GameKind::Chaser => "chaser",
            GameKind::Runner => "runner",
            GameKind::Stickman => "stickman",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "collector" | "tiny" => Some(GameKind::Collector),
            "chaser" | "chase" | "monster" => Some(GameKind::Chaser),
            "runner" | "geometry" | "geo" => Some(GameKind::Runner),
            "stickman" | "stick" | "swing" => Some(GameKind::Stickman),
            _ => None,
        }
    }

    /// Playfield used when the host does not supply one
    pub fn default_bounds(&self) -> Bounds {
        match self {
            GameKind::Collector | GameKind::Chaser => collector::DEFAULT_BOUNDS,
            GameKind::Runner => runner::DEFAULT_BOUNDS,
            GameKind::Stickman => stickman::DEFAULT_BOUNDS,
        }
    }

    pub fn create(&self, seed: u64, bounds: Bounds) -> Box<dyn Game> {
        match self {
            GameKind::Collector => Box::new(CollectorGame::new(seed, bounds)),
            GameKind::Chaser => Box::new(ChaserGame::new(seed, bounds)),
            GameKind::Runner => Box::new(RunnerGame::new(seed, bounds)),
            GameKind::Stickman => Box::new(StickmanGame::new(seed, bounds)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_str("GEO"), Some(GameKind::Runner));
        assert_eq!(GameKind::from_str("pong"), None);
    }

    #[test]
    fn test_default_phases() {
        for kind in GameKind::ALL {
            let game = kind.create(1, kind.default_bounds());
            let expected = if kind == GameKind::Runner {
                GamePhase::Running
            } else {
                GamePhase::Idle
            };
            assert_eq!(game.phase(), expected, "{}", game.name());
        }
    }
}
