//! Spawn cadence accumulator

use serde::{Deserialize, Serialize};

/// Accumulates frame time and fires once per (difficulty-scaled) interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Interval at difficulty 1.0, in seconds
    pub base_interval: f32,
    /// Time accumulated since the last spawn
    pub accumulator: f32,
}

impl SpawnTimer {
    pub fn new(base_interval: f32) -> Self {
        Self {
            base_interval,
            accumulator: 0.0,
        }
    }

    /// Interval at the given difficulty; higher difficulty spawns faster
    pub fn interval(&self, difficulty: f32) -> f32 {
        self.base_interval / difficulty
    }

    /// Advance by `dt`; returns true when a spawn is due
    ///
    /// At most one spawn per call: the accumulator resets to zero rather than
    /// carrying the remainder.
    pub fn tick(&mut self, dt: f32, difficulty: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.interval(difficulty) {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = SpawnTimer::new(1.0);
        assert!(!timer.tick(0.5, 1.0));
        assert!(!timer.tick(0.4, 1.0));
        assert!(timer.tick(0.2, 1.0));
        assert_eq!(timer.accumulator, 0.0);
    }

    #[test]
    fn test_difficulty_shortens_interval() {
        let mut timer = SpawnTimer::new(2.0);
        assert_eq!(timer.interval(2.0), 1.0);
        assert!(timer.tick(1.0, 2.0));
    }

    #[test]
    fn test_large_dt_spawns_once() {
        let mut timer = SpawnTimer::new(0.5);
        assert!(timer.tick(5.0, 1.0));
        assert!(!timer.tick(0.1, 1.0));
    }
}
