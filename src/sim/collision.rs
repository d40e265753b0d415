//! Collision tests for axis-aligned rectangles and circles
//!
//! No broad phase: every game checks its handful of entities linearly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap on all four edges; touching edges do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        rects_overlap(self, other)
    }

    /// Point of this rectangle closest to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        crate::clamp_vec(p, self.min(), self.max())
    }
}

/// Rectangle/rectangle overlap test (symmetric in its arguments)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    b_min.x < a_max.x && b_max.x > a_min.x && b_min.y < a_max.y && b_max.y > a_min.y
}

/// Circle/rectangle overlap test
///
/// Clamps the circle center into the rectangle and compares the squared
/// distance to the clamped point with `radius²`.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.closest_point(center);
    center.distance_squared(nearest) <= radius * radius
}
