//! Inextensible rope constraint for the swinging bob

use glam::Vec2;

use super::state::{Actor, Anchor};

/// Velocity multiplier applied every roped step
pub const ROPE_DAMPING: f32 = 0.995;

/// Below this distance the radial direction is undefined
const MIN_ROPE_DIST: f32 = 1e-4;

/// Create an anchor at `point` whose rope reaches the bob's current position
pub fn attach(bob_pos: Vec2, point: Vec2) -> Anchor {
    Anchor {
        pos: point,
        rope_len: bob_pos.distance(point),
    }
}

/// Radial unit vector from the anchor toward `pos` (straight down if degenerate)
fn radial_dir(anchor: &Anchor, pos: Vec2) -> Vec2 {
    let d = pos - anchor.pos;
    let dist = d.length();
    if dist > MIN_ROPE_DIST {
        d / dist
    } else {
        Vec2::Y
    }
}

/// Advance a roped bob by `dt`
///
/// Semi-implicit Euler under `gravity`, then the rope takes over: the radial
/// velocity component is discarded, the position is projected back onto the
/// rope circle and the remaining tangential velocity is damped.
pub fn step(bob: &mut Actor, anchor: &Anchor, gravity: Vec2, dt: f32) {
    bob.vel += gravity * dt;
    bob.pos += bob.vel * dt;

    let n = radial_dir(anchor, bob.pos);
    let radial = bob.vel.dot(n);
    bob.vel -= n * radial;
    bob.pos = anchor.pos + n * anchor.rope_len;
    bob.vel *= ROPE_DAMPING;
}

/// Where the rope circle crosses the horizontal line `y = floor_y` on the
/// bob's side of the anchor, if the rope reaches that far
pub fn floor_point(anchor: &Anchor, pos: Vec2, floor_y: f32) -> Option<Vec2> {
    let dy = floor_y - anchor.pos.y;
    let reach = anchor.rope_len * anchor.rope_len - dy * dy;
    if reach < 0.0 {
        return None;
    }
    let dx = reach.sqrt();
    let x = if pos.x < anchor.pos.x {
        anchor.pos.x - dx
    } else {
        anchor.pos.x + dx
    };
    Some(Vec2::new(x, floor_y))
}

/// Strip the radial part of the bob's velocity
pub fn tangential_velocity(anchor: &Anchor, pos: Vec2, vel: Vec2) -> Vec2 {
    let n = radial_dir(anchor, pos);
    vel - n * vel.dot(n)
}
