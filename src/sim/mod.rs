//! Deterministic simulation module
//!
//! Shared building blocks for every game. This module must stay pure:
//! - Time only advances through `dt` handed in by the driver
//! - Seeded RNG only
//! - Input only arrives through the per-game queue
//! - No rendering or platform dependencies beyond emitting draw primitives

pub mod collision;
pub mod game;
pub mod input;
pub mod rope;
pub mod spawn;
pub mod state;

pub use collision::{Rect, circle_rect_overlap, rects_overlap};
pub use game::{FrameContext, Game};
pub use input::{InputEvent, InputQueue, Key, PointerButton};
pub use spawn::SpawnTimer;
pub use state::{Actor, Anchor, Bounds, GamePhase, Shape, SpawnedEntity, World};
