//! Rendering boundary
//!
//! Games emit plain draw primitives; the host decides how to present them.
//! On wasm32 `canvas::present` replays them on a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;

pub use commands::{Color, DrawCommand, RenderCommands, TextAlign, colors};
