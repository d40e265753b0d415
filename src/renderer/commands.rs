//! Draw primitives produced by `Game::draw`

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string (`#rrggbb` when opaque, `rgba(...)` otherwise)
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Start,
    Center,
}

/// A single draw primitive in world coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear,
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        align: TextAlign,
        color: Color,
    },
}

/// Ordered list of draw primitives for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderCommands {
    pub commands: Vec<DrawCommand>,
}

impl RenderCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.commands.push(DrawCommand::Clear);
        self
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::FillRect { pos, size, color });
        self
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
        self
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
        self
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) -> &mut Self {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
        self
    }

    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size_px: f32,
        align: TextAlign,
        color: Color,
    ) -> &mut Self {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size_px,
            align,
            color,
        });
        self
    }

    /// Translucent full-screen shade with a centered caption
    pub fn overlay(&mut self, size: Vec2, caption: &str) -> &mut Self {
        self.fill_rect(Vec2::ZERO, size, colors::OVERLAY_SHADE);
        self.text(caption, size * 0.5, 32.0, TextAlign::Center, colors::TEXT)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// All text strings in draw order (HUD inspection)
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0x07, 0x12, 0x26);
    pub const GROUND: Color = Color::rgb(0x0b, 0x12, 0x20);
    pub const PLAYER: Color = Color::rgb(0x58, 0xa6, 0xff);
    pub const COLLECTIBLE: Color = Color::rgb(0xff, 0xd1, 0x66);
    pub const COLLECTIBLE_RIM: Color = Color::rgba(0, 0, 0, 31);
    pub const HAZARD: Color = Color::rgb(0xff, 0x6b, 0x6b);
    pub const ROPE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const ANCHOR: Color = Color::rgb(0xff, 0xd1, 0x66);
    pub const HUD_PANEL: Color = Color::rgba(255, 255, 255, 10);
    pub const TEXT: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const OVERLAY_SHADE: Color = Color::rgba(0, 0, 0, 128);
}
