//! Canvas 2D sink: replays `RenderCommands` on a `CanvasRenderingContext2d`

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::commands::{DrawCommand, RenderCommands, TextAlign};

/// Draw one frame
pub fn present(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    frame: &RenderCommands,
) -> Result<(), JsValue> {
    for command in frame.iter() {
        match command {
            DrawCommand::Clear => ctx.clear_rect(0.0, 0.0, width, height),
            DrawCommand::FillRect { pos, size, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.set_fill_style_str(&color.to_css());
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                ctx.begin_path();
                ctx.set_line_width(*width as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.stroke();
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                ctx.begin_path();
                ctx.set_line_width(*width as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                pos,
                size_px,
                align,
                color,
            } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_font(&format!("{}px sans-serif", size_px));
                ctx.set_text_align(match align {
                    TextAlign::Start => "start",
                    TextAlign::Center => "center",
                });
                ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
            }
        }
    }
    ctx.set_text_align("start");
    Ok(())
}
