//! Drawing-surface interface and a recording implementation.
//!
//! Render code only ever receives `&self` plus a `&mut dyn Surface`; it has
//! no route to the physics world and never mutates gameplay state.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// An sRGB colour with alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha multiplied by `factor` (clamped to 0..=1).
    pub fn fade(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}

/// Colours used by the built-in renderers.
pub mod palette {
    use super::Rgba;

    pub const HULL: Rgba = Rgba::new(110, 72, 40, 1.0);
    pub const DECK: Rgba = Rgba::new(160, 116, 70, 1.0);
    pub const MAST: Rgba = Rgba::new(80, 52, 28, 1.0);
    pub const SAIL: Rgba = Rgba::new(240, 232, 210, 0.95);
    pub const WHEEL: Rgba = Rgba::new(120, 80, 40, 1.0);
    pub const WHEEL_ACTIVE: Rgba = Rgba::new(230, 190, 60, 1.0);
    pub const CANNON: Rgba = Rgba::new(40, 40, 44, 1.0);
    pub const CANNON_READY: Rgba = Rgba::new(90, 200, 90, 0.8);
    pub const SHOT: Rgba = Rgba::new(25, 25, 25, 1.0);
    pub const FIRE: Rgba = Rgba::new(255, 160, 40, 1.0);
    pub const SMOKE: Rgba = Rgba::new(90, 90, 90, 0.8);
    pub const FOAM: Rgba = Rgba::new(220, 240, 255, 0.9);
    pub const IMPACT: Rgba = Rgba::new(255, 230, 120, 1.0);
    pub const FLASH: Rgba = Rgba::new(255, 255, 255, 0.6);
    pub const GOLD: Rgba = Rgba::new(240, 200, 40, 1.0);
    pub const GEM: Rgba = Rgba::new(60, 200, 220, 1.0);
    pub const CHEST: Rgba = Rgba::new(130, 80, 30, 1.0);
}

/// One colour stop of a gradient, `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gradient {
    Linear {
        from: DVec2,
        to: DVec2,
        stops: Vec<ColorStop>,
    },
    Radial {
        center: DVec2,
        inner_radius: f64,
        outer_radius: f64,
        stops: Vec<ColorStop>,
    },
}

/// Fill or stroke style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Rgba),
    Gradient(Gradient),
}

impl From<Rgba> for Paint {
    fn from(color: Rgba) -> Self {
        Paint::Solid(color)
    }
}

/// The 2D drawing surface as seen by render code.
pub trait Surface {
    /// Push the current transform.
    fn save(&mut self);
    /// Pop the last saved transform.
    fn restore(&mut self);
    fn translate(&mut self, offset: DVec2);
    fn rotate(&mut self, angle: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: DVec2);
    fn line_to(&mut self, point: DVec2);
    fn arc(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64);
    fn rect(&mut self, origin: DVec2, size: DVec2);
    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2);
    fn close_path(&mut self);

    fn fill(&mut self, paint: &Paint);
    fn stroke(&mut self, paint: &Paint, width: f64);

    /// Size of the viewport, used by screen-space effects.
    fn viewport(&self) -> DVec2;
}

/// Draw a filled circle at `center`.
pub fn fill_circle(surface: &mut dyn Surface, center: DVec2, radius: f64, paint: &Paint) {
    surface.begin_path();
    surface.arc(center, radius, 0.0, std::f64::consts::TAU);
    surface.fill(paint);
}

/// Draw a filled rectangle centred on the current origin.
pub fn fill_centered_rect(surface: &mut dyn Surface, size: DVec2, paint: &Paint) {
    surface.begin_path();
    surface.rect(-size / 2.0, size);
    surface.fill(paint);
}

/// A recorded drawing operation. Fill and stroke colours are emitted as
/// CSS colour strings so a canvas frontend can replay them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { angle: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    QuadraticCurveTo { cx: f64, cy: f64, x: f64, y: f64 },
    ClosePath,
    FillColor { color: String },
    FillGradient { gradient: Gradient },
    StrokeColor { color: String, width: f64 },
    StrokeGradient { gradient: Gradient, width: f64 },
}

/// A [`Surface`] that records every call for later replay or inspection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub viewport: DVec2,
    pub commands: Vec<DrawCommand>,
    depth: usize,
}

impl DrawList {
    pub fn new(viewport: DVec2) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Current save/restore nesting depth; zero when every save was restored.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of fill or stroke operations recorded.
    pub fn paint_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    DrawCommand::FillColor { .. }
                        | DrawCommand::FillGradient { .. }
                        | DrawCommand::StrokeColor { .. }
                        | DrawCommand::StrokeGradient { .. }
                )
            })
            .count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }
}

impl Surface for DrawList {
    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: DVec2) {
        self.commands.push(DrawCommand::Translate {
            x: offset.x,
            y: offset.y,
        });
    }

    fn rotate(&mut self, angle: f64) {
        self.commands.push(DrawCommand::Rotate { angle });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, point: DVec2) {
        self.commands.push(DrawCommand::MoveTo {
            x: point.x,
            y: point.y,
        });
    }

    fn line_to(&mut self, point: DVec2) {
        self.commands.push(DrawCommand::LineTo {
            x: point.x,
            y: point.y,
        });
    }

    fn arc(&mut self, center: DVec2, radius: f64, start_angle: f64, end_angle: f64) {
        self.commands.push(DrawCommand::Arc {
            x: center.x,
            y: center.y,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn rect(&mut self, origin: DVec2, size: DVec2) {
        self.commands.push(DrawCommand::Rect {
            x: origin.x,
            y: origin.y,
            width: size.x,
            height: size.y,
        });
    }

    fn quadratic_curve_to(&mut self, control: DVec2, to: DVec2) {
        self.commands.push(DrawCommand::QuadraticCurveTo {
            cx: control.x,
            cy: control.y,
            x: to.x,
            y: to.y,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self, paint: &Paint) {
        self.commands.push(match paint {
            Paint::Solid(color) => DrawCommand::FillColor {
                color: color.to_string(),
            },
            Paint::Gradient(gradient) => DrawCommand::FillGradient {
                gradient: gradient.clone(),
            },
        });
    }

    fn stroke(&mut self, paint: &Paint, width: f64) {
        self.commands.push(match paint {
            Paint::Solid(color) => DrawCommand::StrokeColor {
                color: color.to_string(),
                width,
            },
            Paint::Gradient(gradient) => DrawCommand::StrokeGradient {
                gradient: gradient.clone(),
                width,
            },
        });
    }

    fn viewport(&self) -> DVec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_renders_css_string() {
        assert_eq!(Rgba::new(255, 0, 10, 0.5).to_string(), "rgba(255,0,10,0.500)");
        assert_eq!(Rgba::new(1, 2, 3, 1.0).fade(2.0).a, 1.0);
        assert_eq!(Rgba::new(1, 2, 3, 0.8).fade(0.5).a, 0.4);
    }

    #[test]
    fn draw_list_tracks_depth() {
        let mut list = DrawList::new(DVec2::new(800.0, 600.0));
        list.save();
        list.save();
        list.restore();
        assert_eq!(list.depth(), 1);
        list.restore();
        list.restore();
        assert_eq!(list.depth(), 0, "unbalanced restore saturates");
    }

    #[test]
    fn fill_circle_records_path() {
        let mut list = DrawList::default();
        fill_circle(&mut list, DVec2::new(1.0, 2.0), 3.0, &palette::GOLD.into());
        assert_eq!(list.commands.len(), 3);
        assert_eq!(list.paint_count(), 1);
        assert!(matches!(list.commands[1], DrawCommand::Arc { radius, .. } if radius == 3.0));
    }

    #[test]
    fn draw_commands_serialize_with_op_tag() {
        let mut list = DrawList::default();
        list.stroke(&Paint::Solid(palette::FOAM), 2.0);
        let json = serde_json::to_string(&list.commands).unwrap();
        assert!(json.contains(r#""op":"StrokeColor""#));
        assert!(json.contains("rgba(220,240,255,0.900)"));
    }
}
