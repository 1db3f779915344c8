//! Paint abstraction and a recording backend.
//!
//! Widgets paint through [`Canvas`]; backends translate the calls into DOM,
//! canvas, or terminal output. [`RecordingCanvas`] keeps the calls as
//! [`DrawCommand`]s so tests can assert on exactly what was painted.

use crate::color::Color;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    /// Position is the left edge
    #[default]
    Start,
    /// Position is the center
    Center,
}

/// Text style for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Anchoring of `position`
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            align: TextAlign::Start,
        }
    }
}

impl TextStyle {
    /// Style with size, color and weight.
    #[must_use]
    pub const fn new(size: f32, color: Color, weight: FontWeight) -> Self {
        Self {
            size,
            color,
            weight,
            align: TextAlign::Start,
        }
    }

    /// Centered variant of this style.
    #[must_use]
    pub const fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// Minimal rendering backend interface.
pub trait Canvas {
    /// Fill a rectangle, optionally with rounded corners.
    fn fill_rect(&mut self, rect: Rect, radius: f32, color: Color);

    /// Fill a rectangle with a top-to-bottom gradient.
    fn fill_gradient(&mut self, rect: Rect, radius: f32, from: Color, to: Color);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Stroke a full circle.
    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32);

    /// Stroke an arc clockwise from 12 o'clock covering `sweep` of a full turn (`0..=1`).
    fn stroke_arc(&mut self, center: Point, radius: f32, sweep: f32, color: Color, width: f32);

    /// Draw a glyph-font icon identified by its class name.
    fn draw_glyph(&mut self, class: &str, center: Point, size: f32, color: Color);

    /// Draw an image scaled into `rect`.
    fn draw_image(&mut self, source: &str, rect: Rect);
}

/// A recorded paint call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Solid rectangle
    Rect {
        /// Bounds
        bounds: Rect,
        /// Corner radius
        radius: f32,
        /// Fill color
        color: Color,
    },
    /// Gradient rectangle
    Gradient {
        /// Bounds
        bounds: Rect,
        /// Corner radius
        radius: f32,
        /// Top color
        from: Color,
        /// Bottom color
        to: Color,
    },
    /// Text run
    Text {
        /// Content
        content: String,
        /// Anchor position
        position: Point,
        /// Style
        style: TextStyle,
    },
    /// Circle outline
    Circle {
        /// Center
        center: Point,
        /// Radius
        radius: f32,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Partial circle outline
    Arc {
        /// Center
        center: Point,
        /// Radius
        radius: f32,
        /// Fraction of a full turn
        sweep: f32,
        /// Stroke color
        color: Color,
        /// Stroke width
        width: f32,
    },
    /// Glyph icon
    Glyph {
        /// Icon class
        class: String,
        /// Center
        center: Point,
        /// Size in pixels
        size: f32,
        /// Color
        color: Color,
    },
    /// Image icon
    Image {
        /// Image path or URL
        source: String,
        /// Destination
        bounds: Rect,
    },
}

/// Canvas that records every call.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Create an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands in paint order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Text content of every recorded text run, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            color,
        });
    }

    fn fill_gradient(&mut self, rect: Rect, radius: f32, from: Color, to: Color) {
        self.commands.push(DrawCommand::Gradient {
            bounds: rect,
            radius,
            from,
            to,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            width,
        });
    }

    fn stroke_arc(&mut self, center: Point, radius: f32, sweep: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            sweep: sweep.clamp(0.0, 1.0),
            color,
            width,
        });
    }

    fn draw_glyph(&mut self, class: &str, center: Point, size: f32, color: Color) {
        self.commands.push(DrawCommand::Glyph {
            class: class.to_string(),
            center,
            size,
            color,
        });
    }

    fn draw_image(&mut self, source: &str, rect: Rect) {
        self.commands.push(DrawCommand::Image {
            source: source.to_string(),
            bounds: rect,
        });
    }
}
