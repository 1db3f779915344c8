//! Display variants.
//!
//! [`render`] is a pure mapping from a counter, the value currently on
//! screen and a [`Variant`] to a [`CounterView`]. Painting the view is a
//! separate step so the mapping can be tested without a canvas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tally_core::{
    format_with_suffix, Canvas, Color, CounterSpec, FontWeight, Icon, IconKind, Locale, Point,
    Rect, TextStyle,
};
use thiserror::Error;

/// Smallest denominator for ring progress, so small targets don't fill the
/// ring after a few ticks.
pub const CIRCULAR_PROGRESS_FLOOR: u64 = 100;

const PADDING: f32 = 16.0;
const RADIUS: f32 = 12.0;
const TEXT_DARK: Color = Color {
    r: 0.067,
    g: 0.094,
    b: 0.153,
    a: 1.0,
};

/// Error parsing a variant or card style name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {name:?}")]
pub struct UnknownName {
    kind: &'static str,
    name: String,
}

/// Visual layout of one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Icon and number inline
    Compact,
    /// Progress ring with the number centered
    Circular,
    /// Icon above number above label
    #[default]
    Card,
    /// Number and label only
    Minimal,
}

impl Variant {
    /// Every variant.
    pub const ALL: [Self; 4] = [Self::Compact, Self::Circular, Self::Card, Self::Minimal];

    /// Config name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Circular => "circular",
            Self::Card => "card",
            Self::Minimal => "minimal",
        }
    }

    const fn shows_icon(self) -> bool {
        matches!(self, Self::Compact | Self::Card)
    }

    const fn shows_label(self) -> bool {
        !matches!(self, Self::Compact)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName {
                kind: "variant",
                name: s.to_string(),
            })
    }
}

/// Card background treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    /// White rounded card
    #[default]
    Default,
    /// Accent gradient with contrasting text
    Gradient,
    /// No background
    Minimal,
    /// White card with a drop shadow
    Elevated,
}

impl CardStyle {
    /// Every style.
    pub const ALL: [Self; 4] = [Self::Default, Self::Gradient, Self::Minimal, Self::Elevated];

    /// Config name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Gradient => "gradient",
            Self::Minimal => "minimal",
            Self::Elevated => "elevated",
        }
    }
}

impl FromStr for CardStyle {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName {
                kind: "card style",
                name: s.to_string(),
            })
    }
}

/// What one counter shows for one displayed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterView {
    /// Layout
    pub variant: Variant,
    /// Formatted number with suffix
    pub text: String,
    /// Label, for variants that show one
    pub label: Option<String>,
    /// Icon, for variants that show one
    pub icon: Option<Icon>,
    /// Accent color
    pub color: Color,
    /// Ring fill in `[0, 1]`, circular variant only
    pub progress: Option<f32>,
}

/// Ring fill for `displayed` out of `target`.
#[must_use]
pub fn circular_progress(displayed: u64, target: u64) -> f32 {
    let denominator = target.max(CIRCULAR_PROGRESS_FLOOR) as f64;
    (displayed as f64 / denominator).clamp(0.0, 1.0) as f32
}

/// Render with the default locale.
#[must_use]
pub fn render(spec: &CounterSpec, displayed: u64, variant: Variant) -> CounterView {
    render_with(spec, displayed, variant, Locale::default())
}

/// Map a counter and its displayed value to a view.
#[must_use]
pub fn render_with(
    spec: &CounterSpec,
    displayed: u64,
    variant: Variant,
    locale: Locale,
) -> CounterView {
    let displayed = displayed.min(spec.target_value());
    CounterView {
        variant,
        text: format_with_suffix(displayed, spec.suffix(), locale),
        label: variant.shows_label().then(|| spec.label().to_string()),
        icon: if variant.shows_icon() {
            spec.icon().cloned()
        } else {
            None
        },
        color: spec.color().unwrap_or(Color::ACCENT),
        progress: (variant == Variant::Circular)
            .then(|| circular_progress(displayed, spec.target_value())),
    }
}

impl CounterView {
    /// Paint into `bounds`.
    pub fn paint(&self, bounds: Rect, style: CardStyle, canvas: &mut dyn Canvas) {
        let text_color = paint_background(bounds, style, self.color, canvas);
        let number_color = if style == CardStyle::Gradient {
            text_color
        } else {
            self.color
        };
        let number = TextStyle::new(32.0, number_color, FontWeight::Bold);
        let label = TextStyle::new(14.0, text_color.with_alpha(0.8), FontWeight::Normal).centered();
        let center = bounds.center();

        match self.variant {
            Variant::Compact => {
                let icon_size = (bounds.height - 2.0 * PADDING).clamp(16.0, 40.0);
                let icon_center = Point::new(bounds.x + PADDING + icon_size / 2.0, center.y);
                self.paint_icon(icon_center, icon_size, canvas);
                canvas.draw_text(
                    &self.text,
                    Point::new(bounds.x + 2.0 * PADDING + icon_size, center.y),
                    &number,
                );
            }
            Variant::Circular => {
                let radius = (bounds.width.min(bounds.height) / 2.0 - PADDING - 12.0).max(8.0);
                let ring_center = Point::new(center.x, bounds.y + PADDING + radius);
                canvas.stroke_circle(ring_center, radius, Color::TRACK, 8.0);
                canvas.stroke_arc(
                    ring_center,
                    radius,
                    self.progress.unwrap_or(0.0),
                    self.color,
                    8.0,
                );
                canvas.draw_text(&self.text, ring_center, &number.centered());
                self.paint_label(Point::new(center.x, bounds.bottom() - PADDING), &label, canvas);
            }
            Variant::Card => {
                self.paint_icon(Point::new(center.x, bounds.y + PADDING + 20.0), 40.0, canvas);
                canvas.draw_text(
                    &self.text,
                    Point::new(center.x, bounds.y + PADDING + 80.0),
                    &number.centered(),
                );
                self.paint_label(
                    Point::new(center.x, bounds.y + PADDING + 110.0),
                    &label,
                    canvas,
                );
            }
            Variant::Minimal => {
                canvas.draw_text(&self.text, Point::new(center.x, center.y - 10.0), &number.centered());
                self.paint_label(Point::new(center.x, center.y + 20.0), &label, canvas);
            }
        }
    }

    fn paint_icon(&self, center: Point, size: f32, canvas: &mut dyn Canvas) {
        match &self.icon {
            Some(Icon {
                kind: IconKind::Class,
                reference,
            }) => canvas.draw_glyph(reference, center, size, self.color),
            Some(Icon {
                kind: IconKind::Image,
                reference,
            }) => canvas.draw_image(
                reference,
                Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size),
            ),
            None => {}
        }
    }

    fn paint_label(&self, position: Point, style: &TextStyle, canvas: &mut dyn Canvas) {
        if let Some(label) = &self.label {
            canvas.draw_text(label, position, style);
        }
    }
}

/// Paint the card background and return the text color that reads on it.
fn paint_background(bounds: Rect, style: CardStyle, accent: Color, canvas: &mut dyn Canvas) -> Color {
    match style {
        CardStyle::Default => {
            canvas.fill_rect(bounds, RADIUS, Color::WHITE);
            TEXT_DARK
        }
        CardStyle::Gradient => {
            let to = accent.lerp(&Color::BLACK, 0.3);
            canvas.fill_gradient(bounds, RADIUS, accent, to);
            accent.readable_text()
        }
        CardStyle::Minimal => TEXT_DARK,
        CardStyle::Elevated => {
            canvas.fill_rect(bounds.offset_y(4.0), RADIUS, Color::BLACK.with_alpha(0.12));
            canvas.fill_rect(bounds, RADIUS, Color::WHITE);
            TEXT_DARK
        }
    }
}
