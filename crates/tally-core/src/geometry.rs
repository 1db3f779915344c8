//! Geometric primitives: `Point` and `Rect`.
//!
//! Coordinates are in logical pixels of the page, so a widget's bounds and the
//! scrolled viewport live in the same space.

use serde::{Deserialize, Serialize};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the area.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Calculate intersection with another rectangle.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Self::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Fraction of this rectangle's area that lies inside `viewport`, in `[0, 1]`.
    ///
    /// A degenerate (zero-area) rectangle counts as fully visible once its
    /// origin is inside the viewport, so empty widgets still get activated.
    #[must_use]
    pub fn visible_fraction(&self, viewport: &Self) -> f32 {
        let area = self.area();
        if area <= 0.0 {
            let inside = self.x >= viewport.x
                && self.x <= viewport.right()
                && self.y >= viewport.y
                && self.y <= viewport.bottom();
            return if inside { 1.0 } else { 0.0 };
        }
        self.intersection(viewport)
            .map_or(0.0, |overlap| (overlap.area() / area).clamp(0.0, 1.0))
    }

    /// Translate vertically, e.g. to follow a scrolled viewport.
    #[must_use]
    pub fn offset_y(&self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy, self.width, self.height)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}
