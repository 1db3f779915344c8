//! Placement of counters inside a section.
//!
//! Every layout fills rows left to right with equal-width cells of a fixed
//! height; the layouts differ only in how many cells share a row.

use serde::{Deserialize, Serialize};
use tally_core::Rect;

/// Default number of grid columns.
pub const DEFAULT_GRID_COLUMNS: usize = 4;

/// Default cell height in pixels.
pub const DEFAULT_ITEM_HEIGHT: f32 = 160.0;

/// Gap between cells in pixels.
pub const GAP: f32 = 24.0;

/// How counters are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLayout {
    /// Single row
    #[default]
    Horizontal,
    /// Rows of a fixed column count
    Grid,
    /// Single column
    Vertical,
}

impl SectionLayout {
    /// Cells per row for `count` items.
    #[must_use]
    pub fn columns(self, count: usize, grid_columns: usize) -> usize {
        let columns = match self {
            Self::Horizontal => count,
            Self::Grid => grid_columns.max(1).min(count),
            Self::Vertical => 1,
        };
        columns.max(1)
    }

    /// Cell rectangles for `count` items inside `area`, in item order.
    #[must_use]
    pub fn cells(self, area: Rect, count: usize, grid_columns: usize, item_height: f32) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let columns = self.columns(count, grid_columns);
        let gaps = GAP * (columns - 1) as f32;
        let width = ((area.width - gaps) / columns as f32).max(0.0);
        let height = item_height.max(0.0);

        (0..count)
            .map(|i| {
                let (row, column) = (i / columns, i % columns);
                Rect::new(
                    area.x + column as f32 * (width + GAP),
                    area.y + row as f32 * (height + GAP),
                    width,
                    height,
                )
            })
            .collect()
    }

    /// Height needed for `count` items.
    #[must_use]
    pub fn content_height(self, count: usize, grid_columns: usize, item_height: f32) -> f32 {
        if count == 0 {
            return 0.0;
        }
        let rows = count.div_ceil(self.columns(count, grid_columns));
        rows as f32 * item_height + (rows - 1) as f32 * GAP
    }
}
