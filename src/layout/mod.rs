pub mod squarify;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::items::normalize::normalize;
use crate::items::WeightedItem;

pub use squarify::{select_row, squarify, worst_aspect_ratio};

/// An axis-aligned rectangle in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area shared with `other` (0 when they only touch or are apart).
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// One item placed in the treemap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedBox {
    pub item: WeightedItem,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// The exact slice of the container assigned to the item, before the
    /// cosmetic inset and the minimum-size floor. Cells tile the container.
    pub cell: Rect,
}

impl PositionedBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// The result of one layout call.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub container: Rect,
    /// Boxes in placement order (largest weight first)
    pub boxes: Vec<PositionedBox>,
}

/// Configuration for the treemap layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Smallest width/height a box is drawn with (px)
    pub min_box_size: f64,
    /// Gap kept on every side of a box inside its cell (px)
    pub box_inset: f64,
    /// Most items the row selector will try in one strip
    pub row_candidate_cap: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_box_size: 30.0,
            box_inset: 1.0,
            row_candidate_cap: 4,
        }
    }
}

/// Lay out `items` (sorted by weight descending) in a `width` x `height` container.
///
/// Empty input gives an empty layout. Zero total weight and bad geometry are
/// rejected before any strip is cut.
pub fn compute_layout(
    items: &[WeightedItem],
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    let normalized = normalize(items, width, height)?;
    let container = Rect::new(0.0, 0.0, width, height);

    if normalized.is_empty() {
        tracing::debug!("No items to lay out in {:.0}x{:.0}", width, height);
        return Ok(Layout {
            container,
            boxes: Vec::new(),
        });
    }

    tracing::info!(
        "Laying out {} items in {:.0}x{:.0} area",
        normalized.len(),
        width,
        height
    );

    let boxes = squarify(&normalized, container, config);
    Ok(Layout { container, boxes })
}
