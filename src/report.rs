use serde::Serialize;

use crate::config::Config;
use crate::detection::{rebalance_percentages, DetectedProduct};
use crate::error::LayoutError;
use crate::items::group::{group_by_brand, BrandGroup};
use crate::items::{items_from_products, Coverage, ImbalancedTotal};
use crate::layout::{compute_layout, Rect};
use crate::present::{present, RenderBox};

/// Everything the display layer shows for one detection.
#[derive(Debug, Clone, Serialize)]
pub struct ShelfReport {
    pub coverage: Coverage,
    pub warning: Option<ImbalancedTotal>,
    /// Total before rescaling, when the percentages were rescaled
    pub rebalanced_from: Option<f64>,
    pub container: Rect,
    pub boxes: Vec<RenderBox>,
    pub brands: Vec<BrandGroup>,
}

impl ShelfReport {
    /// A report with nothing to draw, for inputs that have no layout.
    pub fn placeholder(coverage: Coverage, width: f64, height: f64) -> Self {
        Self {
            coverage,
            warning: coverage.warning(),
            rebalanced_from: None,
            container: Rect::new(0.0, 0.0, width, height),
            boxes: Vec::new(),
            brands: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Run the full pipeline for one detection response.
pub fn build_report(
    products: &[DetectedProduct],
    width: f64,
    height: f64,
    config: &Config,
) -> Result<ShelfReport, LayoutError> {
    let mut products = products.to_vec();
    let rebalanced_from = if config.rebalance {
        rebalance_percentages(&mut products, config.rebalance_tolerance)
    } else {
        None
    };

    let items = items_from_products(&products);
    let coverage = Coverage::of(&items, config.balance_tolerance);
    let warning = coverage.warning();
    if let Some(warning) = &warning {
        if !items.is_empty() {
            tracing::warn!("{}", warning);
        }
    }

    let layout = compute_layout(&items, width, height, &config.layout)?;
    let boxes = present(&layout, &config.presentation);
    let brands = group_by_brand(&items);

    tracing::info!(
        "Report ready: {} boxes, {} brands, coverage {:.1}%",
        boxes.len(),
        brands.len(),
        coverage.total
    );

    Ok(ShelfReport {
        coverage,
        warning,
        rebalanced_from,
        container: layout.container,
        boxes,
        brands,
    })
}
