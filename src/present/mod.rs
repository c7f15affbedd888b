pub mod colors;
pub mod text;
pub mod tooltip;

use serde::{Deserialize, Serialize};

use self::colors::{AppColor, ColorBand};
use self::text::{font_sizes, label_for, FontSizes};
use self::tooltip::{build_tooltip, TooltipInfo};
use crate::items::WeightedItem;
use crate::layout::{Layout, Rect};

/// Thresholds and factors for the derived, render-only values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Percentile upper bounds of the first five color bands
    pub band_thresholds: [f64; 5],
    /// Box area bounds (px²) between font tiers
    pub font_area_thresholds: [f64; 5],
    /// Name font size per tier (px)
    pub name_font_sizes: [f32; 6],
    /// Percentage font size as a multiple of the name size, per tier
    pub percent_font_scales: [f32; 6],
    /// Boxes thinner than this (px) get smaller fonts
    pub small_dimension: f64,
    pub small_dimension_scale: f32,
    pub min_font_size: f32,
    /// Average glyph width as a fraction of the font size
    pub char_width_factor: f64,
    /// Horizontal padding inside a box on each side (px)
    pub label_padding: f64,
    /// Below this many characters a label is abbreviated
    pub min_label_chars: usize,
    pub abbreviation_chars: usize,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            band_thresholds: [0.15, 0.30, 0.50, 0.70, 0.85],
            font_area_thresholds: [5_000.0, 8_000.0, 15_000.0, 25_000.0, 40_000.0],
            name_font_sizes: [8.0, 9.0, 10.0, 11.0, 12.0, 14.0],
            percent_font_scales: [1.2, 1.25, 1.3, 1.4, 1.5, 1.6],
            small_dimension: 60.0,
            small_dimension_scale: 0.85,
            min_font_size: 8.0,
            char_width_factor: 0.6,
            label_padding: 4.0,
            min_label_chars: 5,
            abbreviation_chars: 3,
        }
    }
}

/// A positioned box with everything a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderBox {
    pub item: WeightedItem,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub cell: Rect,
    /// Position in weight-descending order (0 = heaviest)
    pub rank: usize,
    pub band: ColorBand,
    pub fill: AppColor,
    pub text_color: AppColor,
    pub fonts: FontSizes,
    /// Name as it fits in the box
    pub label: String,
    pub tooltip: TooltipInfo,
}

/// Derive colors, fonts and labels for every box of a layout.
pub fn present(layout: &Layout, config: &PresentationConfig) -> Vec<RenderBox> {
    let ranks = rank_by_weight(layout.boxes.iter().map(|b| &b.item));
    let count = layout.boxes.len();

    layout
        .boxes
        .iter()
        .zip(ranks)
        .map(|(b, rank)| {
            let band = ColorBand::for_rank(rank, count, &config.band_thresholds);
            let fonts = font_sizes(b.width, b.height, config);
            RenderBox {
                item: b.item.clone(),
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                cell: b.cell,
                rank,
                band,
                fill: band.fill(),
                text_color: band.text(),
                fonts,
                label: label_for(&b.item.name, b.width, fonts.name, config),
                tooltip: build_tooltip(&b.item),
            }
        })
        .collect()
}

/// Rank of each item in weight-descending order, computed once. Ties keep
/// their relative order.
pub fn rank_by_weight<'a>(items: impl Iterator<Item = &'a WeightedItem>) -> Vec<usize> {
    let weights: Vec<f64> = items.map(|item| item.weight).collect();
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));

    let mut ranks = vec![0; weights.len()];
    for (rank, index) in order.into_iter().enumerate() {
        ranks[index] = rank;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, LayoutConfig};

    #[test]
    fn ranks_ignore_input_order() {
        let items = [
            WeightedItem::new("c", 1.0),
            WeightedItem::new("a", 9.0),
            WeightedItem::new("b", 5.0),
        ];
        assert_eq!(rank_by_weight(items.iter()), [2, 0, 1]);
    }

    #[test]
    fn heaviest_item_is_darkest_with_biggest_font() {
        let items = vec![
            WeightedItem::new("A", 50.0),
            WeightedItem::new("B", 30.0),
            WeightedItem::new("C", 20.0),
        ];
        let layout = compute_layout(&items, 300.0, 200.0, &LayoutConfig::default()).unwrap();
        let boxes = present(&layout, &PresentationConfig::default());

        assert_eq!(boxes[0].item.name, "A");
        assert_eq!(boxes[0].band, ColorBand::Darkest);
        assert_eq!(boxes[0].text_color, AppColor::new(1.0, 1.0, 1.0));
        assert!(boxes[0].fonts.name >= boxes[2].fonts.name);
        assert_eq!(boxes[0].label, "A");
        assert_eq!(boxes[0].tooltip.percentage_display, "50.0%");
    }

    #[test]
    fn bands_are_scale_invariant() {
        let config = LayoutConfig::default();
        let small: Vec<WeightedItem> = (1..=8).rev().map(|w| WeightedItem::new(&format!("p{w}"), w as f64)).collect();
        let large: Vec<WeightedItem> = small
            .iter()
            .map(|i| WeightedItem::new(&i.name, i.weight * 1000.0))
            .collect();

        let a = present(&compute_layout(&small, 800.0, 600.0, &config).unwrap(), &PresentationConfig::default());
        let b = present(&compute_layout(&large, 800.0, 600.0, &config).unwrap(), &PresentationConfig::default());
        let bands_a: Vec<ColorBand> = a.iter().map(|r| r.band).collect();
        let bands_b: Vec<ColorBand> = b.iter().map(|r| r.band).collect();
        assert_eq!(bands_a, bands_b);
    }
}
