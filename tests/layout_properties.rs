//! Property tests for the treemap layout and its presentation.

use proptest::prelude::*;

use shelfview_rs::items::{sort_by_weight, total_weight, WeightedItem};
use shelfview_rs::layout::{compute_layout, LayoutConfig};
use shelfview_rs::present::text::truncate_label;
use shelfview_rs::present::{present, PresentationConfig};

const EPS: f64 = 1e-6;

fn items_strategy() -> impl Strategy<Value = Vec<WeightedItem>> {
    prop::collection::vec(0.1f64..100.0, 1..40).prop_map(|weights| {
        let mut items: Vec<WeightedItem> = weights
            .into_iter()
            .enumerate()
            .map(|(i, w)| WeightedItem::new(&format!("Item {i}"), w))
            .collect();
        sort_by_weight(&mut items);
        items
    })
}

fn container_strategy() -> impl Strategy<Value = (f64, f64)> {
    (100.0f64..2000.0, 100.0f64..2000.0)
}

proptest! {
    #[test]
    fn cells_tile_the_container(items in items_strategy(), (w, h) in container_strategy()) {
        let layout = compute_layout(&items, w, h, &LayoutConfig::default()).unwrap();
        prop_assert_eq!(layout.boxes.len(), items.len());

        let area: f64 = layout.boxes.iter().map(|b| b.cell.area()).sum();
        prop_assert!((area - w * h).abs() <= EPS * w * h, "cells cover {} of {}", area, w * h);

        for b in &layout.boxes {
            let c = b.cell;
            prop_assert!(c.x >= -EPS && c.y >= -EPS);
            prop_assert!(c.right() <= w + EPS && c.bottom() <= h + EPS);
        }
    }

    #[test]
    fn cells_never_overlap(items in items_strategy(), (w, h) in container_strategy()) {
        let layout = compute_layout(&items, w, h, &LayoutConfig::default()).unwrap();
        for (i, a) in layout.boxes.iter().enumerate() {
            for b in &layout.boxes[i + 1..] {
                let overlap = a.cell.overlap_area(&b.cell);
                prop_assert!(overlap <= EPS, "'{}' and '{}' overlap by {}", a.item.name, b.item.name, overlap);
            }
        }
    }

    #[test]
    fn cell_area_is_proportional_to_weight(items in items_strategy(), (w, h) in container_strategy()) {
        // no minimum box, so no item borrows area
        let config = LayoutConfig { min_box_size: 0.0, box_inset: 0.0, ..LayoutConfig::default() };
        let layout = compute_layout(&items, w, h, &config).unwrap();
        let total = total_weight(&items);
        for b in &layout.boxes {
            let expected = b.item.weight / total * w * h;
            prop_assert!(
                (b.cell.area() - expected).abs() <= EPS * w * h,
                "'{}': {} vs {}", b.item.name, b.cell.area(), expected
            );
        }
    }

    #[test]
    fn boxes_never_overlap(items in items_strategy(), (w, h) in container_strategy()) {
        let layout = compute_layout(&items, w, h, &LayoutConfig::default()).unwrap();
        for (i, a) in layout.boxes.iter().enumerate() {
            for b in &layout.boxes[i + 1..] {
                let overlap = a.rect().overlap_area(&b.rect());
                prop_assert!(overlap <= EPS, "boxes '{}' and '{}' overlap by {}", a.item.name, b.item.name, overlap);
            }
        }
    }

    #[test]
    fn boxes_stay_inside_their_cells(items in items_strategy(), (w, h) in container_strategy()) {
        let config = LayoutConfig::default();
        let min_cell = config.min_box_size + 2.0 * config.box_inset;
        let layout = compute_layout(&items, w, h, &config).unwrap();
        for b in &layout.boxes {
            let (r, c) = (b.rect(), b.cell);
            prop_assert!(r.x >= c.x - EPS && r.right() <= c.right() + EPS);
            prop_assert!(r.y >= c.y - EPS && r.bottom() <= c.bottom() + EPS);
            prop_assert!(r.x >= -EPS && r.right() <= w + EPS);
            prop_assert!(r.y >= -EPS && r.bottom() <= h + EPS);
            if c.width >= min_cell {
                prop_assert!(b.width >= config.min_box_size);
            }
            if c.height >= min_cell {
                prop_assert!(b.height >= config.min_box_size);
            }
        }
    }

    #[test]
    fn roomy_shelves_keep_the_minimum_box(
        weights in prop::collection::vec(1.0f64..100.0, 1..6),
        (w, h) in (600.0f64..2000.0, 600.0f64..2000.0),
    ) {
        let mut items: Vec<WeightedItem> = weights
            .iter()
            .enumerate()
            .map(|(i, &weight)| WeightedItem::new(&format!("Item {i}"), weight))
            .collect();
        sort_by_weight(&mut items);
        let config = LayoutConfig::default();
        let layout = compute_layout(&items, w, h, &config).unwrap();
        for b in &layout.boxes {
            prop_assert!(
                b.width >= config.min_box_size && b.height >= config.min_box_size,
                "'{}' is {}x{}", b.item.name, b.width, b.height
            );
        }
    }

    #[test]
    fn layout_is_deterministic(items in items_strategy(), (w, h) in container_strategy()) {
        let config = LayoutConfig::default();
        let first = compute_layout(&items, w, h, &config).unwrap();
        let second = compute_layout(&items, w, h, &config).unwrap();
        prop_assert_eq!(first.boxes, second.boxes);
    }

    #[test]
    fn bands_follow_rank_and_ignore_scale(
        items in items_strategy(),
        scale in 0.01f64..100.0,
    ) {
        let config = PresentationConfig::default();
        let layout = compute_layout(&items, 1200.0, 700.0, &LayoutConfig::default()).unwrap();
        let rendered = present(&layout, &config);

        for a in &rendered {
            for b in &rendered {
                if a.item.weight > b.item.weight {
                    prop_assert!(a.band <= b.band);
                }
            }
        }

        let scaled: Vec<WeightedItem> = items
            .iter()
            .map(|item| WeightedItem::new(&item.name, item.weight * scale))
            .collect();
        let scaled_layout = compute_layout(&scaled, 1200.0, 700.0, &LayoutConfig::default()).unwrap();
        let scaled_bands: Vec<_> = present(&scaled_layout, &config).iter().map(|r| r.band).collect();
        let bands: Vec<_> = rendered.iter().map(|r| r.band).collect();
        prop_assert_eq!(bands, scaled_bands);
    }

    #[test]
    fn labels_fit_their_budget(name in "[A-Za-z0-9 ]{0,40}", max_chars in 0usize..40) {
        let config = PresentationConfig::default();
        let label = truncate_label(&name, max_chars, &config);
        let len = label.chars().count();

        if max_chars < config.min_label_chars {
            prop_assert!(len <= config.abbreviation_chars + 1);
        } else {
            prop_assert!(len <= max_chars);
        }
        if len < name.chars().count() || label != name {
            prop_assert!(label.ends_with('…'));
        }
    }
}
