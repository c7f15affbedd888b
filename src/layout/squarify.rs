use super::{LayoutConfig, PositionedBox, Rect};
use crate::items::normalize::NormalizedItem;
use crate::items::WeightedItem;

/// Worst aspect ratio among the boxes of a strip laid along a side of `length`.
///
/// `max(L² * max / s², s² / (L² * min))` with `s` the strip's total area.
/// Zero-area members make the ratio infinite.
pub fn worst_aspect_ratio(row: &[NormalizedItem], length: f64) -> f64 {
    if row.is_empty() || length <= 0.0 {
        return f64::INFINITY;
    }
    let sum: f64 = row.iter().map(|n| n.area).sum();
    if sum <= 0.0 {
        return f64::INFINITY;
    }
    let side_sq = length * length;
    let sum_sq = sum * sum;
    let max_area = row.iter().map(|n| n.area).fold(0.0, f64::max);
    let min_area = row.iter().map(|n| n.area).fold(f64::INFINITY, f64::min);
    let a = (side_sq * max_area) / sum_sq;
    let b = sum_sq / (side_sq * min_area);
    a.max(b)
}

/// How many of the leading `remaining` items go into the next strip.
///
/// Grows the strip from the largest item while the worst aspect ratio strictly
/// improves, trying at most `cap` items. Two items always share one strip.
pub fn select_row(remaining: &[NormalizedItem], length: f64, cap: usize) -> usize {
    match remaining.len() {
        0 => return 0,
        1 => return 1,
        2 => return 2,
        _ => {}
    }

    let limit = remaining.len().min(cap.max(1));
    let mut best = worst_aspect_ratio(&remaining[..1], length);
    let mut count = 1;
    for size in 2..=limit {
        let ratio = worst_aspect_ratio(&remaining[..size], length);
        if ratio < best {
            best = ratio;
            count = size;
        } else {
            break;
        }
    }
    count
}

/// Squarified layout of `items` inside `container`.
///
/// Each pass cuts one strip off the available rectangle: a column from the
/// left when it is at least as wide as tall, otherwise a row from the top. The
/// strip's area is the row's share of the remaining total applied to the
/// available rectangle, so the last strip always closes the container exactly.
///
/// While the container has room, strips are planned so every cell can hold a
/// box of `min_box_size` plus the inset: small items borrow area from the
/// strip before them. Once it runs out of room the rest is laid out purely
/// proportionally and boxes shrink with their cells. Boxes never leave their
/// cell, so they never overlap.
pub fn squarify(items: &[NormalizedItem], container: Rect, config: &LayoutConfig) -> Vec<PositionedBox> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.area.total_cmp(&a.area)); // descending, stable on ties

    let min_cell = config.min_box_size + 2.0 * config.box_inset;
    let mut keep_minimum = min_cell > 0.0 && container.width.min(container.height) >= min_cell;
    if min_cell > 0.0 && !keep_minimum {
        tracing::debug!(
            "Container {:.0}x{:.0} is smaller than one {:.0}px cell",
            container.width,
            container.height,
            min_cell
        );
    }

    let mut boxes = Vec::with_capacity(sorted.len());
    let mut available = container;
    let mut start = 0;

    while start < sorted.len() {
        let remaining = &sorted[start..];
        if remaining.len() == 1 {
            boxes.push(place_box(&remaining[0].item, available, config));
            break;
        }

        let column = available.width >= available.height;
        let (length, extent) = if column {
            (available.height, available.width)
        } else {
            (available.width, available.height)
        };
        let remaining_total: f64 = remaining.iter().map(|n| n.area).sum();

        let planned = if keep_minimum {
            plan_strip_with_minimum(remaining, length, extent, remaining_total, min_cell, config.row_candidate_cap)
        } else {
            None
        };
        let (count, thickness) = match planned {
            Some(plan) => plan,
            None => {
                if keep_minimum {
                    tracing::warn!(
                        "No room for {} more boxes of {:.0}px in {:.0}x{:.0}; shrinking them",
                        remaining.len(),
                        config.min_box_size,
                        available.width,
                        available.height
                    );
                    keep_minimum = false;
                }
                plan_strip(remaining, length, extent, remaining_total, config.row_candidate_cap)
            }
        };

        let (strip, rest) = if column {
            (
                Rect::new(available.x, available.y, thickness, available.height),
                Rect::new(
                    available.x + thickness,
                    available.y,
                    (available.width - thickness).max(0.0),
                    available.height,
                ),
            )
        } else {
            (
                Rect::new(available.x, available.y, available.width, thickness),
                Rect::new(
                    available.x,
                    available.y + thickness,
                    available.width,
                    (available.height - thickness).max(0.0),
                ),
            )
        };

        tracing::debug!(
            "Strip of {} item(s) as {}: {:.1}x{:.1} at ({:.1}, {:.1})",
            count,
            if column { "column" } else { "row" },
            strip.width,
            strip.height,
            strip.x,
            strip.y
        );

        layout_strip(&remaining[..count], strip, column, config, &mut boxes);

        available = rest;
        start += count;
    }

    boxes
}

/// Rounding allowance when checking lengths against the minimum cell.
const SLACK: f64 = 1e-6;

/// Proportional strip: item count and thickness along `extent`.
fn plan_strip(remaining: &[NormalizedItem], length: f64, extent: f64, total: f64, cap: usize) -> (usize, f64) {
    // Only zero-area items left: they split what is left evenly.
    if total <= 0.0 {
        return (remaining.len(), extent);
    }
    let count = select_row(remaining, length, cap);
    if count == remaining.len() {
        return (count, extent);
    }
    let row_total: f64 = remaining[..count].iter().map(|n| n.area).sum();
    (count, extent * (row_total / total).clamp(0.0, 1.0))
}

/// Strip whose cells are all at least `min_cell` on both sides and which
/// leaves enough lines of `min_cell` for the items after it.
///
/// `None` when no such strip exists.
fn plan_strip_with_minimum(
    remaining: &[NormalizedItem],
    length: f64,
    extent: f64,
    total: f64,
    min_cell: f64,
    cap: usize,
) -> Option<(usize, f64)> {
    let n = remaining.len();
    let per_line = ((length + SLACK) / min_cell).floor() as usize;
    if per_line == 0 || extent + SLACK < min_cell {
        return None;
    }

    if total <= 0.0 {
        let lines = n.div_ceil(per_line);
        let thickness = extent / lines as f64;
        if thickness + SLACK < min_cell {
            return None;
        }
        return Some(if lines == 1 { (n, extent) } else { (per_line, thickness) });
    }

    // longest leading run whose cells stay at least min_cell long
    let mut limit = 0;
    let mut row_total = 0.0;
    for item in remaining {
        let next = row_total + item.area;
        if item.area * length < min_cell * next * (1.0 - SLACK) {
            break;
        }
        row_total = next;
        limit += 1;
    }
    if limit == 0 {
        return None;
    }

    let preferred = select_row(remaining, length, cap.min(limit)).min(limit);
    (preferred..=limit).find_map(|count| {
        if count == n {
            return Some((count, extent));
        }
        let rest_lines = (n - count).div_ceil(per_line) as f64;
        let widest = extent - rest_lines * min_cell;
        if widest + SLACK < min_cell {
            return None;
        }
        let row_total: f64 = remaining[..count].iter().map(|n| n.area).sum();
        let thickness = (extent * row_total / total).clamp(min_cell.min(widest), widest);
        Some((count, thickness))
    })
}

/// Split a strip into cells along its long side, in proportion to item area.
fn layout_strip(
    row: &[NormalizedItem],
    strip: Rect,
    column: bool,
    config: &LayoutConfig,
    boxes: &mut Vec<PositionedBox>,
) {
    let row_total: f64 = row.iter().map(|n| n.area).sum();
    let long = if column { strip.height } else { strip.width };

    let mut offset = 0.0;
    for (i, n) in row.iter().enumerate() {
        let length = if i + 1 == row.len() {
            // last cell closes the strip so rounding never leaves a sliver
            (long - offset).max(0.0)
        } else if row_total > 0.0 {
            long * (n.area / row_total)
        } else {
            long / row.len() as f64
        };

        let cell = if column {
            Rect::new(strip.x, strip.y + offset, strip.width, length)
        } else {
            Rect::new(strip.x + offset, strip.y, length, strip.height)
        };
        boxes.push(place_box(&n.item, cell, config));
        offset += length;
    }
}

/// Shrink a cell by the inset, keeping the box at the minimum size as far as
/// the cell allows. The box is centered in its cell and never leaves it.
fn place_box(item: &WeightedItem, cell: Rect, config: &LayoutConfig) -> PositionedBox {
    let inset = config.box_inset;
    let width = (cell.width - 2.0 * inset).max(config.min_box_size).min(cell.width);
    let height = (cell.height - 2.0 * inset).max(config.min_box_size).min(cell.height);

    if width < config.min_box_size || height < config.min_box_size {
        tracing::trace!(
            "Box for '{}' below minimum: {:.1}x{:.1}",
            item.name,
            width,
            height
        );
    }

    PositionedBox {
        item: item.clone(),
        x: cell.x + (cell.width - width) / 2.0,
        y: cell.y + (cell.height - height) / 2.0,
        width,
        height,
        cell,
    }
}
