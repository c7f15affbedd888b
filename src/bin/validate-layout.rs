/// Layout validation tool
/// Sweeps synthetic shelves over several container sizes and checks the
/// layout invariants: area conservation, non-overlapping cells and boxes.
/// Cases too crowded for the minimum box size are listed, not failed.
use rayon::prelude::*;
use shelfview_rs::items::WeightedItem;
use shelfview_rs::layout::{compute_layout, Layout, LayoutConfig};

const CONTAINERS: &[(f64, f64)] = &[
    (1920.0, 1080.0),
    (1200.0, 700.0),
    (800.0, 800.0),
    (300.0, 200.0),
    (200.0, 600.0),
];

struct Dataset {
    name: String,
    items: Vec<WeightedItem>,
}

fn dataset(name: String, weights: impl Iterator<Item = f64>) -> Dataset {
    let mut items: Vec<WeightedItem> = weights
        .enumerate()
        .map(|(i, w)| WeightedItem::new(&format!("Product {i}"), w))
        .collect();
    shelfview_rs::items::sort_by_weight(&mut items);
    Dataset { name, items }
}

fn datasets() -> Vec<Dataset> {
    let mut out = Vec::new();
    for n in [1usize, 2, 3, 5, 8, 13, 21, 34, 60, 100] {
        out.push(dataset(format!("equal x{n}"), (0..n).map(|_| 100.0 / n as f64)));
        out.push(dataset(format!("near-equal x{n}"), (0..n).map(|i| 1.0 + (i % 3) as f64 * 0.01)));
        out.push(dataset(format!("geometric x{n}"), (0..n).map(|i| 0.7f64.powi(i as i32))));
        out.push(dataset(format!("harmonic x{n}"), (0..n).map(|i| 1.0 / (i + 1) as f64)));
    }
    out.push(dataset("dominant".into(), [97.0, 1.0, 1.0, 0.5, 0.5].into_iter()));
    out.push(dataset("zero tail".into(), [60.0, 40.0, 0.0, 0.0].into_iter()));
    out
}

/// Problems found in one layout, and how many boxes came out below the minimum.
fn check(layout: &Layout, items: &[WeightedItem], config: &LayoutConfig) -> (Vec<String>, usize) {
    let mut problems = Vec::new();
    let container = layout.container;

    if layout.boxes.len() != items.len() {
        problems.push(format!("{} boxes for {} items", layout.boxes.len(), items.len()));
    }

    let cell_area: f64 = layout.boxes.iter().map(|b| b.cell.area()).sum();
    let tolerance = items.len().max(1) as f64;
    if (cell_area - container.area()).abs() > tolerance {
        problems.push(format!(
            "cell area {:.2} differs from container {:.2}",
            cell_area,
            container.area()
        ));
    }

    let mut undersized = 0;
    for (i, a) in layout.boxes.iter().enumerate() {
        if !(a.width.is_finite() && a.height.is_finite() && a.x.is_finite() && a.y.is_finite()) {
            problems.push(format!("non-finite box for '{}'", a.item.name));
        }
        if a.width < config.min_box_size || a.height < config.min_box_size {
            undersized += 1;
        }
        let r = a.rect();
        if r.x < a.cell.x - 1e-6 || r.right() > a.cell.right() + 1e-6 || r.y < a.cell.y - 1e-6 || r.bottom() > a.cell.bottom() + 1e-6 {
            problems.push(format!("box of '{}' leaves its cell", a.item.name));
        }
        for b in &layout.boxes[i + 1..] {
            let overlap = a.cell.overlap_area(&b.cell);
            if overlap > 1e-6 {
                problems.push(format!("cells of '{}' and '{}' overlap by {:.3}px²", a.item.name, b.item.name, overlap));
            }
            let overlap = r.overlap_area(&b.rect());
            if overlap > 1e-6 {
                problems.push(format!("boxes of '{}' and '{}' overlap by {:.3}px²", a.item.name, b.item.name, overlap));
            }
        }
    }

    (problems, undersized)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shelfview_rs=warn".parse()?),
        )
        .init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          SHELFVIEW-RS LAYOUT VALIDATION TOOL                ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let config = LayoutConfig::default();
    let sets = datasets();
    let cases: Vec<(&Dataset, (f64, f64))> = sets
        .iter()
        .flat_map(|d| CONTAINERS.iter().map(move |&c| (d, c)))
        .collect();

    println!("Cases: {} datasets x {} containers = {}", sets.len(), CONTAINERS.len(), cases.len());

    let start = std::time::Instant::now();
    let results: Vec<(String, Vec<String>, usize)> = cases
        .par_iter()
        .map(|(set, (w, h))| {
            let label = format!("{} in {:.0}x{:.0}", set.name, w, h);
            match compute_layout(&set.items, *w, *h, &config) {
                Ok(layout) => {
                    let (problems, undersized) = check(&layout, &set.items, &config);
                    (label, problems, undersized)
                }
                Err(e) => (label, vec![e.to_string()], 0),
            }
        })
        .collect();
    let elapsed = start.elapsed();

    println!("Validated in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!();

    let crowded: Vec<_> = results.iter().filter(|(_, _, undersized)| *undersized > 0).collect();
    if !crowded.is_empty() {
        println!("  Crowded cases (boxes shrunk below {:.0}px to avoid overlap):", config.min_box_size);
        for (label, _, undersized) in crowded {
            println!("      {} - {} box(es)", label, undersized);
        }
        println!();
    }

    let failures: Vec<(String, Vec<String>)> = results
        .into_iter()
        .filter(|(_, problems, _)| !problems.is_empty())
        .map(|(label, problems, _)| (label, problems))
        .collect();

    if failures.is_empty() {
        println!("  ✓ All layouts conserve area, tile without overlap, keep boxes inside their cells");
        return Ok(());
    }

    for (label, problems) in &failures {
        println!("  ✗ {}", label);
        for problem in problems.iter().take(5) {
            println!("      {}", problem);
        }
    }
    anyhow::bail!("{} of {} cases failed", failures.len(), cases.len())
}
