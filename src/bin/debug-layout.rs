/// Diagnostic tool to verify payload → items → layout → presentation
use shelfview_rs::detection::{parse_payload, rebalance_percentages, DetectedProduct};
use shelfview_rs::items::{items_from_products, total_weight};
use shelfview_rs::layout::{compute_layout, LayoutConfig};
use shelfview_rs::present::{present, PresentationConfig};

fn sample_products() -> Vec<DetectedProduct> {
    vec![
        DetectedProduct::new("Samsung Galaxy A54", 18.5),
        DetectedProduct::new("iPhone 15", 15.5),
        DetectedProduct::new("Vivo Y series", 14.0),
        DetectedProduct::new("Vivo V series", 16.0),
        DetectedProduct::new("Redmi Note 13", 12.0),
        DetectedProduct::new("OnePlus Nord CE", 10.0),
        DetectedProduct::new("Other products", 14.0),
    ]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shelfview_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut products = match args.next() {
        Some(path) => parse_payload(&std::fs::read_to_string(&path)?)?,
        None => sample_products(),
    };
    let width: f64 = args.next().map(|w| w.parse()).transpose()?.unwrap_or(1200.0);
    let height: f64 = args.next().map(|h| h.parse()).transpose()?.unwrap_or(700.0);

    println!("=== DIAGNOSTIC: Payload → Layout Pipeline ===");
    println!("\n[1] Payload: {} products", products.len());

    if let Some(total) = rebalance_percentages(&mut products, 0.1) {
        println!("    Rebalanced from {:.1}%", total);
    }

    let items = items_from_products(&products);
    println!("\n[2] Items (sorted), total weight {:.1}:", total_weight(&items));
    for (i, item) in items.iter().take(10).enumerate() {
        println!("    [{}] '{}' - {:.1}%", i, item.name, item.weight);
    }

    let config = LayoutConfig::default();
    let layout = compute_layout(&items, width, height, &config)?;
    println!("\n[3] Layout computed: {} boxes in {:.0}x{:.0}", layout.boxes.len(), width, height);

    for (i, b) in layout.boxes.iter().enumerate() {
        let cell = b.cell;
        let ratio = cell.width.max(cell.height) / cell.width.min(cell.height).max(1e-9);
        println!(
            "    [{}] '{}' - cell {:.1}x{:.1} ({:.0}px², ratio {:.2}) at ({:.1}, {:.1}) - box {:.1}x{:.1}",
            i,
            b.item.name,
            cell.width,
            cell.height,
            cell.area(),
            ratio,
            cell.x,
            cell.y,
            b.width,
            b.height
        );
    }

    println!("\n[4] Checking for anomalies:");
    let cell_area: f64 = layout.boxes.iter().map(|b| b.cell.area()).sum();
    let container_area = width * height;
    println!("    Total cell area: {:.0}px²", cell_area);
    println!("    Container area:  {:.0}px²", container_area);
    println!("    Coverage: {:.3}%", cell_area / container_area * 100.0);

    let mut overlaps = 0;
    for (i, a) in layout.boxes.iter().enumerate() {
        for b in &layout.boxes[i + 1..] {
            if a.rect().overlap_area(&b.rect()) > 0.0 {
                overlaps += 1;
            }
        }
    }
    println!("    Overlapping box pairs: {}", overlaps);

    let rendered = present(&layout, &PresentationConfig::default());
    println!("\n[5] Presentation:");
    for r in &rendered {
        println!(
            "    '{}' -> {:?} {} | font {:.1}/{:.1} | label '{}'",
            r.item.name,
            r.band,
            r.fill.to_hex(),
            r.fonts.name,
            r.fonts.percentage,
            r.label
        );
    }
    let truncated = rendered.iter().filter(|r| r.label != r.item.name.as_str()).count();
    println!("\n[6] Truncated labels: {} (out of {})", truncated, rendered.len());

    Ok(())
}
