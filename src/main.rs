use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use shelfview_rs::app::AnalysisSession;
use shelfview_rs::detection::parse_payload;
use shelfview_rs::present::tooltip::format_percentage;
use shelfview_rs::{Config, ShelfReport};

/// Lay out a shelf detection as a share treemap.
#[derive(Parser, Debug)]
#[command(name = "shelfview-rs")]
#[command(about = "Squarified shelf-share treemap for a detection payload")]
#[command(version)]
struct Args {
    /// Detection payload (JSON file, or - for stdin)
    payload: String,

    /// Container width in px
    #[arg(short = 'W', long, default_value_t = 1200.0)]
    width: f64,

    /// Container height in px
    #[arg(short = 'H', long, default_value_t = 700.0)]
    height: f64,

    /// JSON config file overriding the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Also list products grouped by brand
    #[arg(short, long)]
    brands: bool,
}

fn read_payload(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading payload from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading payload {source}"))
    }
}

fn print_report(report: &ShelfReport, brands: bool) {
    let coverage = &report.coverage;
    println!(
        "Total coverage: {}{}",
        format_percentage(coverage.total),
        if coverage.balanced { " ✓" } else { " (should be 100%)" }
    );
    if let Some(total) = report.rebalanced_from {
        println!("  (rescaled from {})", format_percentage(total));
    }

    if report.is_empty() {
        println!("No products detected in the image.");
        return;
    }

    println!(
        "\n{} boxes in {:.0}x{:.0}:",
        report.boxes.len(),
        report.container.width,
        report.container.height
    );
    for b in &report.boxes {
        println!(
            "  [{:>2}] {:<24} {:>7}  {:>6.1}x{:<6.1} at ({:>6.1}, {:>6.1})  {:?} {} font {:.1}/{:.1}",
            b.rank,
            b.label,
            b.tooltip.percentage_display,
            b.width,
            b.height,
            b.x,
            b.y,
            b.band,
            b.fill.to_hex(),
            b.fonts.name,
            b.fonts.percentage
        );
        if b.label != b.item.name.as_str() {
            println!("       {}", b.tooltip.line());
        }
    }

    if brands {
        println!("\nBy brand:");
        for group in &report.brands {
            println!("  {:<20} {:>7}", group.brand, format_percentage(group.total));
            for item in &group.items {
                println!("      {:<28} {:>7}", item.name, format_percentage(item.weight));
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shelfview_rs=warn".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let text = read_payload(&args.payload)?;
    let products = parse_payload(&text).context("parsing detection payload")?;
    tracing::info!("Read {} products from {}", products.len(), args.payload);

    let mut session = AnalysisSession::new(config, args.width, args.height);
    session.start(Instant::now())?;
    let report = session.complete(&products)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report, args.brands);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_1200_by_700() {
        let args = Args::try_parse_from(["shelfview-rs", "shelf.json"]).unwrap();
        assert_eq!(args.payload, "shelf.json");
        assert_eq!((args.width, args.height), (1200.0, 700.0));
        assert!(args.config.is_none());
        assert!(!args.json && !args.brands);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "shelfview-rs", "-", "--width", "800", "-H", "600", "--config", "cfg.json", "--json", "-b",
        ])
        .unwrap();
        assert_eq!(args.payload, "-");
        assert_eq!((args.width, args.height), (800.0, 600.0));
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert!(args.json && args.brands);
    }

    #[test]
    fn payload_is_required_and_sizes_are_numbers() {
        assert!(Args::try_parse_from(["shelfview-rs"]).is_err());
        assert!(Args::try_parse_from(["shelfview-rs", "a.json", "--width", "wide"]).is_err());
    }
}
