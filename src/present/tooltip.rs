use serde::Serialize;

use crate::items::brands::classify_brand;
use crate::items::WeightedItem;

/// Information shown when hovering over a box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipInfo {
    /// Full, untruncated product name
    pub name: String,
    pub percentage_display: String,
    pub brand: String,
}

impl TooltipInfo {
    /// One-line form for plain-text renderers.
    pub fn line(&self) -> String {
        format!("{} — {}", self.name, self.percentage_display)
    }
}

pub fn build_tooltip(item: &WeightedItem) -> TooltipInfo {
    TooltipInfo {
        name: item.name.to_string(),
        percentage_display: format_percentage(item.weight),
        brand: classify_brand(&item.name),
    }
}

/// Percentage with one decimal place.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_keeps_full_name_and_one_decimal() {
        let tip = build_tooltip(&WeightedItem::new("Samsung Galaxy A54 5G (Awesome Graphite)", 12.345));
        assert_eq!(tip.name, "Samsung Galaxy A54 5G (Awesome Graphite)");
        assert_eq!(tip.percentage_display, "12.3%");
        assert_eq!(tip.brand, "Samsung");
        assert_eq!(tip.line(), "Samsung Galaxy A54 5G (Awesome Graphite) — 12.3%");
    }

    #[test]
    fn percentage_formatting() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(100.0), "100.0%");
        assert_eq!(format_percentage(7.26), "7.3%");
    }
}
