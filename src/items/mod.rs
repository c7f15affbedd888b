pub mod brands;
pub mod group;
pub mod normalize;

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::detection::DetectedProduct;

/// A named weight: the unit the layout engine works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub name: CompactString,
    /// Share of the shelf, usually a percentage (>= 0)
    pub weight: f64,
}

impl WeightedItem {
    pub fn new(name: &str, weight: f64) -> Self {
        Self {
            name: CompactString::new(name),
            weight,
        }
    }
}

impl From<&DetectedProduct> for WeightedItem {
    fn from(product: &DetectedProduct) -> Self {
        Self {
            name: product.product_name.clone(),
            weight: product.percentage,
        }
    }
}

/// Build items from detected products, sorted by weight descending.
pub fn items_from_products(products: &[DetectedProduct]) -> Vec<WeightedItem> {
    let mut items: Vec<WeightedItem> = products.iter().map(WeightedItem::from).collect();
    sort_by_weight(&mut items);
    items
}

/// Sort items by weight descending. Stable, so equal weights keep input order.
/// The layout expects this order.
pub fn sort_by_weight(items: &mut [WeightedItem]) {
    items.sort_by(|a, b| b.weight.total_cmp(&a.weight));
}

pub fn total_weight(items: &[WeightedItem]) -> f64 {
    items.iter().map(|item| item.weight).sum()
}

/// Total shelf coverage of one detection and whether it adds up to 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coverage {
    pub total: f64,
    pub balanced: bool,
}

impl Coverage {
    pub fn of(items: &[WeightedItem], tolerance: f64) -> Self {
        let total = total_weight(items);
        Self {
            total,
            balanced: (total - 100.0).abs() <= tolerance,
        }
    }

    /// Non-fatal warning for the display layer when the total is off.
    pub fn warning(&self) -> Option<ImbalancedTotal> {
        if self.balanced {
            None
        } else {
            Some(ImbalancedTotal { total: self.total })
        }
    }
}

/// Informational only: the weights do not sum to (roughly) 100%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImbalancedTotal {
    pub total: f64,
}

impl fmt::Display for ImbalancedTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "total coverage is {:.1}% (should be 100%)", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_become_sorted_items() {
        let products = vec![
            DetectedProduct::new("Small", 10.0),
            DetectedProduct::new("Big", 70.0),
            DetectedProduct::new("Mid", 20.0),
        ];
        let items = items_from_products(&products);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Big", "Mid", "Small"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut items = vec![
            WeightedItem::new("first", 5.0),
            WeightedItem::new("second", 5.0),
            WeightedItem::new("top", 9.0),
        ];
        sort_by_weight(&mut items);
        assert_eq!(items[1].name, "first");
        assert_eq!(items[2].name, "second");
    }

    #[test]
    fn coverage_tolerance() {
        let items = vec![WeightedItem::new("A", 60.0), WeightedItem::new("B", 39.6)];
        let coverage = Coverage::of(&items, 0.5);
        assert!(coverage.balanced);
        assert!(coverage.warning().is_none());

        let items = vec![WeightedItem::new("A", 60.0), WeightedItem::new("B", 30.0)];
        let warning = Coverage::of(&items, 0.5).warning().unwrap();
        assert_eq!(warning.total, 90.0);
        assert_eq!(warning.to_string(), "total coverage is 90.0% (should be 100%)");
    }
}
