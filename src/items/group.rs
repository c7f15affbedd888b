use std::collections::BTreeMap;

use serde::Serialize;

use super::brands::classify_brand;
use super::WeightedItem;

/// All items of one brand with their summed weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandGroup {
    pub brand: String,
    pub items: Vec<WeightedItem>,
    pub total: f64,
}

/// Group items by brand label. Groups come back sorted by label; items keep
/// their input order within a group.
pub fn group_by_brand(items: &[WeightedItem]) -> Vec<BrandGroup> {
    let mut groups: BTreeMap<String, BrandGroup> = BTreeMap::new();

    for item in items {
        let brand = classify_brand(&item.name);
        let group = groups.entry(brand.clone()).or_insert_with(|| BrandGroup {
            brand,
            items: Vec::new(),
            total: 0.0,
        });
        group.total += item.weight;
        group.items.push(item.clone());
    }

    tracing::debug!("Grouped {} items into {} brands", items.len(), groups.len());
    groups.into_values().collect()
}
