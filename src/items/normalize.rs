use super::{total_weight, WeightedItem};
use crate::error::LayoutError;

/// An item with its target area in container pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub item: WeightedItem,
    /// (weight / total weight) * container area
    pub area: f64,
}

/// Check that a container can hold a layout.
pub fn check_geometry(width: f64, height: f64) -> Result<(), LayoutError> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(LayoutError::InvalidGeometry { width, height });
    }
    Ok(())
}

/// Scale item weights into areas that together fill a `width` x `height` container.
///
/// Order is preserved. An empty slice yields an empty result; a non-empty
/// slice whose weights sum to zero has no defined layout and is rejected.
pub fn normalize(
    items: &[WeightedItem],
    width: f64,
    height: f64,
) -> Result<Vec<NormalizedItem>, LayoutError> {
    check_geometry(width, height)?;

    if let Some(bad) = items
        .iter()
        .find(|item| !item.weight.is_finite() || item.weight < 0.0)
    {
        return Err(LayoutError::InvalidWeight {
            name: bad.name.clone(),
            weight: bad.weight,
        });
    }

    if items.is_empty() {
        return Ok(Vec::new());
    }

    let total = total_weight(items);
    if total <= 0.0 {
        return Err(LayoutError::DegenerateInput { items: items.len() });
    }

    let container_area = width * height;
    Ok(items
        .iter()
        .map(|item| NormalizedItem {
            item: item.clone(),
            area: item.weight / total * container_area,
        })
        .collect())
}
