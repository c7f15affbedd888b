use compact_str::CompactString;

/// Errors raised at the normalization boundary, before any strip is cut.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Items are present but their weights sum to zero, so no area can be assigned.
    #[error("degenerate input: {items} item(s) with a total weight of zero")]
    DegenerateInput { items: usize },

    #[error("invalid container geometry: {width}x{height} (both sides must be positive)")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("invalid weight {weight} for '{name}' (weights must be finite and >= 0)")]
    InvalidWeight { name: CompactString, weight: f64 },
}
