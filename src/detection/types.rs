use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One product record as reported by the detection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedProduct {
    /// Display name, e.g. "Samsung Galaxy A54"
    pub product_name: CompactString,
    /// Share of the visible shelf space, expected in 0..=100
    #[serde(default)]
    pub percentage: f64,
}

impl DetectedProduct {
    pub fn new(product_name: &str, percentage: f64) -> Self {
        Self {
            product_name: CompactString::new(product_name),
            percentage,
        }
    }
}

/// Full response body of a detection request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub products: Vec<DetectedProduct>,
    #[serde(default)]
    pub upload_time: Option<String>,
}
