use serde_json::Value;

use super::types::{DetectedProduct, DetectionResponse};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is neither a product list nor a detection response (found {found})")]
    UnexpectedShape { found: &'static str },

    #[error("detection service reported an unsuccessful analysis")]
    Unsuccessful,
}

/// Parse a detection payload.
///
/// Accepts a bare JSON array of products, a full detection response object,
/// or raw model output wrapped in a fenced code block.
pub fn parse_payload(text: &str) -> Result<Vec<DetectedProduct>, ParseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(_) => {
            let products: Vec<DetectedProduct> = serde_json::from_value(value)?;
            tracing::debug!("Parsed product list with {} entries", products.len());
            Ok(products)
        }
        Value::Object(_) if value.get("products").is_some() => {
            let response: DetectionResponse = serde_json::from_value(value)?;
            if !response.success {
                return Err(ParseError::Unsuccessful);
            }
            tracing::debug!(
                "Parsed detection response for {:?} with {} products",
                response.image_name,
                response.products.len()
            );
            Ok(response.products)
        }
        other => Err(ParseError::UnexpectedShape {
            found: value_kind(&other),
        }),
    }
}

/// Remove a surrounding ```json ... ``` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```json") {
        body = rest;
    } else if let Some(rest) = body.strip_prefix("```") {
        body = rest;
    }
    if let Some(rest) = body.strip_suffix("```") {
        body = rest;
    }
    body.trim()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without 'products'",
    }
}

/// Rescale percentages so they sum to 100 when the total is off by more than
/// `tolerance` points. Each rescaled value is rounded to one decimal place.
///
/// Returns the original total when a rescale happened. A zero total is left as is.
pub fn rebalance_percentages(products: &mut [DetectedProduct], tolerance: f64) -> Option<f64> {
    if products.is_empty() {
        return None;
    }

    let total: f64 = products.iter().map(|p| p.percentage).sum();
    if total == 0.0 || !total.is_finite() || (total - 100.0).abs() <= tolerance {
        return None;
    }

    let factor = 100.0 / total;
    for product in products.iter_mut() {
        product.percentage = (product.percentage * factor * 10.0).round() / 10.0;
    }
    tracing::info!("Rebalanced percentages from {:.1}% to 100%", total);
    Some(total)
}
