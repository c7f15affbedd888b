pub mod parse;
pub mod types;

pub use parse::{parse_payload, rebalance_percentages, ParseError};
pub use types::{DetectedProduct, DetectionResponse};
