// Public library interface for shelfview-rs
// The CLI and the validation tool both drive the pipeline through these modules

pub mod app;
pub mod config;
pub mod detection;
pub mod error;
pub mod items;
pub mod layout;
pub mod present;
pub mod report;

pub use config::Config;
pub use error::LayoutError;
pub use report::{build_report, ShelfReport};
