pub mod color;
pub mod consts;
pub mod enhance;
pub mod error;
pub mod filters;
pub mod frame;
pub mod quality;

pub use enhance::{auto_enhance, auto_enhance_with, manual_enhance};
pub use error::{Result, RetouchError};
pub use frame::Frame;
pub use quality::{analyze, analyze_with, QualityMetrics};
