pub mod adaptive;
pub mod config;
mod auto;
mod manual;
mod types;

pub use auto::{auto_enhance, auto_enhance_with};
pub use config::{AnalysisConfig, AutoEnhanceConfig, RetouchConfig};
pub use manual::{manual_enhance, manual_enhance_observed, ManualParameters};
pub use types::{AutoEnhanceOutput, EnhanceObserver, EnhanceStage, NoOpObserver, ParametersUsed};
