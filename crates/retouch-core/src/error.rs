use thiserror::Error;

use crate::enhance::EnhanceStage;

#[derive(Error, Debug)]
pub enum RetouchError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("{stage} failed: {reason}")]
    StageFailure { stage: EnhanceStage, reason: String },

    #[error("Aborted before {stage}")]
    Aborted { stage: EnhanceStage },
}

pub type Result<T> = std::result::Result<T, RetouchError>;

/// Reject a parameter that is not finite or falls outside `[min, max]`.
pub(crate) fn check_param(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(RetouchError::InvalidParameter { name, value })
    }
}
