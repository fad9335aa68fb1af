use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;
use crate::quality::QualityMetrics;

use super::manual::ManualParameters;

/// Enhancement stage, used for reporting and fallback diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhanceStage {
    Gamma,
    Denoise,
    WhiteBalance,
    Contrast,
    Saturation,
    Sharpen,
}

impl EnhanceStage {
    /// Stage order of the automatic pipeline.
    pub const AUTO_ORDER: [EnhanceStage; 6] = [
        Self::Gamma,
        Self::Denoise,
        Self::WhiteBalance,
        Self::Contrast,
        Self::Saturation,
        Self::Sharpen,
    ];

    /// Stage order of manual enhancement.
    pub const MANUAL_ORDER: [EnhanceStage; 6] = [
        Self::Denoise,
        Self::WhiteBalance,
        Self::Gamma,
        Self::Contrast,
        Self::Saturation,
        Self::Sharpen,
    ];
}

impl std::fmt::Display for EnhanceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gamma => write!(f, "Gamma correction"),
            Self::Denoise => write!(f, "Denoising"),
            Self::WhiteBalance => write!(f, "White balance"),
            Self::Contrast => write!(f, "Contrast enhancement"),
            Self::Saturation => write!(f, "Saturation boost"),
            Self::Sharpen => write!(f, "Sharpening"),
        }
    }
}

/// Audit record of an automatic run.
///
/// Keys match [`ManualParameters`] so the record can seed manual controls.
/// Fields are `None` when the stage that sets them did not run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParametersUsed {
    /// Stages that changed the frame, in execution order.
    pub stages: Vec<EnhanceStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bilateral_diameter: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma_space: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma_color: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlm_strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlm_template_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlm_search_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_grid: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpen_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpen_amount: Option<f64>,
    /// Set when the run failed and the original frame was returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl ParametersUsed {
    /// Record of a run that returned the original frame.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            fallback: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Manual parameters reproducing the applied corrections where the manual
    /// pipeline can express them. Unset fields keep their manual defaults.
    pub fn to_manual(&self) -> ManualParameters {
        let base = ManualParameters::default();
        ManualParameters {
            sigma_space: self.sigma_space.unwrap_or(base.sigma_space),
            sigma_color: self.sigma_color.unwrap_or(base.sigma_color),
            r_gain: self.r_gain.unwrap_or(base.r_gain),
            g_gain: self.g_gain.unwrap_or(base.g_gain),
            b_gain: self.b_gain.unwrap_or(base.b_gain),
            gamma: self.gamma.unwrap_or(base.gamma),
            clip_limit: self.clip_limit.unwrap_or(base.clip_limit),
            tile_grid: self.tile_grid.unwrap_or(base.tile_grid),
            saturation: self.saturation.unwrap_or(base.saturation),
            sharpen_radius: self.sharpen_radius.unwrap_or(base.sharpen_radius),
            sharpen_amount: self.sharpen_amount.unwrap_or(base.sharpen_amount),
        }
    }
}

/// Result of [`auto_enhance`](super::auto_enhance).
#[derive(Clone, Debug)]
pub struct AutoEnhanceOutput {
    pub frame: Frame,
    pub parameters: ParametersUsed,
    pub metrics: QualityMetrics,
}

/// Thread-safe observer for enhancement runs.
///
/// Implementors can use this to drive progress bars or collect diagnostics.
/// All methods have default no-op implementations.
pub trait EnhanceObserver: Send + Sync {
    /// Analysis finished (automatic mode only).
    fn on_analysis(&self, _metrics: &QualityMetrics) {}

    /// A stage is about to be evaluated.
    fn begin_stage(&self, _stage: EnhanceStage) {}

    /// The stage ran and produced a new frame.
    fn stage_applied(&self, _stage: EnhanceStage) {}

    /// The stage was not needed.
    fn stage_skipped(&self, _stage: EnhanceStage) {}

    /// Called before every stage, whether or not it will run. Returning an
    /// error stops the run.
    fn checkpoint(&self, _stage: EnhanceStage) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
pub struct NoOpObserver;
impl EnhanceObserver for NoOpObserver {}
