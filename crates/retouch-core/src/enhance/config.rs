use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLUR_THRESHOLD, DEFAULT_CAST_THRESHOLD, DEFAULT_CONTRAST_THRESHOLD,
    DEFAULT_DENOISE_THRESHOLD, DEFAULT_HEAVY_DENOISE_THRESHOLD, DEFAULT_SATURATION_THRESHOLD,
};

use super::manual::ManualParameters;

/// Thresholds that turn raw measurements into yes/no quality verdicts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Max pairwise channel-mean difference (0..255) tolerated before a cast is reported.
    pub cast_threshold: f64,
    /// Normalized 1%-99% luma span below which contrast is low.
    pub contrast_threshold: f64,
    /// Mean saturation (0..255) below which a boost is needed.
    pub saturation_threshold: f64,
    /// Laplacian variance below which the frame is blurry.
    pub blur_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cast_threshold: DEFAULT_CAST_THRESHOLD,
            contrast_threshold: DEFAULT_CONTRAST_THRESHOLD,
            saturation_threshold: DEFAULT_SATURATION_THRESHOLD,
            blur_threshold: DEFAULT_BLUR_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoEnhanceConfig {
    /// Noise level above which the frame is denoised.
    pub denoise_threshold: f64,
    /// Noise level above which non-local means replaces the bilateral filter.
    pub heavy_denoise_threshold: f64,
    pub analysis: AnalysisConfig,
}

impl Default for AutoEnhanceConfig {
    fn default() -> Self {
        Self {
            denoise_threshold: DEFAULT_DENOISE_THRESHOLD,
            heavy_denoise_threshold: DEFAULT_HEAVY_DENOISE_THRESHOLD,
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetouchConfig {
    pub auto: AutoEnhanceConfig,
    pub manual: ManualParameters,
}
