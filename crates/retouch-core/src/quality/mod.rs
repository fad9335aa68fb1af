pub mod blur;
pub mod color_cast;
pub mod contrast;
pub mod exposure;
pub mod gradient;
pub mod laplacian;
pub mod noise;
pub mod saturation;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::luma::{luma, mean_std};
use crate::enhance::config::AnalysisConfig;
use crate::error::Result;
use crate::frame::Frame;

pub use blur::{is_blurry, Blur};
pub use color_cast::{has_color_cast, ColorCast};
pub use contrast::{is_low_contrast, Contrast};
pub use exposure::{analyze_brightness, analyze_dynamic_range, DynamicRange};
pub use noise::estimate_noise;
pub use saturation::{needs_saturation_boost, Saturation};

/// Everything the automatic pipeline knows about a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub noise_std: f64,
    pub brightness: f64,
    pub dynamic_range: DynamicRange,
    pub color_cast: ColorCast,
    pub contrast: Contrast,
    pub saturation: Saturation,
    pub blur: Blur,
}

/// Analyze a frame with the default thresholds.
pub fn analyze(frame: &Frame) -> Result<QualityMetrics> {
    analyze_with(frame, &AnalysisConfig::default())
}

/// Analyze a frame. The luma plane is computed once and shared by the
/// noise, exposure, contrast and blur measurements.
pub fn analyze_with(frame: &Frame, config: &AnalysisConfig) -> Result<QualityMetrics> {
    frame.validate()?;

    let luma = luma(frame);
    let noise_std = noise::estimate_noise_array(&luma);
    let brightness = mean_std(&luma).0;
    let dynamic_range = exposure::dynamic_range_array(&luma);
    let contrast = contrast::contrast_array(&luma, &dynamic_range, config.contrast_threshold);
    let blur = blur::blur_array(&luma, config.blur_threshold);
    let color_cast = has_color_cast(frame, config.cast_threshold);
    let saturation = needs_saturation_boost(frame, config.saturation_threshold);

    debug!(
        noise_std,
        brightness,
        range_99 = dynamic_range.range_99,
        cast_severity = color_cast.severity,
        range_contrast = contrast.range_contrast,
        mean_sat = saturation.mean_sat,
        laplacian_var = blur.laplacian_var,
        "Quality analysis"
    );

    Ok(QualityMetrics {
        noise_std,
        brightness,
        dynamic_range,
        color_cast,
        contrast,
        saturation,
        blur,
    })
}
