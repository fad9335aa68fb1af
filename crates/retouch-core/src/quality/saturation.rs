use serde::{Deserialize, Serialize};

use crate::color::hsv::saturation_plane;
use crate::color::luma::mean_std;
use crate::consts::LOW_SATURATION_LEVEL;
use crate::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Saturation {
    pub needs_boost: bool,
    /// Mean HSV saturation, 0..255.
    pub mean_sat: f64,
    pub std_sat: f64,
    /// Fraction of pixels with saturation below 50.
    pub low_sat_ratio: f64,
}

/// Measure saturation; a boost is needed when the mean is below `threshold` (0..255).
pub fn needs_saturation_boost(frame: &Frame, threshold: f64) -> Saturation {
    let sat = saturation_plane(frame);
    let (mean_sat, std_sat) = mean_std(&sat);
    let low = sat
        .iter()
        .filter(|&&s| s < LOW_SATURATION_LEVEL as f32)
        .count();

    Saturation {
        needs_boost: mean_sat < threshold,
        mean_sat,
        std_sat,
        low_sat_ratio: low as f64 / sat.len() as f64,
    }
}
