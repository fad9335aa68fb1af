use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::luma::{luma, mean_std};
use crate::frame::Frame;
use crate::quality::exposure::{dynamic_range_array, DynamicRange};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contrast {
    pub is_low: bool,
    /// 1%-99% luma span / 255.
    pub range_contrast: f64,
    /// Luma standard deviation / 255.
    pub std_contrast: f64,
    /// Root-mean-square deviation from mean luma / 255.
    pub rms_contrast: f64,
}

/// Measure global contrast; `threshold` applies to `range_contrast`.
pub fn is_low_contrast(frame: &Frame, threshold: f64) -> Contrast {
    let luma = luma(frame);
    let range = dynamic_range_array(&luma);
    contrast_array(&luma, &range, threshold)
}

pub fn contrast_array(luma: &Array2<f32>, range: &DynamicRange, threshold: f64) -> Contrast {
    let range_contrast = range.range_99 as f64 / 255.0;
    let (mean, std) = mean_std(luma);
    let mean_sq = luma
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / luma.len().max(1) as f64;

    Contrast {
        is_low: range_contrast < threshold,
        range_contrast,
        std_contrast: std / 255.0,
        rms_contrast: mean_sq.sqrt() / 255.0,
    }
}
