use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::luma::{luma, mean_std};
use crate::consts::HISTOGRAM_BINS;
use crate::frame::Frame;

/// Luma histogram percentile bounds (bin indices 0..255).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicRange {
    pub low_1: usize,
    pub high_99: usize,
    pub low_5: usize,
    pub high_95: usize,
    /// `high_95 - low_5`
    pub range_95: usize,
    /// `high_99 - low_1`
    pub range_99: usize,
}

/// Mean luma in [0, 255].
pub fn analyze_brightness(frame: &Frame) -> f64 {
    mean_std(&luma(frame)).0
}

/// 256-bin histogram of an 8-bit plane.
pub fn histogram(data: &Array2<f32>) -> [u64; HISTOGRAM_BINS] {
    let mut hist = [0u64; HISTOGRAM_BINS];
    for &v in data.iter() {
        hist[v.clamp(0.0, 255.0) as usize] += 1;
    }
    hist
}

/// Normalized cumulative distribution of a histogram.
pub fn cumulative_distribution(hist: &[u64; HISTOGRAM_BINS]) -> [f64; HISTOGRAM_BINS] {
    let total = hist.iter().sum::<u64>().max(1) as f64;
    let mut cdf = [0.0f64; HISTOGRAM_BINS];
    let mut acc = 0.0;
    for (i, &count) in hist.iter().enumerate() {
        acc += count as f64 / total;
        cdf[i] = acc;
    }
    cdf
}

/// First bin whose cumulative probability reaches `p`.
///
/// Flat stretches of the distribution resolve to their lowest index.
pub fn percentile_bin(cdf: &[f64; HISTOGRAM_BINS], p: f64) -> usize {
    cdf.partition_point(|&c| c < p).min(HISTOGRAM_BINS - 1)
}

/// Locate the 1/5/95/99 percent luma bounds.
pub fn analyze_dynamic_range(frame: &Frame) -> DynamicRange {
    dynamic_range_array(&luma(frame))
}

pub fn dynamic_range_array(luma: &Array2<f32>) -> DynamicRange {
    let cdf = cumulative_distribution(&histogram(luma));
    let low_1 = percentile_bin(&cdf, 0.01);
    let high_99 = percentile_bin(&cdf, 0.99);
    let low_5 = percentile_bin(&cdf, 0.05);
    let high_95 = percentile_bin(&cdf, 0.95);

    DynamicRange {
        low_1,
        high_99,
        low_5,
        high_95,
        range_95: high_95.saturating_sub(low_5),
        range_99: high_99.saturating_sub(low_1),
    }
}
