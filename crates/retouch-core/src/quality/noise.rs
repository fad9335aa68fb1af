use ndarray::{Array2, Zip};

use crate::color::luma::{luma, mean_std};
use crate::filters::gaussian_blur::gaussian_blur_3x3;
use crate::frame::Frame;

/// Estimate sensor noise as the standard deviation of the high-frequency
/// residual: luma minus its 3x3 Gaussian blur. Higher = noisier.
pub fn estimate_noise(frame: &Frame) -> f64 {
    estimate_noise_array(&luma(frame))
}

pub fn estimate_noise_array(luma: &Array2<f32>) -> f64 {
    let blurred = gaussian_blur_3x3(luma);
    let residual = Zip::from(luma)
        .and(&blurred)
        .map_collect(|&orig, &blur| orig - blur.round());
    mean_std(&residual).1
}
