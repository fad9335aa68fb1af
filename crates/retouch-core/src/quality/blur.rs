use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::luma::luma;
use crate::frame::Frame;
use crate::quality::gradient::mean_gradient_array;
use crate::quality::laplacian::laplacian_variance_array;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blur {
    pub is_blurry: bool,
    pub laplacian_var: f64,
    pub mean_gradient: f64,
    /// `1 - laplacian_var / threshold`, clamped to [0, 1].
    pub severity: f64,
}

/// Detect blur from the Laplacian variance of luma.
pub fn is_blurry(frame: &Frame, threshold: f64) -> Blur {
    blur_array(&luma(frame), threshold)
}

pub fn blur_array(luma: &Array2<f32>, threshold: f64) -> Blur {
    let laplacian_var = laplacian_variance_array(luma);
    let severity = if threshold > 0.0 {
        (1.0 - laplacian_var / threshold).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Blur {
        is_blurry: laplacian_var < threshold,
        laplacian_var,
        mean_gradient: mean_gradient_array(luma),
        severity,
    }
}
