use ndarray::Zip;
use serde::{Deserialize, Serialize};

use crate::error::{check_param, Result};
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::frame::Frame;

/// Parameters for unsharp-mask sharpening.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnsharpParams {
    /// Gaussian blur sigma for the blurred copy.
    pub radius: f64,
    /// Strength in percent: 100 adds the full difference back.
    pub amount: f64,
}

impl Default for UnsharpParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            amount: 100.0,
        }
    }
}

/// Apply unsharp mask sharpening to every channel.
///
/// `out = in + (amount / 100) * (in - blur(in, radius))`, clamped to [0, 255].
pub fn unsharp_mask(frame: &Frame, params: &UnsharpParams) -> Result<Frame> {
    check_param("sharpen_radius", params.radius, 0.05, 50.0)?;
    check_param("sharpen_amount", params.amount, 0.0, 1000.0)?;
    let weight = (params.amount / 100.0) as f32;

    let [r, g, b] = frame.planes().map(|plane| {
        let blurred = gaussian_blur_array(&plane, params.radius as f32);
        Zip::from(&plane)
            .and(&blurred)
            .map_collect(|&orig, &blur| orig + (orig - blur) * weight)
    });

    Frame::from_planes(&r, &g, &b)
}
