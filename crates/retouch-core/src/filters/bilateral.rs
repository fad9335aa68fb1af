use serde::{Deserialize, Serialize};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{check_param, Result, RetouchError};
use crate::filters::{build_rows, clamp_index};
use crate::frame::Frame;

/// Largest possible L1 distance between two 8-bit RGB pixels.
const MAX_COLOR_DISTANCE: usize = 255 * COLOR_CHANNEL_COUNT;

/// Parameters for the edge-preserving bilateral filter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BilateralParams {
    /// Neighborhood diameter in pixels.
    pub diameter: usize,
    /// Range sigma over the summed absolute RGB difference.
    pub sigma_color: f64,
    /// Spatial sigma in pixels.
    pub sigma_space: f64,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 9,
            sigma_color: 60.0,
            sigma_space: 3.0,
        }
    }
}

/// Bilateral filter over RGB.
///
/// Each output pixel is a weighted mean of the pixels in a circular window of
/// `diameter`. Weights combine a spatial Gaussian on distance and a range
/// Gaussian on the L1 color difference to the center pixel, so strong edges
/// are preserved while flat regions are smoothed.
pub fn bilateral_filter(frame: &Frame, params: &BilateralParams) -> Result<Frame> {
    if params.diameter == 0 {
        return Err(RetouchError::InvalidParameter {
            name: "diameter",
            value: 0.0,
        });
    }
    check_param("sigma_color", params.sigma_color, 1e-3, 1e6)?;
    check_param("sigma_space", params.sigma_space, 1e-3, 1e6)?;

    let radius = (params.diameter / 2) as isize;
    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);

    // Window offsets inside the circle with their spatial weights.
    let mut window: Vec<(isize, isize, f32)> = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dy * dy + dx * dx) as f64;
            if r2 <= (radius * radius) as f64 {
                window.push((dy, dx, (r2 * space_coeff).exp() as f32));
            }
        }
    }

    let color_weight: Vec<f32> = (0..=MAX_COLOR_DISTANCE)
        .map(|d| {
            let d = d as f64;
            (d * d * color_coeff).exp() as f32
        })
        .collect();

    let (h, w) = (frame.height(), frame.width());
    build_rows(h, w, |row| {
        let mut out = Vec::with_capacity(w * COLOR_CHANNEL_COUNT);
        for col in 0..w {
            let center = frame.pixel(row, col);
            let mut sum = [0.0f32; 3];
            let mut weight_sum = 0.0f32;

            for &(dy, dx, space_w) in &window {
                let nr = clamp_index(row as isize + dy, h);
                let nc = clamp_index(col as isize + dx, w);
                let px = frame.pixel(nr, nc);
                let dist = (0..COLOR_CHANNEL_COUNT)
                    .map(|c| (px[c] as i32 - center[c] as i32).unsigned_abs() as usize)
                    .sum::<usize>();
                let weight = space_w * color_weight[dist];
                for c in 0..COLOR_CHANNEL_COUNT {
                    sum[c] += px[c] as f32 * weight;
                }
                weight_sum += weight;
            }

            for c in 0..COLOR_CHANNEL_COUNT {
                out.push(crate::frame::to_u8(sum[c] / weight_sum));
            }
        }
        out
    })
}
