use ndarray::{Array2, Axis};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::Frame;

/// 8-bit luma plane (BT.601), rounded to whole levels like a grayscale decode.
pub fn luma(frame: &Frame) -> Array2<f32> {
    let (h, w) = (frame.height(), frame.width());
    Array2::from_shape_fn((h, w), |(row, col)| {
        let [r, g, b] = frame.pixel(row, col);
        luma_of(r, g, b)
    })
}

pub fn luma_of(r: u8, g: u8, b: u8) -> f32 {
    (LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32).round()
}

/// Mean of each channel as (r, g, b).
pub fn channel_means(frame: &Frame) -> (f64, f64, f64) {
    let n = frame.pixel_count() as f64;
    let mean_of = |c: usize| {
        frame
            .data()
            .index_axis(Axis(2), c)
            .iter()
            .map(|&v| v as f64)
            .sum::<f64>()
            / n
    };
    (mean_of(0), mean_of(1), mean_of(2))
}

/// Population mean and standard deviation of a plane.
pub fn mean_std(data: &Array2<f32>) -> (f64, f64) {
    let n = data.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n as f64;
    let var = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;
    (mean, var.sqrt())
}
