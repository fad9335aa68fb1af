use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{check_param, Result};
use crate::frame::Frame;

/// Fixed 3-tap binomial kernel used for 3x3 Gaussian smoothing.
pub const GAUSSIAN_3X3_KERNEL: [f32; 3] = [0.25, 0.5, 0.25];

/// Apply Gaussian blur to every channel of a frame.
pub fn gaussian_blur(frame: &Frame, sigma: f64) -> Result<Frame> {
    check_param("sigma", sigma, 1e-3, 100.0)?;
    let [r, g, b] = frame.planes();
    Frame::from_planes(
        &gaussian_blur_array(&r, sigma as f32),
        &gaussian_blur_array(&g, sigma as f32),
        &gaussian_blur_array(&b, sigma as f32),
    )
}

/// Apply Gaussian blur to a raw array using separable 1D convolution.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = make_gaussian_kernel(sigma);
    convolve_separable(data, &kernel)
}

/// 3x3 Gaussian smoothing with the [1, 2, 1] / 4 kernel.
pub fn gaussian_blur_3x3(data: &Array2<f32>) -> Array2<f32> {
    convolve_separable(data, &GAUSSIAN_3X3_KERNEL)
}

fn convolve_separable(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let row_pass = convolve_rows(data, kernel);
    convolve_cols(&row_pass, kernel)
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil().max(1.0) as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_fn = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_col = (col as isize + ki as isize - radius as isize)
                        .clamp(0, w as isize - 1) as usize;
                    sum += data[[row, src_col]] * kv;
                }
                sum
            })
            .collect()
    };

    collect_rows(h, w, row_fn)
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let row_fn = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let src_row = (row as isize + ki as isize - radius as isize)
                        .clamp(0, h as isize - 1) as usize;
                    sum += data[[src_row, col]] * kv;
                }
                sum
            })
            .collect()
    };

    collect_rows(h, w, row_fn)
}

fn collect_rows<F>(h: usize, w: usize, row_fn: F) -> Array2<f32>
where
    F: Fn(usize) -> Vec<f32> + Sync + Send,
{
    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(&row_fn).collect()
    } else {
        (0..h).map(&row_fn).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
