use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::color::lab::LabConverter;
use crate::consts::{COLOR_CHANNEL_COUNT, HISTOGRAM_BINS, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{check_param, Result, RetouchError};
use crate::filters::{build_rows, for_each_row};
use crate::frame::{to_u8, Frame};

/// Parameters for contrast-limited adaptive histogram equalization.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaheParams {
    /// Histogram clip limit relative to a uniform distribution. 0 disables clipping.
    pub clip_limit: f64,
    /// Number of tiles along each axis.
    pub tile_grid: usize,
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: 8,
        }
    }
}

/// Start/end (exclusive) of tile `i` when `len` is split into `n` tiles.
fn tile_bounds(i: usize, n: usize, len: usize) -> (usize, usize) {
    (i * len / n, (i + 1) * len / n)
}

/// Mapping for one tile: clip the histogram, spread the excess evenly over
/// all bins, then scale the cumulative distribution to [0, 255].
fn tile_lut(
    data: &Array2<u8>,
    rows: (usize, usize),
    cols: (usize, usize),
    clip_limit: f64,
) -> [u8; 256] {
    let mut hist = [0.0f64; HISTOGRAM_BINS];
    for row in rows.0..rows.1 {
        for col in cols.0..cols.1 {
            hist[data[[row, col]] as usize] += 1.0;
        }
    }
    let area = ((rows.1 - rows.0) * (cols.1 - cols.0)) as f64;

    if clip_limit > 0.0 {
        let clip = (clip_limit * area / HISTOGRAM_BINS as f64).max(1.0);
        let mut excess = 0.0;
        for v in hist.iter_mut() {
            if *v > clip {
                excess += *v - clip;
                *v = clip;
            }
        }
        let share = excess / HISTOGRAM_BINS as f64;
        for v in hist.iter_mut() {
            *v += share;
        }
    }

    let mut lut = [0u8; 256];
    let mut cdf = 0.0;
    let scale = 255.0 / area;
    for (i, v) in hist.iter().enumerate() {
        cdf += v;
        lut[i] = (cdf * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Interpolation position of `p` between tile centers: (lower tile, upper tile, weight of upper).
fn interp_position(p: usize, n: usize, len: usize) -> (usize, usize, f32) {
    let center = |i: usize| {
        let (a, b) = tile_bounds(i, n, len);
        (a + b) as f32 / 2.0 - 0.5
    };
    let pf = p as f32;
    if n == 1 || pf <= center(0) {
        return (0, 0, 0.0);
    }
    if pf >= center(n - 1) {
        return (n - 1, n - 1, 0.0);
    }
    let mut lo = 0;
    while lo + 1 < n && center(lo + 1) <= pf {
        lo += 1;
    }
    let hi = (lo + 1).min(n - 1);
    let span = center(hi) - center(lo);
    let weight = if span > 0.0 { (pf - center(lo)) / span } else { 0.0 };
    (lo, hi, weight)
}

/// CLAHE on an 8-bit plane. Each pixel is mapped through the four nearest
/// tile lookup tables and blended bilinearly.
pub fn clahe_array(data: &Array2<u8>, params: &ClaheParams) -> Array2<u8> {
    let (h, w) = data.dim();
    let ny = params.tile_grid.clamp(1, h);
    let nx = params.tile_grid.clamp(1, w);

    let luts: Vec<[u8; 256]> = (0..ny * nx)
        .map(|t| {
            let (ty, tx) = (t / nx, t % nx);
            tile_lut(
                data,
                tile_bounds(ty, ny, h),
                tile_bounds(tx, nx, w),
                params.clip_limit,
            )
        })
        .collect();

    let col_pos: Vec<(usize, usize, f32)> =
        (0..w).map(|col| interp_position(col, nx, w)).collect();

    let mut out = Array2::<u8>::zeros((h, w));
    let Some(buf) = out.as_slice_mut() else {
        return out;
    };
    for_each_row(buf, w, h * w >= PARALLEL_PIXEL_THRESHOLD, |row, dst| {
        let (y0, y1, wy) = interp_position(row, ny, h);
        for (col, (px, &(x0, x1, wx))) in dst.iter_mut().zip(&col_pos).enumerate() {
            let v = data[[row, col]] as usize;
            let blend = |ty: usize| {
                luts[ty * nx + x0][v] as f32 * (1.0 - wx) + luts[ty * nx + x1][v] as f32 * wx
            };
            let (top, bottom) = (blend(y0), blend(y1));
            *px = to_u8(top * (1.0 - wy) + bottom * wy);
        }
    });
    out
}

/// Apply CLAHE to the L* channel of the frame in CIE L*a*b*; a* and b* are untouched.
pub fn enhance_contrast_clahe(frame: &Frame, params: &ClaheParams) -> Result<Frame> {
    check_param("clip_limit", params.clip_limit, 0.0, 1000.0)?;
    if params.tile_grid == 0 {
        return Err(RetouchError::InvalidParameter {
            name: "tile_grid",
            value: 0.0,
        });
    }

    let converter = LabConverter::new();
    let (h, w) = (frame.height(), frame.width());
    let lab: Vec<[f32; 3]> = (0..h * w)
        .map(|i| converter.rgb_to_lab(frame.pixel(i / w, i % w)))
        .collect();

    let lightness = Array2::from_shape_fn((h, w), |(row, col)| {
        to_u8(lab[row * w + col][0] * 255.0 / 100.0)
    });
    let equalized = clahe_array(&lightness, params);

    build_rows(h, w, |row| {
        let mut out = Vec::with_capacity(w * COLOR_CHANNEL_COUNT);
        for col in 0..w {
            let [_, a, b] = lab[row * w + col];
            let l = equalized[[row, col]] as f32 * 100.0 / 255.0;
            let rgb = converter.lab_to_rgb([l, a, b]);
            out.extend(rgb.iter().map(|&v| to_u8(v)));
        }
        out
    })
}
