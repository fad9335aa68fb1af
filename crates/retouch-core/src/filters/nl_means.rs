use serde::{Deserialize, Serialize};

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{check_param, Result, RetouchError};
use crate::filters::{build_rows, clamp_index, for_each_row};
use crate::frame::{to_u8, Frame};

/// Parameters for non-local means denoising.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NlMeansParams {
    /// Filter strength `h`; larger values average more aggressively.
    pub strength: f64,
    /// Side of the square patch compared between pixels (odd).
    pub template_window: usize,
    /// Side of the square search area around each pixel (odd).
    pub search_window: usize,
    /// Expected noise standard deviation, discounted from patch distances.
    #[serde(default)]
    pub sigma: f64,
}

impl Default for NlMeansParams {
    fn default() -> Self {
        Self {
            strength: 10.0,
            template_window: 7,
            search_window: 21,
            sigma: 0.0,
        }
    }
}

/// Non-local means denoising over RGB patches.
///
/// For each pixel, every candidate in the search window is weighted by
/// `exp(-max(d - 2 sigma^2, 0) / h^2)`, where `d` is the mean squared RGB
/// difference between the two surrounding patches. Patch distances for one
/// search offset are computed for the whole frame at once from an integral
/// image, so the cost does not grow with the template size.
pub fn nl_means_denoise(frame: &Frame, params: &NlMeansParams) -> Result<Frame> {
    check_param("strength", params.strength, 1e-3, 1e4)?;
    check_param("sigma", params.sigma, 0.0, 1e4)?;
    for (name, size) in [
        ("template_window", params.template_window),
        ("search_window", params.search_window),
    ] {
        if size == 0 || size % 2 == 0 {
            return Err(RetouchError::InvalidParameter {
                name,
                value: size as f64,
            });
        }
    }

    let (h, w) = (frame.height(), frame.width());
    let t = (params.template_window / 2) as isize;
    let s = (params.search_window / 2) as isize;
    let parallel = h * w >= PARALLEL_PIXEL_THRESHOLD;

    let patch_len = (params.template_window * params.template_window * COLOR_CHANNEL_COUNT) as f64;
    let inv_h2 = 1.0 / (params.strength * params.strength);
    let noise_floor = 2.0 * params.sigma * params.sigma;

    // Frame padded by `t + s` on every side with replicated borders, so every
    // patch and partner lookup below is a plain index.
    let pad = t + s;
    let pw = w + 2 * pad as usize;
    let padded = pad_replicate(frame, pad as usize);
    let at = |y: isize, x: isize| padded[(y + pad) as usize * pw + (x + pad) as usize];

    // Integral image covers the frame extended by `t` on each side, plus a
    // leading zero row/column.
    let ih = h + 2 * t as usize + 1;
    let iw = w + 2 * t as usize + 1;
    let mut integral = vec![0.0f64; ih * iw];

    // Per pixel: weighted R, G, B sums and the weight total.
    let mut acc = vec![0.0f64; h * w * 4];

    for dy in -s..=s {
        for dx in -s..=s {
            // Squared RGB differences between each (extended) position and its
            // offset partner, written into rows 1.. / cols 1.. of `integral`.
            for_each_row(&mut integral, iw, parallel, |irow, out| {
                if irow == 0 {
                    out.fill(0.0);
                    return;
                }
                let y = irow as isize - 1 - t;
                out[0] = 0.0;
                for icol in 1..iw {
                    let x = icol as isize - 1 - t;
                    let (a, b) = (at(y, x), at(y + dy, x + dx));
                    let mut d = 0.0f64;
                    for c in 0..COLOR_CHANNEL_COUNT {
                        let diff = a[c] as f64 - b[c] as f64;
                        d += diff * diff;
                    }
                    out[icol] = d;
                }
                for icol in 1..iw {
                    out[icol] += out[icol - 1];
                }
            });
            for irow in 1..ih {
                let (prev, cur) = integral.split_at_mut(irow * iw);
                let prev = &prev[(irow - 1) * iw..];
                for icol in 0..iw {
                    cur[icol] += prev[icol];
                }
            }

            let integral = &integral;
            let side = 2 * t as usize + 1;
            let box_sum = |y: usize, x: usize| -> f64 {
                let (y1, x1) = (y + side, x + side);
                integral[y1 * iw + x1] - integral[y * iw + x1] - integral[y1 * iw + x]
                    + integral[y * iw + x]
            };

            for_each_row(&mut acc, w * 4, parallel, |row, out| {
                for (col, cell) in out.chunks_exact_mut(4).enumerate() {
                    let dist = box_sum(row, col) / patch_len;
                    let weight = (-(dist - noise_floor).max(0.0) * inv_h2).exp();
                    let px = at(row as isize + dy, col as isize + dx);
                    for c in 0..COLOR_CHANNEL_COUNT {
                        cell[c] += px[c] as f64 * weight;
                    }
                    cell[3] += weight;
                }
            });
        }
    }

    build_rows(h, w, |row| {
        let mut out = Vec::with_capacity(w * COLOR_CHANNEL_COUNT);
        for col in 0..w {
            let cell = &acc[(row * w + col) * 4..(row * w + col) * 4 + 4];
            for c in 0..COLOR_CHANNEL_COUNT {
                out.push(to_u8((cell[c] / cell[3]) as f32));
            }
        }
        out
    })
}

/// Row-major copy of the frame with `pad` replicated pixels on every side.
fn pad_replicate(frame: &Frame, pad: usize) -> Vec<[u8; 3]> {
    let (h, w) = (frame.height(), frame.width());
    let (ph, pw) = (h + 2 * pad, w + 2 * pad);
    let mut out = Vec::with_capacity(ph * pw);
    for py in 0..ph {
        let y = clamp_index(py as isize - pad as isize, h);
        for px in 0..pw {
            out.push(frame.pixel(y, clamp_index(px as isize - pad as isize, w)));
        }
    }
    out
}
