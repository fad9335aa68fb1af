pub mod bilateral;
pub mod clahe;
pub mod gaussian_blur;
pub mod levels;
pub mod nl_means;
pub mod saturation;
pub mod unsharp_mask;
pub mod white_balance;

use rayon::prelude::*;

use crate::consts::{COLOR_CHANNEL_COUNT, PARALLEL_PIXEL_THRESHOLD};
use crate::error::Result;
use crate::frame::Frame;

/// Build a frame row by row. `row_fn(row)` returns the interleaved RGB bytes
/// of that row. Rows are computed in parallel above the pixel threshold; the
/// output is identical either way.
pub(crate) fn build_rows<F>(height: usize, width: usize, row_fn: F) -> Result<Frame>
where
    F: Fn(usize) -> Vec<u8> + Sync + Send,
{
    let rows: Vec<Vec<u8>> = if height * width >= PARALLEL_PIXEL_THRESHOLD {
        (0..height).into_par_iter().map(&row_fn).collect()
    } else {
        (0..height).map(&row_fn).collect()
    };

    let mut pixels = Vec::with_capacity(height * width * COLOR_CHANNEL_COUNT);
    for row in rows {
        pixels.extend_from_slice(&row);
    }
    Frame::from_raw(width, height, pixels)
}

/// Run `f(row_index, row)` over each `row_len`-sized chunk of `buf`.
pub(crate) fn for_each_row<T, F>(buf: &mut [T], row_len: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if parallel {
        buf.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, chunk)| f(row, chunk));
    } else {
        buf.chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, chunk)| f(row, chunk));
    }
}

/// Index clamped into `[0, len)`, replicating the border.
#[inline]
pub(crate) fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
