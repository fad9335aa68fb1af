use serde::{Deserialize, Serialize};

use crate::color::luma::channel_means;
use crate::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorCast {
    pub has_cast: bool,
    /// Largest pairwise channel-mean difference normalized to [0, 1].
    pub severity: f64,
    /// Channel means as (r, g, b).
    pub channel_means: (f64, f64, f64),
}

/// Detect a color cast from the spread of the channel means.
///
/// `threshold` is on the 0..255 scale.
pub fn has_color_cast(frame: &Frame, threshold: f64) -> ColorCast {
    let means = channel_means(frame);
    let (r, g, b) = means;
    let max_diff = (r - g).abs().max((g - b).abs()).max((b - r).abs());

    ColorCast {
        has_cast: max_diff > threshold,
        severity: (max_diff / 255.0).clamp(0.0, 1.0),
        channel_means: means,
    }
}
