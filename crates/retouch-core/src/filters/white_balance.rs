use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;
use crate::error::{check_param, Result};
use crate::frame::{to_u8, Frame};

/// Per-channel multiplicative gains.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelGains {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for ChannelGains {
    fn default() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }
    }
}

impl ChannelGains {
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }
}

/// Gray-world gains: each channel is scaled so its mean matches the overall mean.
///
/// `means` is (r, g, b). Channel means are floored at a small epsilon so a
/// pure-black channel yields a large but finite gain.
pub fn gray_world_gains(means: (f64, f64, f64)) -> ChannelGains {
    let (r, g, b) = means;
    let avg = (r + g + b) / 3.0;
    ChannelGains {
        r: avg / r.max(EPSILON),
        g: avg / g.max(EPSILON),
        b: avg / b.max(EPSILON),
    }
}

/// Multiply each channel by its gain, clamping to [0, 255].
pub fn apply_white_balance(frame: &Frame, gains: &ChannelGains) -> Result<Frame> {
    check_param("r_gain", gains.r, 0.0, 100.0)?;
    check_param("g_gain", gains.g, 0.0, 100.0)?;
    check_param("b_gain", gains.b, 0.0, 100.0)?;

    let lut = |gain: f64| -> [u8; 256] {
        let mut table = [0u8; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = to_u8((i as f64 * gain) as f32);
        }
        table
    };
    let (lr, lg, lb) = (lut(gains.r), lut(gains.g), lut(gains.b));

    frame.map_pixels(|[r, g, b]| [lr[r as usize], lg[g as usize], lb[b as usize]])
}
