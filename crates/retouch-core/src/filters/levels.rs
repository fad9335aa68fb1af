use crate::error::{check_param, Result};
use crate::frame::Frame;

/// Build the 8-bit gamma lookup table: `out = 255 * (in / 255)^gamma`.
///
/// gamma < 1.0 lifts shadows and midtones, gamma > 1.0 darkens them.
pub fn gamma_lut(gamma: f64) -> [u8; 256] {
    let mut table = [0u8; 256];
    for (i, v) in table.iter_mut().enumerate() {
        let out = (i as f64 / 255.0).powf(gamma) * 255.0;
        *v = out.round().clamp(0.0, 255.0) as u8;
    }
    table
}

/// Apply gamma correction uniformly across all three channels.
pub fn gamma_correct(frame: &Frame, gamma: f64) -> Result<Frame> {
    check_param("gamma", gamma, 0.05, 20.0)?;
    let table = gamma_lut(gamma);
    frame.map_pixels(|[r, g, b]| [table[r as usize], table[g as usize], table[b as usize]])
}
