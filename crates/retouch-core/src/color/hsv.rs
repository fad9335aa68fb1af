use ndarray::Array2;

use crate::frame::Frame;

/// Convert RGB (0..255) to HSV.
///
/// Returns (hue in degrees [0, 360), saturation 0..255, value 0..255).
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };
    let h = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, max)
}

/// Convert HSV (hue degrees, saturation 0..255, value 0..255) back to RGB 0..255.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * (s / 255.0);
    let hp = (h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}

/// Per-pixel HSV saturation, rounded to 8-bit levels.
pub fn saturation_plane(frame: &Frame) -> Array2<f32> {
    Array2::from_shape_fn((frame.height(), frame.width()), |(row, col)| {
        let [r, g, b] = frame.pixel(row, col);
        rgb_to_hsv(r as f32, g as f32, b as f32).1.round()
    })
}
