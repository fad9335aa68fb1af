use crate::color::hsv::{hsv_to_rgb, rgb_to_hsv};
use crate::error::{check_param, Result};
use crate::frame::{to_u8, Frame};

/// Scale HSV saturation by `scale`, clamping saturation to 255.
///
/// Hue and value are preserved; gray pixels stay gray.
pub fn enhance_saturation(frame: &Frame, scale: f64) -> Result<Frame> {
    check_param("saturation", scale, 0.0, 10.0)?;
    let scale = scale as f32;

    frame.map_pixels(|[r, g, b]| {
        let (h, s, v) = rgb_to_hsv(r as f32, g as f32, b as f32);
        let (r, g, b) = hsv_to_rgb(h, (s * scale).min(255.0), v);
        [to_u8(r), to_u8(g), to_u8(b)]
    })
}
