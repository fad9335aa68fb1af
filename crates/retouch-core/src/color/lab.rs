//! sRGB <-> CIE L*a*b* (D65) conversion.

/// Reference white (D65), X and Z relative to Y = 1.
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

const LAB_EPSILON: f32 = 0.008856;
const LAB_KAPPA: f32 = 903.3;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(f: f32) -> f32 {
    let t = f * f * f;
    if t > LAB_EPSILON {
        t
    } else {
        (f - 16.0 / 116.0) / 7.787
    }
}

/// Lookup table from 8-bit sRGB to linear light.
pub struct LabConverter {
    linear: [f32; 256],
}

impl Default for LabConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl LabConverter {
    pub fn new() -> Self {
        let mut linear = [0.0f32; 256];
        for (i, v) in linear.iter_mut().enumerate() {
            *v = srgb_to_linear(i as f32 / 255.0);
        }
        Self { linear }
    }

    /// 8-bit RGB to (L in 0..100, a, b).
    pub fn rgb_to_lab(&self, rgb: [u8; 3]) -> [f32; 3] {
        let r = self.linear[rgb[0] as usize];
        let g = self.linear[rgb[1] as usize];
        let b = self.linear[rgb[2] as usize];

        let x = (0.412453 * r + 0.357580 * g + 0.180423 * b) / WHITE_X;
        let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
        let z = (0.019334 * r + 0.119193 * g + 0.950227 * b) / WHITE_Z;

        let fy = lab_f(y);
        let l = if y > LAB_EPSILON {
            116.0 * fy - 16.0
        } else {
            LAB_KAPPA * y
        };
        [l, 500.0 * (lab_f(x) - fy), 200.0 * (fy - lab_f(z))]
    }

    /// (L, a, b) back to RGB on the 0..255 scale, unclamped.
    pub fn lab_to_rgb(&self, lab: [f32; 3]) -> [f32; 3] {
        let [l, a, b] = lab;
        let fy = (l + 16.0) / 116.0;
        let y = if l > LAB_KAPPA * LAB_EPSILON {
            fy * fy * fy
        } else {
            l / LAB_KAPPA
        };
        let x = lab_f_inv(fy + a / 500.0) * WHITE_X;
        let z = lab_f_inv(fy - b / 200.0) * WHITE_Z;

        let r = 3.240479 * x - 1.537150 * y - 0.498535 * z;
        let g = -0.969256 * x + 1.875991 * y + 0.041556 * z;
        let bl = 0.055648 * x - 0.204043 * y + 1.057311 * z;

        [
            linear_to_srgb(r.max(0.0)) * 255.0,
            linear_to_srgb(g.max(0.0)) * 255.0,
            linear_to_srgb(bl.max(0.0)) * 255.0,
        ]
    }
}
