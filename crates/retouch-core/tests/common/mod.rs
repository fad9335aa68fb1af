#![allow(dead_code)]

use retouch_core::Frame;

/// Small deterministic generator so test images are identical on every run.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (1u64 << 31) as f64
    }

    /// Approximately standard normal (Irwin-Hall, 12 uniforms).
    pub fn gaussian(&mut self) -> f64 {
        (0..12).map(|_| self.next_f64()).sum::<f64>() - 6.0
    }
}

fn clamp_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

pub fn uniform(width: usize, height: usize, rgb: [u8; 3]) -> Frame {
    Frame::filled(width, height, rgb).unwrap()
}

/// Gray frame with the same Gaussian noise added to all three channels.
pub fn noisy_gray(width: usize, height: usize, base: u8, sigma: f64, seed: u64) -> Frame {
    let mut rng = Lcg::new(seed);
    let mut pixels = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        let v = clamp_u8(base as f64 + rng.gaussian() * sigma);
        pixels.extend_from_slice(&[v, v, v]);
    }
    Frame::from_raw(width, height, pixels).unwrap()
}

/// Colored frame with independent Gaussian noise per channel.
pub fn noisy_color(width: usize, height: usize, base: [u8; 3], sigma: f64, seed: u64) -> Frame {
    let mut rng = Lcg::new(seed);
    let mut pixels = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        for &b in &base {
            pixels.push(clamp_u8(b as f64 + rng.gaussian() * sigma));
        }
    }
    Frame::from_raw(width, height, pixels).unwrap()
}

/// Gray frame of independent uniform random levels in 0..=255.
pub fn random_gray(width: usize, height: usize, seed: u64) -> Frame {
    let mut rng = Lcg::new(seed);
    let mut pixels = Vec::with_capacity(width * height * 3);
    for _ in 0..width * height {
        let v = (rng.next_u32() % 256) as u8;
        pixels.extend_from_slice(&[v, v, v]);
    }
    Frame::from_raw(width, height, pixels).unwrap()
}

/// Gray ramp from `lo` at the left edge to `hi` at the right edge.
pub fn horizontal_ramp(width: usize, height: usize, lo: u8, hi: u8) -> Frame {
    let span = hi as f64 - lo as f64;
    let denom = (width.max(2) - 1) as f64;
    Frame::from_fn(width, height, |_, col| {
        let v = clamp_u8(lo as f64 + span * col as f64 / denom);
        [v, v, v]
    })
    .unwrap()
}

/// Checkerboard of `cell`-sized squares alternating between two colors.
pub fn checkerboard(width: usize, height: usize, cell: usize, a: [u8; 3], b: [u8; 3]) -> Frame {
    Frame::from_fn(width, height, |row, col| {
        if (row / cell + col / cell) % 2 == 0 {
            a
        } else {
            b
        }
    })
    .unwrap()
}
