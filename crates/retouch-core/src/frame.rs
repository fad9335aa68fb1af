use image::{Rgb, RgbImage};
use ndarray::{Array2, Array3, Axis};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, RetouchError};

/// An 8-bit RGB photograph.
///
/// Pixel data is interleaved, shape = (height, width, 3), channel order R, G, B.
/// A `Frame` always has at least one pixel; the constructors reject anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    data: Array3<u8>,
}

impl Frame {
    /// Wrap an existing `(height, width, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let frame = Self { data };
        frame.validate()?;
        Ok(frame)
    }

    /// Build a frame from a row-major RGB byte buffer.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RetouchError::InvalidDimensions { width, height });
        }
        let expected = width * height * COLOR_CHANNEL_COUNT;
        if pixels.len() != expected {
            return Err(RetouchError::InvalidImage(format!(
                "expected {expected} bytes for {width}x{height} RGB, got {}",
                pixels.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, COLOR_CHANNEL_COUNT), pixels)
            .map_err(|e| RetouchError::InvalidImage(e.to_string()))?;
        Ok(Self { data })
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Result<Self> {
        Self::from_fn(width, height, |_, _| rgb)
    }

    /// Build a frame by evaluating `f(row, col)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> [u8; 3],
    {
        let mut pixels = Vec::with_capacity(width * height * COLOR_CHANNEL_COUNT);
        for row in 0..height {
            for col in 0..width {
                pixels.extend_from_slice(&f(row, col));
            }
        }
        Self::from_raw(width, height, pixels)
    }

    /// Merge three equally sized channel planes, rounding and clamping to [0, 255].
    pub fn from_planes(red: &Array2<f32>, green: &Array2<f32>, blue: &Array2<f32>) -> Result<Self> {
        let (h, w) = red.dim();
        if green.dim() != (h, w) || blue.dim() != (h, w) {
            return Err(RetouchError::InvalidImage(
                "channel planes differ in size".to_string(),
            ));
        }
        let mut pixels = Vec::with_capacity(h * w * COLOR_CHANNEL_COUNT);
        for row in 0..h {
            for col in 0..w {
                pixels.push(to_u8(red[[row, col]]));
                pixels.push(to_u8(green[[row, col]]));
                pixels.push(to_u8(blue[[row, col]]));
            }
        }
        Self::from_raw(w, h, pixels)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    /// Check the frame is non-empty and has exactly three channels.
    pub fn validate(&self) -> Result<()> {
        let (h, w, c) = self.data.dim();
        if h == 0 || w == 0 {
            return Err(RetouchError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        if c != COLOR_CHANNEL_COUNT {
            return Err(RetouchError::InvalidImage(format!(
                "expected {COLOR_CHANNEL_COUNT} channels, got {c}"
            )));
        }
        Ok(())
    }

    /// One channel (0 = R, 1 = G, 2 = B) as an f32 plane on the 0..255 scale.
    pub fn channel(&self, index: usize) -> Array2<f32> {
        self.data.index_axis(Axis(2), index).mapv(f32::from)
    }

    /// All three channels as f32 planes.
    pub fn planes(&self) -> [Array2<f32>; 3] {
        [self.channel(0), self.channel(1), self.channel(2)]
    }

    /// Apply a per-pixel color transform.
    pub fn map_pixels<F>(&self, f: F) -> Result<Frame>
    where
        F: Fn([u8; 3]) -> [u8; 3] + Sync + Send,
    {
        let width = self.width();
        crate::filters::build_rows(self.height(), width, |row| {
            let mut out = Vec::with_capacity(width * COLOR_CHANNEL_COUNT);
            for col in 0..width {
                out.extend_from_slice(&f(self.pixel(row, col)));
            }
            out
        })
    }

    /// Convert to an `image` crate buffer for encoding.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            Rgb(self.pixel(y as usize, x as usize))
        })
    }
}

impl TryFrom<RgbImage> for Frame {
    type Error = RetouchError;

    fn try_from(img: RgbImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        Self::from_raw(w as usize, h as usize, img.into_raw())
    }
}

/// Round and saturate a 0..255 float sample to u8.
pub(crate) fn to_u8(v: f32) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.round().clamp(0.0, 255.0) as u8
    }
}
