/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Guard for channel means used as gain denominators.
pub const EPSILON: f64 = 1e-6;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Number of channels in a frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Number of bins in an 8-bit intensity histogram.
pub const HISTOGRAM_BINS: usize = 256;

/// Default max pairwise channel-mean difference (0..255) that counts as a cast.
pub const DEFAULT_CAST_THRESHOLD: f64 = 15.0;

/// Default normalized 1%-99% luma span below which contrast is low.
pub const DEFAULT_CONTRAST_THRESHOLD: f64 = 0.3;

/// Default mean HSV saturation (0..255) below which a boost is needed.
pub const DEFAULT_SATURATION_THRESHOLD: f64 = 60.0;

/// Saturation value (0..255) below which a pixel counts as washed out.
pub const LOW_SATURATION_LEVEL: u8 = 50;

/// Default Laplacian variance below which a frame is blurry.
pub const DEFAULT_BLUR_THRESHOLD: f64 = 100.0;

/// Default noise level above which the automatic pipeline denoises.
pub const DEFAULT_DENOISE_THRESHOLD: f64 = 8.0;

/// Default noise level above which non-local means replaces the bilateral filter.
pub const DEFAULT_HEAVY_DENOISE_THRESHOLD: f64 = 25.0;

/// Bilateral filter diameter used by manual enhancement.
pub const MANUAL_BILATERAL_DIAMETER: usize = 9;
