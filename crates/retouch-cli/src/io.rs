use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageFormat;
use retouch_core::Frame;
use tracing::{debug, info};

/// Decode an image file into an RGB frame. Alpha and higher bit depths are
/// dropped.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgb8();
    let frame =
        Frame::try_from(img).with_context(|| format!("Unusable image {}", path.display()))?;
    debug!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        "Loaded image"
    );
    Ok(frame)
}

/// Encode a frame, choosing the format from the file extension.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        Some("tiff" | "tif") => ImageFormat::Tiff,
        _ => ImageFormat::Png,
    };
    frame
        .to_rgb_image()
        .save_with_format(path, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), ?format, "Saved image");
    Ok(())
}

/// `photo.jpg` becomes `photo_<suffix>.jpg` next to the input.
pub fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    input.with_file_name(format!("{stem}_{suffix}.{ext}"))
}
