//! Maps quality measurements to filter parameters.
//!
//! Every function here clamps its output into a fixed safe range, so extreme
//! or degenerate metrics can never produce an extreme correction.

use crate::filters::bilateral::BilateralParams;
use crate::filters::clahe::ClaheParams;
use crate::filters::nl_means::NlMeansParams;
use crate::filters::unsharp_mask::UnsharpParams;
use crate::filters::white_balance::{gray_world_gains, ChannelGains};

pub const GAMMA_RANGE: (f64, f64) = (0.6, 1.4);
pub const GAIN_RANGE: (f64, f64) = (0.5, 2.0);
pub const SATURATION_RANGE: (f64, f64) = (1.0, 1.8);
pub const SHARPEN_RADIUS_RANGE: (f64, f64) = (0.5, 2.0);
pub const SHARPEN_AMOUNT_RANGE: (f64, f64) = (20.0, 150.0);

const BASE_CLIP_LIMIT: f64 = 2.0;

/// Denoiser chosen for a noise level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Denoise {
    Bilateral(BilateralParams),
    NlMeans(NlMeansParams),
}

/// Gamma for a mean brightness, or `None` when exposure is acceptable.
///
/// Dark frames get gamma < 1 (brighten), bright frames gamma > 1. A narrow
/// 5%-95% span nudges gamma down by 10%.
pub fn gamma_for(brightness: f64, range_95: usize) -> Option<f64> {
    let gamma: f64 = if brightness < 60.0 {
        0.6
    } else if brightness < 100.0 {
        0.8
    } else if brightness > 180.0 {
        1.4
    } else if brightness > 140.0 {
        1.2
    } else {
        return None;
    };

    let gamma = if range_95 < 100 { gamma * 0.9 } else { gamma };
    Some(gamma.clamp(GAMMA_RANGE.0, GAMMA_RANGE.1))
}

/// Denoiser for a noise level, or `None` below `threshold`.
pub fn denoise_for(noise_std: f64, threshold: f64, heavy_threshold: f64) -> Option<Denoise> {
    if noise_std <= threshold {
        return None;
    }

    if noise_std > heavy_threshold {
        let (strength, template_window, search_window) = if noise_std < 35.0 {
            (12.0, 7, 21)
        } else {
            (15.0, 9, 25)
        };
        return Some(Denoise::NlMeans(NlMeansParams {
            strength,
            template_window,
            search_window,
            sigma: noise_std,
        }));
    }

    let (diameter, sigma_space) = if noise_std < 15.0 { (7, 50.0) } else { (9, 70.0) };
    Some(Denoise::Bilateral(BilateralParams {
        diameter,
        sigma_color: 2.0 * noise_std,
        sigma_space,
    }))
}

/// Gray-world gains softened by cast severity.
///
/// A faint cast is corrected at 30% strength, a maximal one fully.
pub fn white_balance_gains(channel_means: (f64, f64, f64), severity: f64) -> ChannelGains {
    let smooth = 0.3 + 0.7 * severity.clamp(0.0, 1.0);
    gray_world_gains(channel_means)
        .map(|g| (1.0 + (g - 1.0) * smooth).clamp(GAIN_RANGE.0, GAIN_RANGE.1))
}

/// CLAHE settings for the measured contrast and brightness.
pub fn clahe_params(brightness: f64, range_contrast: f64, std_contrast: f64) -> ClaheParams {
    let range_factor = if range_contrast < 0.15 {
        2.5
    } else if range_contrast < 0.25 {
        1.8
    } else {
        1.2
    };
    let brightness_factor = if brightness < 80.0 {
        1.3
    } else if brightness > 180.0 {
        0.8
    } else {
        1.0
    };

    let tile_grid = if std_contrast < 0.1 {
        6
    } else if std_contrast > 0.2 {
        12
    } else {
        8
    };

    ClaheParams {
        clip_limit: BASE_CLIP_LIMIT * range_factor * brightness_factor,
        tile_grid,
    }
}

/// Saturation multiplier for the measured mean saturation.
///
/// `low_sat_ratio` is the share of washed-out pixels; more of them means a
/// stronger boost.
pub fn saturation_scale(mean_sat: f64, low_sat_ratio: f64) -> f64 {
    let ratio = low_sat_ratio.clamp(0.0, 1.0);
    let scale = if mean_sat < 30.0 {
        1.4 + 0.3 * ratio
    } else if mean_sat < 50.0 {
        1.2 + 0.2 * ratio
    } else {
        1.1 + 0.1 * ratio
    };
    scale.clamp(SATURATION_RANGE.0, SATURATION_RANGE.1)
}

/// Unsharp-mask settings for a blur severity, damped on noisy frames so
/// grain is not amplified.
pub fn unsharp_params(blur_severity: f64, noise_std: f64) -> UnsharpParams {
    let (mut radius, mut amount): (f64, f64) = if blur_severity > 0.7 {
        (1.5, 120.0)
    } else if blur_severity > 0.4 {
        (1.2, 100.0)
    } else {
        (0.8, 80.0)
    };

    if noise_std > 25.0 {
        amount *= 0.5;
        radius *= 1.5;
    } else if noise_std > 15.0 {
        amount *= 0.7;
        radius *= 1.2;
    }

    UnsharpParams {
        radius: radius.clamp(SHARPEN_RADIUS_RANGE.0, SHARPEN_RADIUS_RANGE.1),
        amount: amount.clamp(SHARPEN_AMOUNT_RANGE.0, SHARPEN_AMOUNT_RANGE.1),
    }
}
