use tracing::{debug, info, warn};

use crate::error::{Result, RetouchError};
use crate::filters::bilateral::bilateral_filter;
use crate::filters::clahe::enhance_contrast_clahe;
use crate::filters::levels::gamma_correct;
use crate::filters::nl_means::nl_means_denoise;
use crate::filters::saturation::enhance_saturation;
use crate::filters::unsharp_mask::unsharp_mask;
use crate::filters::white_balance::apply_white_balance;
use crate::frame::Frame;
use crate::quality::{analyze_brightness, analyze_with, QualityMetrics};

use super::adaptive::{
    clahe_params, denoise_for, gamma_for, saturation_scale, unsharp_params, white_balance_gains,
    Denoise,
};
use super::config::AutoEnhanceConfig;
use super::types::{AutoEnhanceOutput, EnhanceObserver, EnhanceStage, NoOpObserver, ParametersUsed};

/// Analyze a frame and apply whichever corrections it needs, using the
/// default configuration.
pub fn auto_enhance(frame: &Frame) -> Result<AutoEnhanceOutput> {
    auto_enhance_with(frame, &AutoEnhanceConfig::default(), &NoOpObserver)
}

/// Analyze a frame and apply whichever corrections it needs.
///
/// Only an invalid input frame is reported as an error. If any stage fails
/// (or the observer aborts) the original frame is returned unchanged and
/// `parameters.fallback` carries the reason.
pub fn auto_enhance_with(
    frame: &Frame,
    config: &AutoEnhanceConfig,
    observer: &dyn EnhanceObserver,
) -> Result<AutoEnhanceOutput> {
    let metrics = analyze_with(frame, &config.analysis)?;
    observer.on_analysis(&metrics);
    info!(
        width = frame.width(),
        height = frame.height(),
        noise_std = metrics.noise_std,
        brightness = metrics.brightness,
        "Automatic enhancement"
    );

    match run_stages(frame, &metrics, config, observer) {
        Ok((enhanced, parameters)) => {
            info!(stages = parameters.stages.len(), "Automatic enhancement complete");
            Ok(AutoEnhanceOutput {
                frame: enhanced,
                parameters,
                metrics,
            })
        }
        Err(e) => {
            warn!(error = %e, "Enhancement failed, returning original frame");
            Ok(AutoEnhanceOutput {
                frame: frame.clone(),
                parameters: ParametersUsed::fallback(e.to_string()),
                metrics,
            })
        }
    }
}

/// Run every stage in order, short-circuiting on the first error.
fn run_stages(
    frame: &Frame,
    metrics: &QualityMetrics,
    config: &AutoEnhanceConfig,
    observer: &dyn EnhanceObserver,
) -> Result<(Frame, ParametersUsed)> {
    let mut state = RunState {
        current: frame.clone(),
        brightness: metrics.brightness,
        params: ParametersUsed::default(),
    };

    for stage in EnhanceStage::AUTO_ORDER {
        observer.begin_stage(stage);
        observer.checkpoint(stage)?;

        let output = apply_stage(stage, &mut state, metrics, config).map_err(|e| match e {
            RetouchError::StageFailure { .. } => e,
            other => RetouchError::StageFailure {
                stage,
                reason: other.to_string(),
            },
        })?;

        match output {
            Some(next) => {
                check_dimensions(stage, &state.current, &next)?;
                state.current = next;
                state.params.stages.push(stage);
                observer.stage_applied(stage);
            }
            None => {
                debug!(%stage, "Stage not needed");
                observer.stage_skipped(stage);
            }
        }
    }

    Ok((state.current, state.params))
}

struct RunState {
    current: Frame,
    /// Mean luma, refreshed after white balance.
    brightness: f64,
    params: ParametersUsed,
}

/// Evaluate one stage. `Ok(None)` means the frame does not need it.
fn apply_stage(
    stage: EnhanceStage,
    state: &mut RunState,
    metrics: &QualityMetrics,
    config: &AutoEnhanceConfig,
) -> Result<Option<Frame>> {
    let current = &state.current;
    let params = &mut state.params;

    match stage {
        EnhanceStage::Gamma => {
            let Some(gamma) = gamma_for(metrics.brightness, metrics.dynamic_range.range_95) else {
                return Ok(None);
            };
            info!(gamma, brightness = metrics.brightness, "Gamma correction");
            params.gamma = Some(gamma);
            gamma_correct(current, gamma).map(Some)
        }
        EnhanceStage::Denoise => {
            let denoise = denoise_for(
                metrics.noise_std,
                config.denoise_threshold,
                config.heavy_denoise_threshold,
            );
            match denoise {
                None => Ok(None),
                Some(Denoise::Bilateral(bp)) => {
                    info!(
                        diameter = bp.diameter,
                        sigma_color = bp.sigma_color,
                        sigma_space = bp.sigma_space,
                        "Bilateral denoising"
                    );
                    params.bilateral_diameter = Some(bp.diameter);
                    params.sigma_color = Some(bp.sigma_color);
                    params.sigma_space = Some(bp.sigma_space);
                    bilateral_filter(current, &bp).map(Some)
                }
                Some(Denoise::NlMeans(np)) => {
                    info!(
                        strength = np.strength,
                        template = np.template_window,
                        search = np.search_window,
                        "Non-local means denoising"
                    );
                    params.nlm_strength = Some(np.strength);
                    params.nlm_template_window = Some(np.template_window);
                    params.nlm_search_window = Some(np.search_window);
                    nl_means_denoise(current, &np).map(Some)
                }
            }
        }
        EnhanceStage::WhiteBalance => {
            let cast = &metrics.color_cast;
            if !cast.has_cast {
                return Ok(None);
            }
            let gains = white_balance_gains(cast.channel_means, cast.severity);
            info!(
                r = gains.r,
                g = gains.g,
                b = gains.b,
                severity = cast.severity,
                "White balance"
            );
            params.r_gain = Some(gains.r);
            params.g_gain = Some(gains.g);
            params.b_gain = Some(gains.b);
            let balanced = apply_white_balance(current, &gains)?;
            state.brightness = analyze_brightness(&balanced);
            Ok(Some(balanced))
        }
        EnhanceStage::Contrast => {
            let range = &metrics.dynamic_range;
            // A single-level image has nothing to equalize.
            if !metrics.contrast.is_low || range.high_99 <= range.low_1 {
                return Ok(None);
            }
            let cp = clahe_params(
                state.brightness,
                metrics.contrast.range_contrast,
                metrics.contrast.std_contrast,
            );
            info!(clip_limit = cp.clip_limit, tile_grid = cp.tile_grid, "CLAHE");
            params.clip_limit = Some(cp.clip_limit);
            params.tile_grid = Some(cp.tile_grid);
            enhance_contrast_clahe(current, &cp).map(Some)
        }
        EnhanceStage::Saturation => {
            let sat = &metrics.saturation;
            // Pure grays stay gray under any scale.
            if !sat.needs_boost || sat.mean_sat <= 0.0 {
                return Ok(None);
            }
            let scale = saturation_scale(sat.mean_sat, sat.low_sat_ratio);
            info!(scale, mean_sat = sat.mean_sat, "Saturation boost");
            params.saturation = Some(scale);
            enhance_saturation(current, scale).map(Some)
        }
        EnhanceStage::Sharpen => {
            let flat = metrics.blur.laplacian_var <= 0.0 && metrics.dynamic_range.range_99 == 0;
            if !metrics.blur.is_blurry || flat {
                return Ok(None);
            }
            let up = unsharp_params(metrics.blur.severity, metrics.noise_std);
            info!(radius = up.radius, amount = up.amount, "Unsharp mask");
            params.sharpen_radius = Some(up.radius);
            params.sharpen_amount = Some(up.amount);
            unsharp_mask(current, &up).map(Some)
        }
    }
}

fn check_dimensions(stage: EnhanceStage, before: &Frame, after: &Frame) -> Result<()> {
    if before.width() != after.width() || before.height() != after.height() {
        return Err(RetouchError::StageFailure {
            stage,
            reason: format!(
                "output is {}x{}, expected {}x{}",
                after.width(),
                after.height(),
                before.width(),
                before.height()
            ),
        });
    }
    Ok(())
}
