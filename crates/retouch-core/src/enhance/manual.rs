use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::MANUAL_BILATERAL_DIAMETER;
use crate::error::Result;
use crate::filters::bilateral::{bilateral_filter, BilateralParams};
use crate::filters::clahe::{enhance_contrast_clahe, ClaheParams};
use crate::filters::levels::gamma_correct;
use crate::filters::saturation::enhance_saturation;
use crate::filters::unsharp_mask::{unsharp_mask, UnsharpParams};
use crate::filters::white_balance::{apply_white_balance, ChannelGains};
use crate::frame::Frame;

use super::types::{EnhanceObserver, EnhanceStage, NoOpObserver};

/// Caller-supplied enhancement settings. Every field is optional when
/// deserializing; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualParameters {
    pub sigma_space: f64,
    pub sigma_color: f64,
    pub r_gain: f64,
    pub g_gain: f64,
    pub b_gain: f64,
    pub gamma: f64,
    pub clip_limit: f64,
    pub tile_grid: usize,
    pub saturation: f64,
    pub sharpen_radius: f64,
    pub sharpen_amount: f64,
}

impl Default for ManualParameters {
    fn default() -> Self {
        Self {
            sigma_space: 3.0,
            sigma_color: 60.0,
            r_gain: 1.0,
            g_gain: 1.0,
            b_gain: 1.0,
            gamma: 1.0,
            clip_limit: 2.0,
            tile_grid: 8,
            saturation: 1.0,
            sharpen_radius: 1.0,
            sharpen_amount: 100.0,
        }
    }
}

impl ManualParameters {
    pub fn bilateral(&self) -> BilateralParams {
        BilateralParams {
            diameter: MANUAL_BILATERAL_DIAMETER,
            sigma_color: self.sigma_color,
            sigma_space: self.sigma_space,
        }
    }

    pub fn gains(&self) -> ChannelGains {
        ChannelGains {
            r: self.r_gain,
            g: self.g_gain,
            b: self.b_gain,
        }
    }

    pub fn clahe(&self) -> ClaheParams {
        ClaheParams {
            clip_limit: self.clip_limit,
            tile_grid: self.tile_grid,
        }
    }

    pub fn unsharp(&self) -> UnsharpParams {
        UnsharpParams {
            radius: self.sharpen_radius,
            amount: self.sharpen_amount,
        }
    }
}

/// Apply all six stages with the given parameters.
///
/// Order: denoise, white balance, gamma, contrast, saturation, sharpen.
/// Errors are returned as-is.
pub fn manual_enhance(frame: &Frame, params: &ManualParameters) -> Result<Frame> {
    manual_enhance_observed(frame, params, &NoOpObserver)
}

pub fn manual_enhance_observed(
    frame: &Frame,
    params: &ManualParameters,
    observer: &dyn EnhanceObserver,
) -> Result<Frame> {
    frame.validate()?;
    info!(
        width = frame.width(),
        height = frame.height(),
        "Manual enhancement"
    );

    let mut current = frame.clone();
    for stage in EnhanceStage::MANUAL_ORDER {
        observer.begin_stage(stage);
        observer.checkpoint(stage)?;
        current = match stage {
            EnhanceStage::Denoise => bilateral_filter(&current, &params.bilateral())?,
            EnhanceStage::WhiteBalance => apply_white_balance(&current, &params.gains())?,
            EnhanceStage::Gamma => gamma_correct(&current, params.gamma)?,
            EnhanceStage::Contrast => enhance_contrast_clahe(&current, &params.clahe())?,
            EnhanceStage::Saturation => enhance_saturation(&current, params.saturation)?,
            EnhanceStage::Sharpen => unsharp_mask(&current, &params.unsharp())?,
        };
        debug!(%stage, "Stage applied");
        observer.stage_applied(stage);
    }

    Ok(current)
}
