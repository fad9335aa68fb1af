use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use retouch_core::enhance::{manual_enhance_observed, ManualParameters};

use super::config::load_toml;
use crate::io::{default_output, load_frame, save_frame};
use crate::progress::BarObserver;
use crate::summary::print_manual_parameters;

#[derive(Args)]
pub struct ManualArgs {
    /// Input image (PNG, JPEG, TIFF)
    pub file: PathBuf,

    /// Parameter file (TOML); flags below override its values
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Bilateral spatial sigma
    #[arg(long)]
    pub sigma_space: Option<f64>,

    /// Bilateral color sigma
    #[arg(long)]
    pub sigma_color: Option<f64>,

    /// Red channel gain
    #[arg(long)]
    pub r_gain: Option<f64>,

    /// Green channel gain
    #[arg(long)]
    pub g_gain: Option<f64>,

    /// Blue channel gain
    #[arg(long)]
    pub b_gain: Option<f64>,

    /// Gamma (< 1 brightens)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// CLAHE clip limit (0 disables clipping)
    #[arg(long)]
    pub clip_limit: Option<f64>,

    /// CLAHE tiles per axis
    #[arg(long)]
    pub tile_grid: Option<usize>,

    /// Saturation multiplier
    #[arg(long)]
    pub saturation: Option<f64>,

    /// Unsharp mask radius
    #[arg(long)]
    pub sharpen_radius: Option<f64>,

    /// Unsharp mask amount in percent
    #[arg(long)]
    pub sharpen_amount: Option<f64>,

    /// Output file path [default: <input>_manual.<ext>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ManualArgs) -> Result<()> {
    let params = build_params(args)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.file, "manual"));

    let frame = load_frame(&args.file)?;

    let observer = BarObserver::new(false)?;
    let enhanced = manual_enhance_observed(&frame, &params, &observer)?;
    observer.finish();

    save_frame(&enhanced, &output)?;
    print_manual_parameters(&params, &output);
    Ok(())
}

fn build_params(args: &ManualArgs) -> Result<ManualParameters> {
    let mut params: ManualParameters = match args.params {
        Some(ref path) => load_toml(path)?,
        None => ManualParameters::default(),
    };

    let overrides = [
        (&mut params.sigma_space, args.sigma_space),
        (&mut params.sigma_color, args.sigma_color),
        (&mut params.r_gain, args.r_gain),
        (&mut params.g_gain, args.g_gain),
        (&mut params.b_gain, args.b_gain),
        (&mut params.gamma, args.gamma),
        (&mut params.clip_limit, args.clip_limit),
        (&mut params.saturation, args.saturation),
        (&mut params.sharpen_radius, args.sharpen_radius),
        (&mut params.sharpen_amount, args.sharpen_amount),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            *field = v;
        }
    }
    if let Some(tiles) = args.tile_grid {
        params.tile_grid = tiles;
    }

    Ok(params)
}
