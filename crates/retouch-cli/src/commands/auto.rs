use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use retouch_core::auto_enhance_with;
use retouch_core::enhance::RetouchConfig;

use super::config::load_toml;
use crate::io::{default_output, load_frame, save_frame};
use crate::progress::BarObserver;
use crate::summary::print_parameters_used;

#[derive(Args)]
pub struct AutoArgs {
    /// Input image (PNG, JPEG, TIFF)
    pub file: PathBuf,

    /// Configuration file (TOML); only the [auto] table is used
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Save the parameters used as TOML, loadable by `manual --params`
    #[arg(long)]
    pub params_out: Option<PathBuf>,

    /// Output file path [default: <input>_enhanced.<ext>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &AutoArgs) -> Result<()> {
    let config: RetouchConfig = match args.config {
        Some(ref path) => load_toml(path)?,
        None => RetouchConfig::default(),
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.file, "enhanced"));

    let frame = load_frame(&args.file)?;

    let observer = BarObserver::new(true)?;
    let result = auto_enhance_with(&frame, &config.auto, &observer)?;
    observer.finish();

    save_frame(&result.frame, &output)?;
    print_parameters_used(&result.parameters, &output);

    if let Some(ref path) = args.params_out {
        let toml_str = toml::to_string_pretty(&result.parameters.to_manual())?;
        std::fs::write(path, toml_str)
            .with_context(|| format!("Failed to write parameters to {}", path.display()))?;
        println!("Parameters saved to {}", path.display());
    }

    Ok(())
}
