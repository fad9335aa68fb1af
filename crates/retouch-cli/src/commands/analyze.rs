use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use retouch_core::analyze;

use crate::io::load_frame;
use crate::summary::print_metrics;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input image (PNG, JPEG, TIFF)
    pub file: PathBuf,

    /// Print metrics as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let frame = load_frame(&args.file)?;
    let metrics = analyze(&frame)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        print_metrics(&args.file, &metrics);
    }
    Ok(())
}
