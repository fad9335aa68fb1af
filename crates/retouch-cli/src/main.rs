mod commands;
mod io;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retouch", about = "Automatic photo quality analysis and enhancement")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure noise, exposure, color cast, contrast, saturation and blur
    Analyze(commands::analyze::AnalyzeArgs),
    /// Enhance an image with automatically chosen corrections
    Auto(commands::auto::AutoArgs),
    /// Enhance an image with explicit parameters
    Manual(commands::manual::ManualArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Auto(args) => commands::auto::run(args),
        Commands::Manual(args) => commands::manual::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
