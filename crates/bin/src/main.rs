//! Sloan CLI binary.
//!
//! Batch analysis of accrual-sorted portfolio returns from the
//! French-library monthly report.

mod pipeline;

use clap::{Parser, Subcommand};
use pipeline::AnalysisConfig;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "sloan")]
#[command(about = "Accrual portfolio analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: exports, statistics, charts
    Analyze {
        /// Path to the accruals report text file
        report: PathBuf,

        /// Directory for CSV, JSON and SVG outputs
        #[arg(long, default_value = "out")]
        output_dir: PathBuf,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Extract the two monthly tables to CSV without further analysis
    Extract {
        /// Path to the accruals report text file
        report: PathBuf,

        /// Directory for the CSV outputs
        #[arg(long, default_value = "out")]
        output_dir: PathBuf,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            report,
            output_dir,
            no_charts,
        } => pipeline::run_analysis(&AnalysisConfig {
            report_path: report,
            output_dir,
            charts: !no_charts,
        }),
        Commands::Extract { report, output_dir } => pipeline::run_extract(&report, &output_dir),
    }
}
