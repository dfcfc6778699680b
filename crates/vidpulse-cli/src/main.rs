mod analyze;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::analyze::{run_analyze, run_validate, AnalyzeArgs};

#[derive(Debug, Parser)]
#[command(name = "vidpulse")]
#[command(about = "Sentiment, engagement and theme analytics for video metadata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full analysis over a dataset file
    Analyze(AnalyzeArgs),
    /// Load and validate a dataset file without analyzing it
    Validate {
        /// Dataset file (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,
    },
}

/// `RUST_LOG` wins over `VIDPULSE_LOG_LEVEL`; an unparsable directive falls
/// back to `info`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = std::env::var("VIDPULSE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            EnvFilter::try_new(level)
        })
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Validate { input } => run_validate(&input),
    };
    if let Err(e) = &result {
        tracing::error!("command failed: {e:#}");
    }
    result
}
