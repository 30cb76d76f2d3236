mod commands;

use clap::Parser;
use commands::{execute_command, utils::init_logging, Commands};
use song_stats::{ConfigStore, Pipeline};
use std::path::PathBuf;

/// Charts and lists derived from a dump of music track records
#[derive(Parser)]
#[command(
    name = "song-stats",
    about = "Charts and lists derived from a dump of music track records",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ~/.config/song-stats/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(args.verbose);

    let config = match ConfigStore::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(args.command, &pipeline) {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
