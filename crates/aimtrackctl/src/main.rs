//! Aimtrack Control - CLI for player stat tracking
//!
//! Fetches stats, shows K/D history and generates performance reports.

use aimtrackctl::{commands, logging};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Version is embedded at build time
const VERSION: &str = env!("AIMTRACK_VERSION");

#[derive(Parser)]
#[command(name = "aimtrackctl")]
#[command(about = "Aimtrack - CS2 performance tracker", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Config file (default: $AIMTRACK_CONFIG or ~/.config/aimtrack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a performance report from stored sessions
    Report {
        /// JSON file with the player's sessions
        #[arg(long)]
        sessions: PathBuf,

        /// Player name used in the report
        #[arg(long)]
        username: String,
    },

    /// Show the K/D timeline of stored sessions
    History {
        /// JSON file with the player's sessions
        #[arg(long)]
        sessions: PathBuf,
    },

    /// Fetch current stats from Steam and print them as a session
    Fetch {
        /// 17-digit Steam ID 64
        #[arg(long)]
        steam_id: String,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())?;
    logging::init(&config.log.level);
    tracing::debug!("aimtrackctl v{} starting", VERSION);

    let output = match cli.command {
        Commands::Report { sessions, username } => commands::report(&config, &sessions, &username)?,
        Commands::History { sessions } => commands::history(&sessions)?,
        Commands::Fetch { steam_id } => commands::fetch(&config, &steam_id)?,
        Commands::Config => commands::show_config(&config)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}
