//! Pinchpoint CLI: turn hand-landmark streams into pointer intents.
//!
//! Usage:
//!   pinchpoint run [OPTIONS]          Stream detector frames, emit intents
//!   pinchpoint replay <FRAMES>        Replay a recorded frame file
//!   pinchpoint check                  Validate configuration
//!   pinchpoint config init|show       Manage the config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pinchpoint_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "pinchpoint",
    about = "Hand-gesture pointer control: pinch to drag, pinch and move to scroll",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream detector frames and emit pointer intents
    Run {
        /// JSONL detector frames ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// JSONL intent output ("-" for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        #[command(flatten)]
        overrides: commands::GestureOverrides,
    },

    /// Replay a recorded detector frame file and print the intents
    Replay {
        /// Path to the JSONL frame file
        frames: PathBuf,

        /// Print one JSON frame report per line
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: commands::GestureOverrides,
    },

    /// Load and validate the configuration
    Check,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config init` must work before any config file exists.
    let mut config = match &cli.command {
        Commands::Config {
            action: ConfigAction::Init { .. },
        } => AppConfig::default(),
        _ => commands::load_config(cli.config.as_deref())?,
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    pinchpoint_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            input,
            output,
            overrides,
        } => {
            overrides.apply(&mut config)?;
            commands::run::run(config, input, output).await
        }
        Commands::Replay {
            frames,
            json,
            overrides,
        } => {
            overrides.apply(&mut config)?;
            commands::replay::run(config, frames, json)
        }
        Commands::Check => commands::check::run(&config),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(cli.config, force),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}
