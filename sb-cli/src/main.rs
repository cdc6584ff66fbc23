//! StayBook CLI - command-line front end for the StayBook booking API.
//!
//! Exercises the same client stack the app uses: endpoint resolution, the
//! persisted session, interceptors and the typed endpoint calls. Useful for
//! checking a backend from a developer machine and for scripting.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use sb_core::config::AppConfig;
use sb_core::endpoint::BuildMode;
use sb_core::error::SbResult;
use sb_core::logging;
use sb_core::platform::Platform;

/// StayBook - hotel booking client.
#[derive(Parser)]
#[command(
    name = "staybook",
    version,
    about = "StayBook hotel booking client CLI",
    long_about = "A command-line interface for the StayBook booking API.\n\
                   Sign in, browse hotels and rooms, and manage bookings from the terminal."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Build mode override (development, production).
    #[arg(long, global = true)]
    mode: Option<BuildMode>,

    /// Platform override (android, ios, other).
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Development machine IP when targeting a physical device.
    #[arg(long, global = true)]
    device_ip: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved API endpoint.
    Endpoint,
    /// Check the backend health endpoint.
    Health,
    /// Sign in, register and manage the session.
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse hotels, provinces and reviews.
    Hotels {
        #[command(subcommand)]
        action: commands::hotels::HotelsAction,
    },
    /// Browse and search rooms.
    Rooms {
        #[command(subcommand)]
        action: commands::rooms::RoomsAction,
    },
    /// List and create bookings.
    Bookings {
        #[command(subcommand)]
        action: commands::bookings::BookingsAction,
    },
    /// Show or create the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::endpoint::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> SbResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_config_path()?,
    };
    let mut config = if config_path.exists() {
        AppConfig::load_from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    if let Some(mode) = cli.mode {
        config.api.build_mode = mode;
    }
    if let Some(platform) = cli.platform {
        config.api.platform = platform;
    }
    if let Some(ip) = cli.device_ip.as_deref() {
        config.api.device_ip = AppConfig::sanitize_device_ip(ip);
    }

    // Initialize logging
    let mut log_config = config.logging.clone();
    if cli.verbose {
        log_config.level = "debug".into();
    }
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| PathBuf::from("logs"));
    let _guard = logging::init_from_config(&log_config, &log_dir)?;

    info!("StayBook CLI v{}", sb_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Endpoint => commands::endpoint::show(&config, cli.format),
        Commands::Health => commands::endpoint::health(config, cli.format).await,
        Commands::Auth { action } => commands::auth::run(config, action, cli.format).await,
        Commands::Hotels { action } => commands::hotels::run(config, action, cli.format).await,
        Commands::Rooms { action } => commands::rooms::run(config, action, cli.format).await,
        Commands::Bookings { action } => {
            commands::bookings::run(config, action, cli.format).await
        }
        Commands::Config { action } => {
            commands::endpoint::config(&config, &config_path, action, cli.format)
        }
    }
}
