use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod bootstrap;
mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "deeptravel")]
#[command(about = "DeepTravel - journey-scoped travel assistant", long_about = None)]
struct Cli {
    /// Base directory for config and data (defaults to DEEPTRAVEL_HOME or the platform dirs)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage journeys
    Journey {
        #[command(subcommand)]
        action: commands::journey::JourneyAction,
    },
    /// Chat with a category assistant in the current journey
    Chat {
        #[command(subcommand)]
        action: commands::chat::ChatAction,
    },
    /// API key and model
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Show or edit config.toml
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Restore the last visited screen
    Launch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app = bootstrap::bootstrap(cli.config_dir.as_deref()).await?;

    match cli.command {
        Commands::Journey { action } => commands::journey::run(&app, action).await?,
        Commands::Chat { action } => commands::chat::run(&app, action).await?,
        Commands::Settings { action } => commands::settings::run(&app, action).await?,
        Commands::Config { action } => commands::config::run(&app, action)?,
        Commands::Launch => commands::launch::run(&app).await?,
    }

    Ok(())
}
