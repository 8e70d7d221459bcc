use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use deeptravel_core::config::CONFIG_KEYS;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set one key, e.g. `logging.level debug`
    Set { key: String, value: String },
    /// List the settable keys
    Keys,
}

pub fn run(app: &AppContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", app.config_service.path().display().to_string().bright_black());
            let text = toml::to_string_pretty(&app.config).context("Failed to render config")?;
            print!("{}", text);
        }
        ConfigAction::Set { key, value } => {
            match app
                .config_service
                .update(|config| config.set_value(&key, &value))
            {
                Ok(()) => {
                    tracing::info!("[Config] {} updated", key);
                    println!("{} {} = {}", "Updated".green(), key.cyan(), value);
                }
                Err(e) => eprintln!("{}", e.to_string().red()),
            }
        }
        ConfigAction::Keys => {
            for key in CONFIG_KEYS {
                println!("  {}", key.cyan());
            }
        }
    }
    Ok(())
}
