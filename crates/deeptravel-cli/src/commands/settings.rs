use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use deeptravel_core::settings::MODEL_OPTIONS;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current settings
    Show,
    /// Save the API key and, optionally, the model
    Set {
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        model: Option<String>,
    },
    /// List the selectable models
    Models,
}

pub async fn run(app: &AppContext, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => {
            let settings = app.settings.settings();
            let key_status = if settings.has_api_key() {
                "configured".green()
            } else {
                "not set".yellow()
            };
            println!("API key: {}", key_status);
            println!("Model:   {} ({})", settings.model_label(), settings.model.bright_black());
        }
        SettingsAction::Set { api_key, model } => {
            let model = model.unwrap_or_else(|| app.settings.settings().model);
            match app.settings.save(&api_key, &model).await {
                Ok(()) => println!("{}", "Settings updated.".green()),
                Err(e) => eprintln!("{}", e.to_string().red()),
            }
        }
        SettingsAction::Models => {
            let current = app.settings.settings().model;
            for option in MODEL_OPTIONS {
                let marker = if option.id == current { "*" } else { " " };
                println!("{} {:<18} {}", marker, option.id, option.label.bright_black());
            }
        }
    }
    Ok(())
}
