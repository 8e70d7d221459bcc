use anyhow::{Result, bail};
use clap::Subcommand;
use colored::Colorize;
use deeptravel_core::chat::Category;
use deeptravel_core::journey::Journey;
use deeptravel_core::navigation::Screen;

use crate::bootstrap::AppContext;

#[derive(Subcommand)]
pub enum JourneyAction {
    /// Create a journey and make it current
    Add {
        name: String,
        #[arg(long, default_value = "")]
        country: String,
    },
    /// List all journeys
    List,
    /// Make a journey current
    Select { id: String },
    /// Deselect the current journey
    Clear,
    /// Open the current journey's home
    Show,
}

pub async fn run(app: &AppContext, action: JourneyAction) -> Result<()> {
    match action {
        JourneyAction::Add { name, country } => match app.journeys.add_journey(&name, &country).await {
            Some(journey) => {
                println!("{}", format!("Journey created: {}", describe(&journey)).green());
            }
            None => println!("{}", "Enter a journey name first.".yellow()),
        },
        JourneyAction::List => list(app),
        JourneyAction::Select { id } => {
            if !app.journeys.list_journeys().iter().any(|j| j.id == id) {
                bail!("Unknown journey: {}", id);
            }
            app.journeys.set_current_journey(Some(&id)).await;
            println!("{}", format!("Current journey: {}", id).green());
        }
        JourneyAction::Clear => {
            app.journeys.set_current_journey(None).await;
            println!("{}", "No journey selected.".bright_black());
        }
        JourneyAction::Show => show(app).await,
    }
    Ok(())
}

fn describe(journey: &Journey) -> String {
    match journey.country() {
        Some(country) => format!("{} ({})", journey.name, country),
        None => journey.name.clone(),
    }
}

fn list(app: &AppContext) {
    let snapshot = app.journeys.snapshot();
    if snapshot.journeys.is_empty() {
        println!("{}", "No journeys yet. Create one with `journey add <name>`.".bright_black());
        return;
    }

    for journey in &snapshot.journeys {
        let marker = if snapshot.current_journey_id.as_deref() == Some(journey.id.as_str()) {
            "*".bright_green()
        } else {
            " ".normal()
        };
        println!("{} {}  {}", marker, describe(journey), journey.id.bright_black());
    }
}

async fn show(app: &AppContext) {
    let Some(journey) = app.journeys.current_journey() else {
        println!("{}", "No journey selected. Pick one with `journey select <id>`.".yellow());
        return;
    };

    app.navigation.record_visit(Screen::Trip).await;

    println!("{}", describe(&journey).bright_magenta().bold());
    for category in Category::all() {
        println!("  {}  {}", category.label().cyan(), category.description().bright_black());
    }
}
