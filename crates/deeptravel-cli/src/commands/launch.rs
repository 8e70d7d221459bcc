use anyhow::Result;
use colored::Colorize;
use deeptravel_core::navigation::RestoreOutcome;

use crate::bootstrap::AppContext;

pub async fn run(app: &AppContext) -> Result<()> {
    match app.navigation.restore_once().await {
        Some(RestoreOutcome::Redirect { screen, journey_id }) => {
            let journey = app
                .journeys
                .current_journey()
                .map(|j| j.name)
                .or(journey_id)
                .unwrap_or_else(|| "no journey".to_string());
            println!("{}", format!("Resuming {} in {}", screen, journey).green());
        }
        Some(RestoreOutcome::StayOnLanding) | None => {
            println!("{}", "Starting on the journey list.".bright_black());
        }
    }
    Ok(())
}
