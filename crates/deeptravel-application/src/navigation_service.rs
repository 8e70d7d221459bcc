//! Last-page tracking and the one-shot restoration on launch.

use deeptravel_core::navigation::{
    LastPage, LastPageRepository, RestorationPhase, RestoreOutcome, Screen,
};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::journey_registry::JourneyRegistry;

pub struct NavigationService {
    repository: Arc<dyn LastPageRepository>,
    journeys: Arc<JourneyRegistry>,
    phase: Mutex<RestorationPhase>,
}

impl NavigationService {
    pub fn new(repository: Arc<dyn LastPageRepository>, journeys: Arc<JourneyRegistry>) -> Self {
        Self {
            repository,
            journeys,
            phase: Mutex::new(RestorationPhase::default()),
        }
    }

    /// Records a visit to `screen` together with the current journey.
    /// Write failures are logged only.
    pub async fn record_visit(&self, screen: Screen) {
        let page = LastPage::new(screen, self.journeys.current_journey_id().as_deref());
        if let Err(e) = self.repository.save_last_page(&page).await {
            tracing::warn!("[NavigationService] Failed to record visit to {}: {}", screen, e);
        }
    }

    pub async fn phase(&self) -> RestorationPhase {
        *self.phase.lock().await
    }

    /// Runs the launch-time restoration.
    ///
    /// Only the first call does anything; later calls return `None`. The
    /// stored journey (if any) is made current, without validation, before
    /// the redirect is returned. A missing or unreadable record keeps the
    /// landing screen.
    pub async fn restore_once(&self) -> Option<RestoreOutcome> {
        if !self.phase.lock().await.begin() {
            tracing::debug!("[NavigationService] Restoration already ran");
            return None;
        }

        let outcome = match self.repository.load_last_page().await {
            Ok(Some(page)) => {
                if let Some(journey_id) = page.journey_id.as_deref() {
                    self.journeys.set_current_journey(Some(journey_id)).await;
                }
                tracing::info!(
                    "[NavigationService] Restoring {} (journey: {:?})",
                    page.screen,
                    page.journey_id
                );
                RestoreOutcome::Redirect {
                    screen: page.screen,
                    journey_id: page.journey_id,
                }
            }
            Ok(None) => RestoreOutcome::StayOnLanding,
            Err(e) => {
                tracing::warn!("[NavigationService] Unreadable last page: {}", e);
                RestoreOutcome::StayOnLanding
            }
        };

        self.phase.lock().await.finish();
        Some(outcome)
    }
}
