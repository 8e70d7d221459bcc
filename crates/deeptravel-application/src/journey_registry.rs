//! Journey registry: the list of journeys and the current selection.

use deeptravel_core::journey::{Journey, JourneyRepository};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

use crate::now_millis;

/// Point-in-time view of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneySnapshot {
    /// Journeys in creation order
    pub journeys: Vec<Journey>,
    /// Selected journey id; not validated against `journeys`
    pub current_journey_id: Option<String>,
    /// `false` until the initial load has completed
    pub loaded: bool,
}

impl JourneySnapshot {
    /// Resolves the current id against the list. A dangling id yields `None`.
    pub fn current_journey(&self) -> Option<&Journey> {
        let id = self.current_journey_id.as_deref()?;
        self.journeys.iter().find(|journey| journey.id == id)
    }
}

/// Owns the journey list and the current-journey selection.
///
/// The list and the current id are persisted as two independent writes.
pub struct JourneyRegistry {
    repository: Arc<dyn JourneyRepository>,
    state: watch::Sender<JourneySnapshot>,
    /// Serializes mutations so persisted writes follow call order
    write_lock: Mutex<()>,
}

impl JourneyRegistry {
    pub fn new(repository: Arc<dyn JourneyRepository>) -> Self {
        let (state, _) = watch::channel(JourneySnapshot::default());
        Self {
            repository,
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Loads the persisted list and current id, then marks the registry loaded.
    ///
    /// Read failures are logged and treated as "no data".
    pub async fn load(&self) {
        let _guard = self.write_lock.lock().await;

        let journeys = match self.repository.load_journeys().await {
            Ok(journeys) => journeys,
            Err(e) => {
                tracing::warn!("[JourneyRegistry] Failed to load journeys: {}", e);
                Vec::new()
            }
        };
        let current_journey_id = match self.repository.load_current_journey_id().await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("[JourneyRegistry] Failed to load current journey id: {}", e);
                None
            }
        };

        tracing::debug!(
            "[JourneyRegistry] Loaded {} journeys (current: {:?})",
            journeys.len(),
            current_journey_id
        );

        self.state.send_modify(|state| {
            state.journeys = journeys;
            state.current_journey_id = current_journey_id;
            state.loaded = true;
        });
    }

    pub fn snapshot(&self) -> JourneySnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<JourneySnapshot> {
        self.state.subscribe()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    pub fn list_journeys(&self) -> Vec<Journey> {
        self.state.borrow().journeys.clone()
    }

    pub fn current_journey_id(&self) -> Option<String> {
        self.state.borrow().current_journey_id.clone()
    }

    pub fn current_journey(&self) -> Option<Journey> {
        self.state.borrow().current_journey().cloned()
    }

    /// Creates a journey, appends it, persists the list and selects it.
    ///
    /// Returns `None` without touching any state when the trimmed name is
    /// empty.
    pub async fn add_journey(&self, name: &str, country: &str) -> Option<Journey> {
        let Some(journey) = Journey::create(name, country, now_millis()) else {
            tracing::debug!("[JourneyRegistry] Ignoring journey with empty name");
            return None;
        };

        let _guard = self.write_lock.lock().await;

        let mut journeys = Vec::new();
        self.state.send_modify(|state| {
            state.journeys.push(journey.clone());
            state.current_journey_id = Some(journey.id.clone());
            journeys = state.journeys.clone();
        });

        tracing::info!(
            "[JourneyRegistry] Added journey '{}' ({})",
            journey.name,
            journey.id
        );

        if let Err(e) = self.repository.save_journeys(&journeys).await {
            tracing::warn!("[JourneyRegistry] Failed to persist journeys: {}", e);
        }
        self.persist_current_id(Some(&journey.id)).await;

        Some(journey)
    }

    /// Selects `journey_id`, or clears the selection with `None`.
    ///
    /// The id is not checked against the list.
    pub async fn set_current_journey(&self, journey_id: Option<&str>) {
        let _guard = self.write_lock.lock().await;

        self.state.send_modify(|state| {
            state.current_journey_id = journey_id.map(str::to_string);
        });
        self.persist_current_id(journey_id).await;
    }

    async fn persist_current_id(&self, journey_id: Option<&str>) {
        if let Err(e) = self.repository.save_current_journey_id(journey_id).await {
            tracing::warn!("[JourneyRegistry] Failed to persist current journey id: {}", e);
        }
    }
}
