use crate::journey_registry::JourneySnapshot;
use crate::settings_state::SettingsSnapshot;

/// Something that must be fixed before chatting makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPrecondition {
    /// No API key configured; remedy is the settings screen
    MissingApiKey,
    /// No journey selected; remedy is the journey list
    NoJourney,
}

impl ChatPrecondition {
    pub fn message(&self) -> &'static str {
        match self {
            ChatPrecondition::MissingApiKey => "No API key is configured yet.",
            ChatPrecondition::NoJourney => "No journey is selected.",
        }
    }

    /// Where the user can fix it.
    pub fn remedy(&self) -> &'static str {
        match self {
            ChatPrecondition::MissingApiKey => "settings",
            ChatPrecondition::NoJourney => "journey list",
        }
    }
}

/// Checks what entering a chat screen requires.
///
/// Nothing is reported while settings are still loading, and a missing
/// journey is only reported once the registry has loaded.
pub fn check_chat_preconditions(
    settings: &SettingsSnapshot,
    journeys: &JourneySnapshot,
) -> Option<ChatPrecondition> {
    if !settings.is_ready {
        return None;
    }
    if !settings.settings.has_api_key() {
        return Some(ChatPrecondition::MissingApiKey);
    }
    if journeys.loaded && journeys.current_journey_id.is_none() {
        return Some(ChatPrecondition::NoJourney);
    }
    None
}
